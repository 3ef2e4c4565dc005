//! Byte-size formatting for the batch summary.

use humansize::{format_size, FormatSizeOptions, WINDOWS};

/// Format a byte count in 1024-based human units (B, KB, MB, GB, TB).
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let options = FormatSizeOptions::from(WINDOWS).decimal_places(2);
    format_size(bytes, options)
}

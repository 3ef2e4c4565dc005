//! SVG validation gate.

use crate::parse::parse_svg;

/// Check that a string is parseable, well-formed SVG content.
///
/// Returns false on any parse error instead of surfacing it; the pipeline
/// runs this before the first parse and again after every serialized-content
/// rewrite.
pub fn is_valid(content: &str) -> bool {
    match parse_svg(content) {
        Ok(doc) => doc.root.name.local.eq_ignore_ascii_case("svg"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_svg() {
        assert!(is_valid(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#));
    }

    #[test]
    fn test_accepts_uppercase_root() {
        assert!(is_valid("<SVG/>"));
    }

    #[test]
    fn test_rejects_non_svg_root() {
        assert!(!is_valid("<html><body/></html>"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid("<svg><rect></svg>"));
        assert!(!is_valid(""));
        assert!(!is_valid("hello"));
    }
}

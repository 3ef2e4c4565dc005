use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgslimError {
    #[error("The content does not appear to be a valid SVG document")]
    Validation,

    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    #[error("XML processing error: {0}")]
    XmlProcessing(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Metadata is not available before optimization")]
    MetadataUnavailable,

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

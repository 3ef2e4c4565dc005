//! Content providers: the string/file-backed source and sink feeding raw
//! content into and writing optimized content out of the optimizer.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SvgslimError;

lazy_static! {
    static ref XML_DECLARATION: Regex = Regex::new(r"^\s*<\?xml[^>]*\?>\s*").unwrap();
}

/// Where the raw SVG content came from.
#[derive(Debug, Clone)]
pub enum Provider {
    String { content: String },
    File { path: PathBuf, content: String },
}

impl Provider {
    pub fn from_string(content: impl Into<String>) -> Self {
        Provider::String {
            content: content.into(),
        }
    }

    /// Read the file eagerly so the original bytes are pinned for metadata.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SvgslimError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SvgslimError::FileNotFound(path));
        }
        let content = fs::read_to_string(&path)?;
        Ok(Provider::File { path, content })
    }

    /// The raw input content, exactly as supplied.
    pub fn input_content(&self) -> &str {
        match self {
            Provider::String { content } | Provider::File { content, .. } => content,
        }
    }

    /// Canonicalize serialized output: strip the XML declaration and trim.
    pub fn canonicalize(&self, serialized: &str) -> String {
        XML_DECLARATION.replace(serialized, "").trim().to_string()
    }
}

/// Write optimized content, creating parent directories as needed.
pub fn save_content(path: &Path, content: &str) -> Result<(), SvgslimError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_strips_declaration_and_trims() {
        let provider = Provider::from_string("");
        let out = provider.canonicalize("<?xml version=\"1.0\"?>\n<svg/>\n");
        assert_eq!(out, "<svg/>");
    }

    #[test]
    fn test_canonicalize_leaves_bare_content() {
        let provider = Provider::from_string("");
        assert_eq!(provider.canonicalize("<svg/>"), "<svg/>");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Provider::from_file("/definitely/not/here.svg").unwrap_err();
        assert!(matches!(err, SvgslimError::FileNotFound(_)));
    }

    #[test]
    fn test_save_content_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.svg");
        save_content(&path, "<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}

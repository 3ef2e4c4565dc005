//! The shared parse/serialize boundary.
//!
//! Every rule and every validation round trip goes through this module; no
//! other code touches quick-xml directly.

use std::fs;
use std::path::Path;

use crate::ast::Document;
use crate::error::SvgslimError;
use crate::parse::parse_svg;
use crate::serialize::serialize;
use crate::validate;

/// Load an SVG document from a string.
pub fn load_from_str(content: &str) -> Result<Document, SvgslimError> {
    parse_svg(content)
}

/// Load an SVG document from a file.
pub fn load_from_file(path: &Path) -> Result<Document, SvgslimError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SvgslimError::FileNotFound(path.to_path_buf()),
        _ => SvgslimError::Io(e),
    })?;
    parse_svg(&content)
}

/// Serialize a document back to text. Deterministic for a given tree.
pub fn save_to_string(doc: &Document) -> String {
    serialize(doc)
}

/// Rewrite the serialized form of a document.
///
/// Serializes the tree, applies `f` to the text, re-validates the result and
/// re-parses it into `doc`. A rewrite that corrupts the document surfaces as
/// `XmlProcessing` and leaves the tree untouched. This is the mechanism
/// behind the doctype, invisible-character, whitespace and namespace rules,
/// which operate on raw markup rather than the tree.
pub fn rewrite_serialized(
    doc: &mut Document,
    f: impl FnOnce(String) -> String,
) -> Result<(), SvgslimError> {
    let content = f(save_to_string(doc));

    if !validate::is_valid(&content) {
        return Err(SvgslimError::XmlProcessing(
            "Rewritten SVG content is not valid".into(),
        ));
    }

    *doc = parse_svg(&content)
        .map_err(|e| SvgslimError::XmlProcessing(format!("Failed to reload content: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_serialized_applies_text_edit() {
        let mut doc =
            load_from_str(r#"<svg xmlns="http://www.w3.org/2000/svg" data-x="1"/>"#).unwrap();
        rewrite_serialized(&mut doc, |s| s.replace(" data-x=\"1\"", "")).unwrap();
        assert_eq!(doc.root.get_attr("data-x"), None);
    }

    #[test]
    fn test_rewrite_serialized_rejects_corruption() {
        let mut doc = load_from_str(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#)
            .unwrap();
        let err = rewrite_serialized(&mut doc, |s| s.replace("</svg>", "")).unwrap_err();
        assert!(matches!(err, SvgslimError::XmlProcessing(_)));
        // Tree is untouched on failure
        assert_eq!(doc.root.child_elements().count(), 1);
    }
}

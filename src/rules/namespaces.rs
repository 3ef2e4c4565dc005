//! Unused namespace declaration pruning.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::Document;
use crate::dom;

lazy_static! {
    static ref NAMESPACE_DECLARATION: Regex =
        Regex::new(r#"xmlns:([a-zA-Z0-9\-]+)="[^"]+""#).unwrap();
}

/// Count `prefix:name` usages in the serialized document for every declared
/// `xmlns:prefix`; declarations with zero uses are dropped from the root.
///
/// The count runs over the serialized text rather than the tree, so prefixed
/// attributes count as uses just like prefixed elements do.
pub fn remove_unused_namespaces(doc: &mut Document) {
    let content = dom::save_to_string(doc);

    let mut unused = Vec::new();
    for caps in NAMESPACE_DECLARATION.captures_iter(&content) {
        let prefix = &caps[1];
        let usage =
            Regex::new(&format!(r"{}:[a-zA-Z0-9\-]+", regex::escape(prefix))).expect("valid usage pattern");
        if usage.find_iter(&content).count() == 0 {
            unused.push(format!("xmlns:{}", prefix));
        }
    }

    for declaration in unused {
        doc.root.remove_attr(&declaration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{load_from_str, save_to_string};

    #[test]
    fn test_unused_namespace_pruned() {
        let mut doc = load_from_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"><rect/></svg>"#,
        )
        .unwrap();
        remove_unused_namespaces(&mut doc);
        let out = save_to_string(&doc);
        assert!(!out.contains("xmlns:inkscape"));
        assert!(out.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    }

    #[test]
    fn test_namespace_used_by_attribute_kept() {
        let mut doc = load_from_str(
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a"/></svg>"##,
        )
        .unwrap();
        remove_unused_namespaces(&mut doc);
        assert!(save_to_string(&doc).contains("xmlns:xlink"));
    }

    #[test]
    fn test_namespace_used_by_element_kept() {
        let mut doc = load_from_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:ex="http://example.com/ns"><ex:data/></svg>"#,
        )
        .unwrap();
        remove_unused_namespaces(&mut doc);
        assert!(save_to_string(&doc).contains("xmlns:ex"));
    }
}

//! Small subtractive cleanups: comments, metadata elements, empty
//! attributes, redundant enable-background, root sizing attributes,
//! self-closing normalization and attribute ordering.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Document, Element, Node};

lazy_static! {
    // 'new 0 0 W H' with single whitespace separators, exponents allowed.
    static ref ENABLE_BACKGROUND: Regex = Regex::new(
        r"^new\s0\s0\s([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)$"
    )
    .unwrap();
}

/// Delete comment nodes everywhere, preserving legal/license comments
/// (those starting with `!`).
pub fn remove_comments(doc: &mut Document) {
    fn keep(node: &Node) -> bool {
        match node {
            Node::Comment(text) => text.starts_with('!'),
            _ => true,
        }
    }

    doc.prolog.retain(keep);
    doc.epilog.retain(keep);

    fn visit(elem: &mut Element) {
        elem.children.retain(keep);
        for child in elem.child_elements_mut() {
            visit(child);
        }
    }
    visit(&mut doc.root);
}

/// Delete all `<metadata>` elements.
pub fn remove_metadata(doc: &mut Document) {
    doc.retain_elements(|e| !e.is("metadata"));
}

/// Delete all `<title>` and `<desc>` elements.
pub fn remove_title_and_desc(doc: &mut Document) {
    doc.retain_elements(|e| !e.is("title") && !e.is("desc"));
}

/// Remove attributes whose value is empty or whitespace-only.
pub fn remove_empty_attributes(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        elem.attributes
            .retain(|attr| !attr.value.chars().all(char::is_whitespace));
    });
}

/// Remove `enable-background="new 0 0 W H"` when W and H are string-equal
/// to the element's own width/height; any other value is left alone.
pub fn remove_enable_background_attribute(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        let Some(value) = elem.get_attr("enable-background") else {
            return;
        };

        let redundant = match ENABLE_BACKGROUND.captures(value) {
            Some(caps) => {
                let width = elem.get_attr("width").unwrap_or("");
                let height = elem.get_attr("height").unwrap_or("");
                &caps[1] == width && &caps[2] == height
            }
            None => false,
        };

        if redundant {
            elem.remove_attr("enable-background");
        }
    });
}

/// Strip `width`/`height` from the root `<svg>` element only.
pub fn remove_width_height_attributes(doc: &mut Document) {
    let root = &mut doc.root;
    if root.name.full_name().to_lowercase().contains("svg") {
        root.attributes
            .retain(|a| !matches!(a.name.full_name().to_lowercase().as_str(), "width" | "height"));
    }
}

/// Clear whitespace-only content so childless elements serialize in
/// self-closing form.
pub fn convert_empty_tags_to_self_closing(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        let only_blank_text = !elem.children.is_empty()
            && elem.children.iter().all(|node| {
                matches!(node, Node::Text(t) if t.chars().all(char::is_whitespace))
            });
        if only_blank_text {
            elem.children.clear();
        }
    });
}

/// Reorder each element's attributes canonically: namespace declarations
/// first, then alphabetical by qualified name. Deterministic output aids
/// diffing and compression.
pub fn sort_attributes(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        elem.attributes.sort_by(|a, b| {
            let a_xmlns = a.name.is_xmlns();
            let b_xmlns = b.name.is_xmlns();
            match (a_xmlns, b_xmlns) {
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                _ => a.name.full_name().cmp(&b.name.full_name()),
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{load_from_str, save_to_string};

    fn run(svg: &str, rule: fn(&mut Document)) -> String {
        let mut doc = load_from_str(svg).unwrap();
        rule(&mut doc);
        save_to_string(&doc)
    }

    #[test]
    fn test_comments_removed_license_kept() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><!-- gone --><!--! (c) 2024 Author --><rect/></svg>"#,
            remove_comments,
        );
        assert!(!out.contains("gone"));
        assert!(out.contains("(c) 2024 Author"));
    }

    #[test]
    fn test_metadata_and_title_desc_removed() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><metadata>m</metadata><title>t</title><desc>d</desc><rect/></svg>"#;
        let mut doc = load_from_str(svg).unwrap();
        remove_metadata(&mut doc);
        remove_title_and_desc(&mut doc);
        let out = save_to_string(&doc);
        assert!(!out.contains("<metadata"));
        assert!(!out.contains("<title"));
        assert!(!out.contains("<desc"));
        assert!(out.contains("<rect"));
    }

    #[test]
    fn test_empty_attributes_removed() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect class="" id="  " fill="red"/></svg>"#,
            remove_empty_attributes,
        );
        assert!(!out.contains("class"));
        assert!(!out.contains("id"));
        assert!(out.contains(r#"fill="red""#));
    }

    #[test]
    fn test_enable_background_removed_on_exact_match() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="150" enable-background="new 0 0 300 150"/>"#,
            remove_enable_background_attribute,
        );
        assert!(!out.contains("enable-background"));
    }

    #[test]
    fn test_enable_background_kept_on_mismatch() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="150" enable-background="new 0 0 300 100"/>"#,
            remove_enable_background_attribute,
        );
        assert!(out.contains(r#"enable-background="new 0 0 300 100""#));
    }

    #[test]
    fn test_width_height_stripped_from_root_only() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="5" height="5"/></svg>"#,
            remove_width_height_attributes,
        );
        assert!(!out.contains(r#"<svg xmlns="http://www.w3.org/2000/svg" width"#));
        assert!(out.contains(r#"<rect width="5" height="5"/>"#));
    }

    #[test]
    fn test_blank_content_becomes_self_closing() {
        let out = run(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><rect>   \n</rect></svg>",
            convert_empty_tags_to_self_closing,
        );
        assert!(out.contains("<rect/>"));
    }

    #[test]
    fn test_attributes_sorted_xmlns_first() {
        let out = run(
            r#"<svg width="1" xmlns="http://www.w3.org/2000/svg" fill="red" class="c"/>"#,
            sort_attributes,
        );
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="c" fill="red" width="1"/>"#
        );
    }
}

//! Unused mask and empty defs removal.

use crate::ast::Document;

/// Remove `<mask>` elements without an id or whose id is never referenced
/// by a `mask="...url(#id)..."` attribute, then sweep away `<defs>` left
/// without element children.
pub fn remove_unused_masks(doc: &mut Document) {
    let mut references = Vec::new();
    doc.for_each_element(|elem| {
        if let Some(value) = elem.get_attr("mask") {
            references.push(value.to_string());
        }
    });

    doc.retain_elements(|elem| {
        if !elem.is("mask") {
            return true;
        }
        match elem.get_attr("id") {
            Some(id) if !id.is_empty() => {
                let needle = format!("url(#{})", id);
                references.iter().any(|r| r.contains(&needle))
            }
            _ => false,
        }
    });

    doc.retain_elements(|elem| !(elem.is("defs") && elem.child_elements().next().is_none()));
}

//! Inkscape/Sodipodi footprint removal.

use crate::ast::Document;

const EDITOR_PREFIXES: [&str; 2] = ["sodipodi", "inkscape"];

/// Remove sodipodi:*/inkscape:* elements, attributes and xmlns
/// declarations. Runs the sweep twice to catch elements exposed by the
/// first pass (nested editor containers).
pub fn remove_inkscape_footprints(doc: &mut Document) {
    for _ in 0..2 {
        doc.for_each_element_mut(|elem| {
            elem.attributes.retain(|attr| {
                let is_editor_declaration = attr.name.prefix.as_deref() == Some("xmlns")
                    && EDITOR_PREFIXES.contains(&attr.name.local.as_str());
                let is_editor_attribute = attr
                    .name
                    .prefix
                    .as_deref()
                    .is_some_and(|p| EDITOR_PREFIXES.contains(&p));
                !is_editor_declaration && !is_editor_attribute
            });
        });

        doc.retain_elements(|elem| {
            !elem
                .name
                .prefix
                .as_deref()
                .is_some_and(|p| EDITOR_PREFIXES.contains(&p))
        });
    }
}

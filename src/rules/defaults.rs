//! Removal of attributes that restate SVG spec defaults, and of deprecated
//! legacy attributes.

use crate::ast::Document;

/// `(element, attribute, default value)` — an attribute equal to its default
/// is dead weight. `"*"` matches any element. Extend by appending.
const DEFAULT_ATTRIBUTES: &[(&str, &str, &str)] = &[
    // Document defaults
    ("*", "version", "1.1"),
    ("*", "baseProfile", "full"),
    ("*", "preserveAspectRatio", "xMidYMid meet"),
    // Presentation attribute defaults
    ("*", "fill-opacity", "1"),
    ("*", "stroke-opacity", "1"),
    ("*", "opacity", "1"),
    ("*", "stroke-width", "1"),
    ("*", "stroke-linecap", "butt"),
    ("*", "stroke-linejoin", "miter"),
    ("*", "stroke-miterlimit", "4"),
    ("*", "stroke-dasharray", "none"),
    ("*", "stroke-dashoffset", "0"),
    ("*", "fill-rule", "nonzero"),
    ("*", "clip-rule", "nonzero"),
    ("*", "font-style", "normal"),
    ("*", "font-weight", "normal"),
    ("*", "font-weight", "400"),
    ("*", "text-anchor", "start"),
    ("*", "dominant-baseline", "auto"),
    ("*", "visibility", "visible"),
    ("*", "display", "inline"),
    ("*", "overflow", "visible"),
    // Per-element geometry defaults
    ("rect", "rx", "0"),
    ("rect", "ry", "0"),
    ("rect", "x", "0"),
    ("rect", "y", "0"),
    ("circle", "cx", "0"),
    ("circle", "cy", "0"),
    ("ellipse", "cx", "0"),
    ("ellipse", "cy", "0"),
    ("line", "x1", "0"),
    ("line", "y1", "0"),
    ("line", "x2", "0"),
    ("line", "y2", "0"),
];

/// Deprecated/legacy attribute names with no rendering effect in current
/// SVG. Extend by appending.
const DEPRECATED_ATTRIBUTES: &[&str] = &[
    "requiredFeatures",
    "baseProfile",
    "contentScriptType",
    "contentStyleType",
    "zoomAndPan",
    "xml:space",
];

/// Remove attributes whose value equals their SVG spec default.
pub fn remove_default_attributes(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        let element_name = elem.name.full_name();
        elem.attributes.retain(|attr| {
            let name = attr.name.full_name();
            !DEFAULT_ATTRIBUTES.iter().any(|(e, a, v)| {
                (*e == "*" || *e == element_name) && *a == name && *v == attr.value
            })
        });
    });
}

/// Remove deprecated attribute names regardless of value.
pub fn remove_deprecated_attributes(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        elem.attributes
            .retain(|attr| !DEPRECATED_ATTRIBUTES.contains(&attr.name.full_name().as_str()));
    });
}

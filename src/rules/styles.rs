//! Style conversion rules: CSS classes and inline styles to presentation
//! attributes.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Document, Element, Node};

lazy_static! {
    static ref CLASS_SELECTOR: Regex = Regex::new(r"\.([a-zA-Z0-9_-]+)\s*\{([^}]+)\}").unwrap();
    static ref PROPERTY_NAME: Regex = Regex::new(r"(?i)^[a-z_-][a-z0-9_-]*$").unwrap();
}

/// Properties that render identically as SVG presentation attributes.
/// Declarations outside this list stay in CSS.
pub const SVG_PROPERTIES: [&str; 44] = [
    // Painting & coloring
    "fill",
    "fill-opacity",
    "fill-rule",
    "stroke",
    "stroke-opacity",
    "stroke-width",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-dasharray",
    "stroke-dashoffset",
    // Opacity & visibility
    "opacity",
    "visibility",
    // Markers
    "marker-start",
    "marker-mid",
    "marker-end",
    // Filters / masking / clipping
    "mask",
    "clip-path",
    "clip-rule",
    "filter",
    // Rendering hints & effects
    "shape-rendering",
    "vector-effect",
    "color-interpolation",
    "color-interpolation-filters",
    "color-rendering",
    "image-rendering",
    "pointer-events",
    "text-rendering",
    // Gradients / stops
    "stop-color",
    "stop-opacity",
    // Text properties supported as presentation attributes
    "text-anchor",
    "alignment-baseline",
    "dominant-baseline",
    "letter-spacing",
    "word-spacing",
    "kerning",
    // Additional presentation / alignment properties
    "cursor",
    "direction",
    "display",
    "overflow",
    "unicode-bidi",
    "writing-mode",
    "baseline-shift",
    "paint-order",
];

/// A `.class { ... }` rule lifted out of a `<style>` block.
struct ClassRule {
    class: String,
    convertible: Vec<(String, String)>,
    non_convertible: Vec<(String, String)>,
}

/// Convert class-based CSS rules in `<style>` blocks to presentation
/// attributes on the elements carrying the class. Rules that convert fully
/// lose the class token; partially convertible rules keep class and CSS.
pub fn convert_css_classes_to_attributes(doc: &mut Document) {
    // Snapshot the style blocks, then mutate the tree in separate passes;
    // the class-rule application touches arbitrary elements.
    let css_blocks = collect_style_texts(&doc.root);

    let mut rewritten = Vec::with_capacity(css_blocks.len());
    for css in &css_blocks {
        let (rules, remaining) = split_css(css);

        for rule in &rules {
            if rule.convertible.is_empty() {
                continue;
            }
            apply_class_rule(&mut doc.root, rule);
        }

        rewritten.push(remaining);
    }

    rewrite_style_elements(&mut doc.root, &mut rewritten.into_iter());
}

fn collect_style_texts(elem: &Element) -> Vec<String> {
    let mut texts = Vec::new();
    fn visit(elem: &Element, texts: &mut Vec<String>) {
        if elem.is("style") {
            texts.push(elem.text_content());
        }
        for child in elem.child_elements() {
            visit(child, texts);
        }
    }
    visit(elem, &mut texts);
    texts
}

/// Split a CSS text into class rules and the CSS to keep. The kept CSS is
/// rebuilt from the declarations no rule could convert.
fn split_css(css: &str) -> (Vec<ClassRule>, String) {
    let mut rules = Vec::new();
    let mut remaining = String::new();

    for caps in CLASS_SELECTOR.captures_iter(css) {
        let class = caps[1].trim().to_string();
        let declarations = caps[2].trim().to_string();

        let mut convertible = Vec::new();
        let mut non_convertible = Vec::new();
        for decl in declarations.split(';') {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let prop = prop.trim().to_lowercase();
            let value = value.trim().to_string();
            if SVG_PROPERTIES.contains(&prop.as_str()) {
                convertible.push((prop, value));
            } else {
                non_convertible.push((prop, value));
            }
        }

        if !non_convertible.is_empty() {
            remaining.push_str(&rebuild_css_rule(&class, &non_convertible));
        }

        rules.push(ClassRule {
            class,
            convertible,
            non_convertible,
        });
    }

    (rules, remaining)
}

fn rebuild_css_rule(class: &str, declarations: &[(String, String)]) -> String {
    let props: Vec<String> = declarations
        .iter()
        .map(|(p, v)| format!("{}:{}", p, v))
        .collect();
    format!(".{}{{{}}}", class, props.join(";"))
}

fn apply_class_rule(elem: &mut Element, rule: &ClassRule) {
    let carries_class = elem
        .get_attr("class")
        .is_some_and(|c| c.split_whitespace().any(|token| token == rule.class));

    if carries_class {
        for (prop, value) in &rule.convertible {
            elem.set_attr(prop.clone(), value.clone());
        }
        update_element_class(elem, rule);
    }

    for child in elem.child_elements_mut() {
        apply_class_rule(child, rule);
    }
}

fn update_element_class(elem: &mut Element, rule: &ClassRule) {
    if !rule.non_convertible.is_empty() {
        // The class still matters for the CSS that stays behind.
        elem.set_attr("class", rule.class.clone());
        return;
    }

    let classes: Vec<&str> = elem
        .get_attr("class")
        .unwrap_or("")
        .split_whitespace()
        .filter(|token| *token != rule.class)
        .collect();

    if classes.is_empty() {
        elem.remove_attr("class");
    } else {
        let joined = classes.join(" ");
        elem.set_attr("class", joined);
    }
}

/// Write the leftover CSS back into the style elements, visiting in the
/// same depth-first order the CSS was collected in; a style block with
/// nothing left is removed entirely.
fn rewrite_style_elements(elem: &mut Element, remaining: &mut impl Iterator<Item = String>) {
    let mut i = 0;
    while i < elem.children.len() {
        let is_style = matches!(&elem.children[i], Node::Element(e) if e.is("style"));

        if is_style {
            match remaining.next() {
                Some(css) if !css.is_empty() => {
                    if let Node::Element(style) = &mut elem.children[i] {
                        style.set_text_content(css);
                    }
                    i += 1;
                }
                _ => {
                    elem.children.remove(i);
                }
            }
        } else {
            if let Node::Element(child) = &mut elem.children[i] {
                rewrite_style_elements(child, remaining);
            }
            i += 1;
        }
    }
}

/// Move allow-listed declarations from `style` attributes into real
/// attributes. An existing attribute wins; declarations with malformed
/// property names or outside the allow-list stay in `style`.
pub fn convert_inline_styles_to_attributes(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        let Some(style) = elem.get_attr("style").map(str::trim).map(str::to_string) else {
            return;
        };
        if style.is_empty() || !style.contains(':') {
            return;
        }

        let mut remaining = Vec::new();
        for declaration in style.split(';') {
            if let Some(kept) = process_declaration(declaration, elem) {
                remaining.push(kept);
            }
        }

        if remaining.is_empty() {
            elem.remove_attr("style");
        } else {
            elem.set_attr("style", remaining.join("; "));
        }
    });
}

/// Returns the declaration to keep in `style`, or None if it was converted
/// (or was empty/malformed enough to drop).
fn process_declaration(declaration: &str, elem: &mut Element) -> Option<String> {
    let declaration = declaration.trim();
    if declaration.is_empty() {
        return None;
    }
    let (prop, value) = declaration.split_once(':')?;
    let prop = prop.trim().to_lowercase();
    let value = value.trim();
    if prop.is_empty() || value.is_empty() {
        return None;
    }

    if !PROPERTY_NAME.is_match(&prop) {
        return Some(format!("{}:{}", prop, value));
    }

    if SVG_PROPERTIES.contains(&prop.as_str()) {
        if !elem.has_attr(&prop) {
            elem.set_attr(prop, value);
        }
        return None;
    }

    Some(format!("{}:{}", prop, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{load_from_str, save_to_string};

    fn run_classes(svg: &str) -> String {
        let mut doc = load_from_str(svg).unwrap();
        convert_css_classes_to_attributes(&mut doc);
        save_to_string(&doc)
    }

    fn run_inline(svg: &str) -> String {
        let mut doc = load_from_str(svg).unwrap();
        convert_inline_styles_to_attributes(&mut doc);
        save_to_string(&doc)
    }

    #[test]
    fn test_fully_convertible_class_disappears() {
        let out = run_classes(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><style>.a{fill:red;stroke:blue}</style><rect class="a"/></svg>"#,
        );
        assert!(out.contains(r#"fill="red""#));
        assert!(out.contains(r#"stroke="blue""#));
        assert!(!out.contains("class="));
        assert!(!out.contains("<style"));
    }

    #[test]
    fn test_partially_convertible_class_keeps_css() {
        let out = run_classes(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><style>.b{fill:red;animation-name:spin}</style><rect class="b"/></svg>"#,
        );
        assert!(out.contains(r#"fill="red""#));
        assert!(out.contains(r#"class="b""#));
        assert!(out.contains(".b{animation-name:spin}"));
    }

    #[test]
    fn test_other_class_tokens_survive() {
        let out = run_classes(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><style>.a{fill:red}</style><rect class="a keep"/></svg>"#,
        );
        assert!(out.contains(r#"class="keep""#));
    }

    #[test]
    fn test_inline_style_moves_to_attributes() {
        let out = run_inline(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect style="fill:red;stroke-width:2"/></svg>"#,
        );
        assert!(out.contains(r#"fill="red""#));
        assert!(out.contains(r#"stroke-width="2""#));
        assert!(!out.contains("style="));
    }

    #[test]
    fn test_existing_attribute_wins() {
        let out = run_inline(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="blue" style="fill:red"/></svg>"#,
        );
        assert!(out.contains(r#"fill="blue""#));
        assert!(!out.contains(r#"fill="red""#));
    }

    #[test]
    fn test_non_presentation_property_stays() {
        let out = run_inline(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect style="fill:red;--custom-var:3"/></svg>"#,
        );
        assert!(out.contains(r#"fill="red""#));
        assert!(out.contains("--custom-var:3"));
    }
}

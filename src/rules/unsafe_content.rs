//! Unsafe content stripping (opt-in).
//!
//! Removes scriptable elements, event handlers, dangerous link targets and
//! style payloads that could execute or exfiltrate when an untrusted SVG is
//! inlined into a page.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Document, Element, Node};

/// Removed unconditionally wherever they appear.
const ALWAYS_REMOVE_TAGS: [&str; 5] = ["script", "foreignObject", "iframe", "object", "embed"];

/// Removed only when their link target is dangerous.
const CONDITIONAL_TAGS: [&str; 4] = ["image", "use", "link", "tref"];

/// Attributes that may carry a url(...) reference to an external resource.
const URL_ATTRIBUTES: [&str; 14] = [
    "fill",
    "stroke",
    "filter",
    "clip-path",
    "mask",
    "marker-start",
    "marker-mid",
    "marker-end",
    "begin",
    "end",
    "from",
    "to",
    "values",
    "style",
];

lazy_static! {
    static ref DANGEROUS_PROTOCOLS: Regex =
        Regex::new(r"(?i)^(?:javascript|data|file|http|https|//)").unwrap();
    static ref URI_PROTOCOL: Regex = Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*:").unwrap();
    static ref URL_PROTOCOL_OR_RELATIVE: Regex =
        Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*:|//)").unwrap();
    static ref URL_FUNCTION: Regex = Regex::new(r"(?i)url\(\s*([^)]*)\)").unwrap();
    static ref STYLE_DANGEROUS: Regex =
        Regex::new(r"(?i)@import|expression|url\(\s*javascript:").unwrap();
    static ref STYLE_NODE_DANGEROUS: Regex =
        Regex::new(r"(?i)@import\s+url\(|<\s*(?:script|iframe|object|textarea|embed|link|svg)")
            .unwrap();
}

/// Strip everything that could execute, load or leak.
pub fn remove_unsafe_elements(doc: &mut Document) {
    remove_stylesheet_instructions(doc);

    doc.retain_elements(|elem| {
        let name = elem.name.full_name();
        if ALWAYS_REMOVE_TAGS.contains(&name.as_str()) {
            return false;
        }
        if CONDITIONAL_TAGS.contains(&name.as_str()) && has_dangerous_target(elem) {
            return false;
        }
        true
    });

    doc.for_each_element_mut(|elem| {
        elem.attributes.retain(|attr| {
            !is_dangerous_attribute(&attr.name.full_name(), attr.value.trim())
        });
    });

    remove_dangerous_style_elements(doc);
}

/// xml-stylesheet processing instructions can pull in arbitrary CSS.
fn remove_stylesheet_instructions(doc: &mut Document) {
    let keep = |node: &Node| {
        !matches!(
            node,
            Node::ProcessingInstruction { target, .. }
                if target.to_lowercase().contains("xml-stylesheet")
        )
    };
    doc.prolog.retain(keep);
    doc.epilog.retain(keep);
}

/// First dangerous href wins: check `href`, then `xlink:href`.
fn has_dangerous_target(elem: &Element) -> bool {
    for attr in ["href", "xlink:href"] {
        if let Some(value) = elem.get_attr(attr) {
            if DANGEROUS_PROTOCOLS.is_match(value) {
                return true;
            }
        }
    }
    false
}

fn is_dangerous_attribute(name: &str, value: &str) -> bool {
    let name = name.to_lowercase();

    // Event handlers
    if name.starts_with("on") {
        return true;
    }

    // Links with dangerous protocols
    if (name == "href" || name == "xlink:href") && DANGEROUS_PROTOCOLS.is_match(value) {
        return true;
    }

    // url(...) references to absolute or protocol-relative targets
    if URL_ATTRIBUTES.contains(&name.as_str()) {
        if let Some(target) = extract_url_target(value) {
            if URL_PROTOCOL_OR_RELATIVE.is_match(&target) {
                return true;
            }
        }
    }

    // Style payloads that can import or execute
    if name == "style" && STYLE_DANGEROUS.is_match(value) {
        return true;
    }

    // src with any URI scheme at all
    name == "src" && URI_PROTOCOL.is_match(value)
}

/// The target inside the first url(...) of a value, unquoted and trimmed.
fn extract_url_target(value: &str) -> Option<String> {
    let caps = URL_FUNCTION.captures(value)?;
    let inner = caps[1].trim();
    let inner = inner
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(inner);
    Some(inner.trim().to_string())
}

/// Drop `<style>` blocks whose CSS imports external resources or smuggles
/// markup.
fn remove_dangerous_style_elements(doc: &mut Document) {
    doc.retain_elements(|elem| {
        !(elem.is("style") && STYLE_NODE_DANGEROUS.is_match(&elem.text_content()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{load_from_str, save_to_string};

    fn run(svg: &str) -> String {
        let mut doc = load_from_str(svg).unwrap();
        remove_unsafe_elements(&mut doc);
        save_to_string(&doc)
    }

    #[test]
    fn test_script_always_removed() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script><rect/></svg>"#,
        );
        assert!(!out.contains("script"));
        assert!(!out.contains("alert"));
        assert!(out.contains("<rect/>"));
    }

    #[test]
    fn test_foreign_object_removed() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject><div>x</div></foreignObject></svg>"#,
        );
        assert!(!out.contains("foreignObject"));
    }

    #[test]
    fn test_javascript_image_removed_relative_kept() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><image href="javascript:alert(1)"/><image href="icon.png"/></svg>"#,
        );
        assert!(!out.contains("javascript"));
        assert!(out.contains(r#"<image href="icon.png"/>"#));
    }

    #[test]
    fn test_xlink_href_also_checked() {
        let out = run(
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="data:text/html,x"/><use xlink:href="#local"/></svg>"##,
        );
        assert!(!out.contains("data:"));
        assert!(out.contains(r##"xlink:href="#local""##));
    }

    #[test]
    fn test_event_handlers_stripped() {
        let out = run(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect onclick="evil()" fill="red"/></svg>"#);
        assert!(!out.contains("onclick"));
        assert!(out.contains(r#"fill="red""#));
    }

    #[test]
    fn test_absolute_url_reference_stripped_local_kept() {
        let out = run(
            r##"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="url(https://evil.example/x)"/><circle fill="url(#grad)"/></svg>"##,
        );
        assert!(!out.contains("evil.example"));
        assert!(out.contains(r##"fill="url(#grad)""##));
    }

    #[test]
    fn test_dangerous_inline_style_stripped() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect style="background:url(javascript:alert(1))"/><circle style="fill:red"/></svg>"#,
        );
        assert!(!out.contains("javascript"));
        assert!(out.contains(r#"style="fill:red""#));
    }

    #[test]
    fn test_importing_style_block_removed() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><style>@import url(http://evil.example/a.css);</style><rect/></svg>"#,
        );
        assert!(!out.contains("@import"));
    }

    #[test]
    fn test_stylesheet_instruction_removed() {
        let out = run(
            r#"<?xml-stylesheet href="a.css" type="text/css"?><svg xmlns="http://www.w3.org/2000/svg"/>"#,
        );
        assert!(!out.contains("xml-stylesheet"));
    }

    #[test]
    fn test_src_with_scheme_removed() {
        let out = run(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect src="https://evil.example/x"/></svg>"#);
        assert!(!out.contains("src="));
    }
}

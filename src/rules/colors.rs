//! Color canonicalization: rgb() to hex, hex to lowercase.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::Document;

lazy_static! {
    static ref RGB_COLOR: Regex =
        Regex::new(r"^rgb\s*\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").unwrap();
    static ref HEX_COLOR: Regex = Regex::new(r"^#([a-fA-F0-9]{3,6})$").unwrap();
}

/// Attributes that carry a direct color value.
const COLOR_ATTRIBUTES: [&str; 9] = [
    "fill",
    "stroke",
    "color",
    "stop-color",
    "flood-color",
    "lighting-color",
    "solid-color",
    "background-color",
    "border-color",
];

/// Convert rgb(r, g, b) colors to hex (shortened to #rgb when each channel
/// pair is equal) and lowercase existing hex values, in both direct color
/// attributes and `style` declarations. Anything else is left alone.
pub fn convert_colors_to_hex(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        if let Some(style) = elem.get_attr("style").map(str::to_string) {
            let rewritten = convert_style_colors(&style);
            if rewritten != style {
                elem.set_attr("style", rewritten);
            }
        }

        for attr in &mut elem.attributes {
            if attr.name.prefix.is_none()
                && COLOR_ATTRIBUTES.contains(&attr.name.local.as_str())
            {
                let trimmed = attr.value.trim();
                let converted = convert_color(trimmed);
                if converted != trimmed {
                    attr.value = converted;
                }
            }
        }
    });
}

fn convert_color(value: &str) -> String {
    if let Some(hex) = rgb_to_hex(value) {
        return hex;
    }
    if HEX_COLOR.is_match(value) {
        return value.to_lowercase();
    }
    value.to_string()
}

/// rgb(r, g, b) to #rrggbb, or #rgb when shortenable. Returns None for
/// non-RGB values and for out-of-range channels (which are kept verbatim).
fn rgb_to_hex(value: &str) -> Option<String> {
    let caps = RGB_COLOR.captures(value)?;
    let r: u32 = caps[1].parse().ok()?;
    let g: u32 = caps[2].parse().ok()?;
    let b: u32 = caps[3].parse().ok()?;
    if r > 255 || g > 255 || b > 255 {
        return None;
    }

    let can_shorten = r >> 4 == r & 0xf && g >> 4 == g & 0xf && b >> 4 == b & 0xf;
    if can_shorten {
        Some(format!("#{:x}{:x}{:x}", r & 0xf, g & 0xf, b & 0xf))
    } else {
        Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
    }
}

/// Rewrite color properties inside a style declaration list.
fn convert_style_colors(style: &str) -> String {
    let mut parts = Vec::new();

    for decl in style.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }

        match decl.split_once(':') {
            Some((prop, value)) => {
                let prop = prop.trim();
                let value = value.trim();
                if COLOR_ATTRIBUTES.contains(&prop.to_lowercase().as_str()) {
                    parts.push(format!("{}:{}", prop, convert_color(value).to_lowercase()));
                } else {
                    parts.push(format!("{}:{}", prop, value));
                }
            }
            None => parts.push(decl.to_string()),
        }
    }

    parts.join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{load_from_str, save_to_string};

    fn run(svg: &str) -> String {
        let mut doc = load_from_str(svg).unwrap();
        convert_colors_to_hex(&mut doc);
        save_to_string(&doc)
    }

    #[test]
    fn test_rgb_to_short_hex() {
        let out = run(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="rgb(255, 0, 0)"/></svg>"#);
        assert!(out.contains(r##"fill="#f00""##));
    }

    #[test]
    fn test_rgb_to_long_hex_when_pairs_differ() {
        let out = run(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="rgb(18, 52, 86)"/></svg>"#);
        assert!(out.contains(r##"fill="#123456""##));
    }

    #[test]
    fn test_existing_hex_is_lowercased() {
        let out = run(r##"<svg xmlns="http://www.w3.org/2000/svg"><rect stroke="#AABBCC"/></svg>"##);
        assert!(out.contains(r##"stroke="#aabbcc""##));
    }

    #[test]
    fn test_non_color_values_untouched() {
        let out = run(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="url(#grad)" stroke="currentColor"/></svg>"#);
        assert!(out.contains(r##"fill="url(#grad)""##));
        assert!(out.contains(r#"stroke="currentColor""#));
    }

    #[test]
    fn test_out_of_range_rgb_untouched() {
        let out = run(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="rgb(300, 0, 0)"/></svg>"#);
        assert!(out.contains(r#"fill="rgb(300, 0, 0)""#));
    }

    #[test]
    fn test_style_declarations_converted() {
        let out = run(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect style="fill: rgb(255, 255, 255); stroke-width: 2"/></svg>"#);
        assert!(out.contains(r##"style="fill:#fff;stroke-width:2""##));
    }
}

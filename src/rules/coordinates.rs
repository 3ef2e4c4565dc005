//! Coordinate minification: number formatting noise in path data and
//! geometry attributes.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::ast::{Document, Element};

lazy_static! {
    // Decimal numbers inside path data / point lists / plain attributes.
    static ref NUMBER: Regex = Regex::new(r"[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+").unwrap();
}

/// Geometry attributes eligible for coordinate minification.
const GEOMETRY_ATTRIBUTES: [&str; 15] = [
    "x", "x1", "x2", "y", "y1", "y2", "width", "height", "cx", "cy", "rx", "ry", "r", "points",
    "d",
];

/// Elements whose geometry attributes are minified.
const GEOMETRY_ELEMENTS: [&str; 6] = ["rect", "circle", "ellipse", "line", "polyline", "polygon"];

/// Strip insignificant trailing zeros, redundant decimal points and leading
/// zeros from `path` data and the numeric geometry attributes of shape
/// elements.
pub fn minify_svg_coordinates(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        if elem.is("path") {
            minify_attr(elem, "d");
        }

        if GEOMETRY_ELEMENTS.contains(&elem.name.full_name().as_str()) {
            for name in GEOMETRY_ATTRIBUTES {
                minify_attr(elem, name);
            }
        }
    });
}

fn minify_attr(elem: &mut Element, name: &str) {
    if let Some(value) = elem.get_attr(name).map(str::to_string) {
        let minified = minify_coordinates(&value);
        if minified != value {
            elem.set_attr(name, minified);
        }
    }
}

/// Rewrite every number inside a value. Numbers are delimited by whatever
/// is not part of a number, so path data and point lists work unchanged.
fn minify_coordinates(value: &str) -> String {
    NUMBER
        .replace_all(value, |caps: &Captures| minify_number(&caps[0]))
        .into_owned()
}

fn minify_number(num: &str) -> String {
    let (int_part, frac_part) = match num.split_once('.') {
        Some((i, f)) => (i, f),
        None => (num, ""),
    };
    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');

    match (int_part.is_empty(), frac_part.is_empty()) {
        (true, true) => "0".to_string(),
        (false, true) => int_part.to_string(),
        (true, false) => format!(".{}", frac_part),
        (false, false) => format!("{}.{}", int_part, frac_part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_zeroes() {
        assert_eq!(minify_coordinates("10.00"), "10");
        assert_eq!(minify_coordinates("1.50"), "1.5");
        assert_eq!(minify_coordinates("0.0"), "0");
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(minify_coordinates("0.5"), ".5");
        assert_eq!(minify_coordinates("01.50"), "1.5");
        assert_eq!(minify_coordinates("007"), "7");
    }

    #[test]
    fn test_inner_zeros_untouched() {
        assert_eq!(minify_coordinates("1.05"), "1.05");
        assert_eq!(minify_coordinates("105"), "105");
        assert_eq!(minify_coordinates("10"), "10");
    }

    #[test]
    fn test_path_data() {
        assert_eq!(
            minify_coordinates("M 10.00 0.50 L 3.0,4.250 Z"),
            "M 10 .5 L 3,4.25 Z"
        );
    }

    #[test]
    fn test_points_list() {
        assert_eq!(minify_coordinates("0.0,1.50 2.00,3.5"), "0,1.5 2,3.5");
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(minify_coordinates("-0.50"), "-.5");
        assert_eq!(minify_coordinates("-10.00"), "-10");
    }

    #[test]
    fn test_rule_touches_geometry_attributes() {
        use crate::dom::{load_from_str, save_to_string};
        let mut doc = load_from_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="01.50" y="0.0" width="10.00" height="10"/><text x="1.00">t</text></svg>"#,
        )
        .unwrap();
        minify_svg_coordinates(&mut doc);
        let out = save_to_string(&doc);
        assert!(out.contains(r#"x="1.5""#));
        assert!(out.contains(r#"y="0""#));
        assert!(out.contains(r#"width="10""#));
        // text is not a geometry element; its x stays put
        assert!(out.contains(r#"<text x="1.00">"#));
    }
}

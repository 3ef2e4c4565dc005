//! Transform attribute minification.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::ast::Document;

lazy_static! {
    static ref PERCENTAGE: Regex = Regex::new(r"([0-9]+)%").unwrap();
    static ref IDENTITY_TRANSLATE: Regex =
        Regex::new(r"(?i)\btranslate\(\s*0(?:e[+-]?[0-9]+)?\s*(?:,\s*0(?:e[+-]?[0-9]+)?\s*)?\)")
            .unwrap();
    static ref IDENTITY_SCALE: Regex =
        Regex::new(r"(?i)\bscale\(\s*1(?:e[+-]?[0-9]+)?\s*(?:,\s*1(?:e[+-]?[0-9]+)?\s*)?\)")
            .unwrap();
    static ref IDENTITY_ROTATE: Regex = Regex::new(r"\brotate\(\s*0\s*\)").unwrap();
    static ref IDENTITY_SKEW_X: Regex = Regex::new(r"\bskewX\(\s*0\s*\)").unwrap();
    static ref IDENTITY_SKEW_Y: Regex = Regex::new(r"\bskewY\(\s*0\s*\)").unwrap();
    static ref IDENTITY_MATRIX: Regex = Regex::new(
        r"(?i)\bmatrix\(\s*1(?:e[+-]?[0-9]+)?\s+0(?:e[+-]?[0-9]+)?\s+0(?:e[+-]?[0-9]+)?\s+1(?:e[+-]?[0-9]+)?\s+0(?:e[+-]?[0-9]+)?\s+0(?:e[+-]?[0-9]+)?\s*\)"
    )
    .unwrap();
    static ref MULTIPLE_SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref REDUNDANT_COMMAS: Regex = Regex::new(r"\s*,\s*").unwrap();
    static ref EMPTY_TRANSFORM: Regex = Regex::new(r"^[;, ]*$").unwrap();
}

/// Minify every `transform` attribute: convert percentages to decimals,
/// strip identity transforms, collapse whitespace and commas, and drop the
/// attribute entirely once nothing meaningful remains.
pub fn minify_transformations(doc: &mut Document) {
    doc.for_each_element_mut(|elem| {
        let Some(transform) = elem.get_attr("transform").map(str::to_string) else {
            return;
        };

        let minified = minify_transform(&transform);
        if is_empty_transform(&minified) {
            elem.remove_attr("transform");
        } else if minified != transform {
            elem.set_attr("transform", minified);
        }
    });
}

fn minify_transform(transform: &str) -> String {
    let converted = PERCENTAGE.replace_all(transform, |caps: &Captures| {
        let value: f64 = caps[1].parse().unwrap_or(0.0);
        format_decimal(value / 100.0)
    });

    let mut stripped = converted.into_owned();
    for identity in [
        &*IDENTITY_TRANSLATE,
        &*IDENTITY_SCALE,
        &*IDENTITY_ROTATE,
        &*IDENTITY_SKEW_X,
        &*IDENTITY_SKEW_Y,
        &*IDENTITY_MATRIX,
    ] {
        stripped = identity.replace_all(&stripped, "").into_owned();
    }

    let collapsed = MULTIPLE_SPACES.replace_all(&stripped, " ");
    let collapsed = REDUNDANT_COMMAS.replace_all(&collapsed, ",");
    collapsed.trim().to_string()
}

fn is_empty_transform(transform: &str) -> bool {
    transform.is_empty() || transform == "0" || EMPTY_TRANSFORM.is_match(transform)
}

/// Format a float without trailing noise: integral values print as
/// integers, everything else through ryu.
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let mut buffer = ryu::Buffer::new();
        buffer.format(value).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{load_from_str, save_to_string};

    fn run(svg: &str) -> String {
        let mut doc = load_from_str(svg).unwrap();
        minify_transformations(&mut doc);
        save_to_string(&doc)
    }

    #[test]
    fn test_identity_transforms_removed_entirely() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect transform="translate(0,0) scale(1)"/></svg>"#,
        );
        assert!(!out.contains("transform"));
    }

    #[test]
    fn test_meaningful_transform_survives() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect transform="translate(0) rotate(45)"/></svg>"#,
        );
        assert!(out.contains(r#"transform="rotate(45)""#));
    }

    #[test]
    fn test_percentages_become_decimals() {
        assert_eq!(minify_transform("scale(50%)"), "scale(0.5)");
        assert_eq!(minify_transform("translate(100%)"), "translate(1)");
    }

    #[test]
    fn test_whitespace_and_commas_collapse() {
        assert_eq!(
            minify_transform("translate( 10 ,  20 )  rotate(45)"),
            "translate( 10,20 ) rotate(45)"
        );
    }

    #[test]
    fn test_identity_matrix_removed() {
        let out = run(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g transform="matrix(1 0 0 1 0 0)"><rect/></g></svg>"#,
        );
        assert!(!out.contains("transform"));
    }

    #[test]
    fn test_scale_one_one_removed() {
        assert!(is_empty_transform(&minify_transform("scale(1,1)")));
        assert!(!is_empty_transform(&minify_transform("scale(1,2)")));
    }
}

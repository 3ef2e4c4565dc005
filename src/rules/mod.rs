//! The optimization rules.
//!
//! Each rule is a narrow transformation over the document tree (or, for the
//! raw-content rules, over its serialized form). A rule declares whether the
//! pipeline must verify that it actually shrank the output before keeping
//! its mutation (`should_check_size`). Execution order is fixed: later rules
//! see earlier rules' output, so color conversion runs before attribute
//! sorting and group flattening before coordinate minification.

mod cleanup;
mod colors;
mod coordinates;
mod defaults;
mod groups;
mod inkscape;
mod masks;
mod namespaces;
mod raw;
mod styles;
mod transforms;
mod unsafe_content;

use crate::ast::Document;
use crate::config::RuleConfig;
use crate::error::SvgslimError;

/// A single optimization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ConvertColorsToHex,
    ConvertCssClassesToAttributes,
    ConvertEmptyTagsToSelfClosing,
    ConvertInlineStylesToAttributes,
    FlattenGroups,
    MinifySvgCoordinates,
    MinifyTransformations,
    RemoveComments,
    RemoveDefaultAttributes,
    RemoveDeprecatedAttributes,
    RemoveDoctype,
    RemoveEmptyAttributes,
    RemoveEnableBackgroundAttribute,
    RemoveInkscapeFootprints,
    RemoveInvisibleCharacters,
    RemoveMetadata,
    RemoveTitleAndDesc,
    RemoveUnnecessaryWhitespace,
    RemoveUnsafeElements,
    RemoveUnusedMasks,
    RemoveUnusedNamespaces,
    RemoveWidthHeightAttributes,
    SortAttributes,
}

impl Rule {
    /// Pipeline order. Configuration selects a subset; it never reorders.
    pub const ORDERED: [Rule; 23] = [
        Rule::ConvertColorsToHex,
        Rule::ConvertCssClassesToAttributes,
        Rule::ConvertEmptyTagsToSelfClosing,
        Rule::ConvertInlineStylesToAttributes,
        Rule::FlattenGroups,
        Rule::MinifySvgCoordinates,
        Rule::MinifyTransformations,
        Rule::RemoveComments,
        Rule::RemoveDefaultAttributes,
        Rule::RemoveDeprecatedAttributes,
        Rule::RemoveDoctype,
        Rule::RemoveEmptyAttributes,
        Rule::RemoveEnableBackgroundAttribute,
        Rule::RemoveInkscapeFootprints,
        Rule::RemoveInvisibleCharacters,
        Rule::RemoveMetadata,
        Rule::RemoveTitleAndDesc,
        Rule::RemoveUnnecessaryWhitespace,
        Rule::RemoveUnsafeElements,
        Rule::RemoveUnusedMasks,
        Rule::RemoveUnusedNamespaces,
        Rule::RemoveWidthHeightAttributes,
        Rule::SortAttributes,
    ];

    /// The rule identifier used in JSON configuration files.
    pub fn id(self) -> &'static str {
        match self {
            Rule::ConvertColorsToHex => "convertColorsToHex",
            Rule::ConvertCssClassesToAttributes => "convertCssClassesToAttributes",
            Rule::ConvertEmptyTagsToSelfClosing => "convertEmptyTagsToSelfClosing",
            Rule::ConvertInlineStylesToAttributes => "convertInlineStylesToAttributes",
            Rule::FlattenGroups => "flattenGroups",
            Rule::MinifySvgCoordinates => "minifySvgCoordinates",
            Rule::MinifyTransformations => "minifyTransformations",
            Rule::RemoveComments => "removeComments",
            Rule::RemoveDefaultAttributes => "removeDefaultAttributes",
            Rule::RemoveDeprecatedAttributes => "removeDeprecatedAttributes",
            Rule::RemoveDoctype => "removeDoctype",
            Rule::RemoveEmptyAttributes => "removeEmptyAttributes",
            Rule::RemoveEnableBackgroundAttribute => "removeEnableBackgroundAttribute",
            Rule::RemoveInkscapeFootprints => "removeInkscapeFootprints",
            Rule::RemoveInvisibleCharacters => "removeInvisibleCharacters",
            Rule::RemoveMetadata => "removeMetadata",
            Rule::RemoveTitleAndDesc => "removeTitleAndDesc",
            Rule::RemoveUnnecessaryWhitespace => "removeUnnecessaryWhitespace",
            Rule::RemoveUnsafeElements => "removeUnsafeElements",
            Rule::RemoveUnusedMasks => "removeUnusedMasks",
            Rule::RemoveUnusedNamespaces => "removeUnusedNamespaces",
            Rule::RemoveWidthHeightAttributes => "removeWidthHeightAttributes",
            Rule::SortAttributes => "sortAttributes",
        }
    }

    /// Whether the pipeline must verify this rule shrank the output before
    /// keeping it. Only structural rules that can plausibly grow the
    /// document opt in; subtractive cleanups skip the round trip.
    pub fn should_check_size(self) -> bool {
        matches!(self, Rule::FlattenGroups)
    }

    pub fn is_enabled(self, config: &RuleConfig) -> bool {
        match self {
            Rule::ConvertColorsToHex => config.convert_colors_to_hex,
            Rule::ConvertCssClassesToAttributes => config.convert_css_classes_to_attributes,
            Rule::ConvertEmptyTagsToSelfClosing => config.convert_empty_tags_to_self_closing,
            Rule::ConvertInlineStylesToAttributes => config.convert_inline_styles_to_attributes,
            Rule::FlattenGroups => config.flatten_groups,
            Rule::MinifySvgCoordinates => config.minify_svg_coordinates,
            Rule::MinifyTransformations => config.minify_transformations,
            Rule::RemoveComments => config.remove_comments,
            Rule::RemoveDefaultAttributes => config.remove_default_attributes,
            Rule::RemoveDeprecatedAttributes => config.remove_deprecated_attributes,
            Rule::RemoveDoctype => config.remove_doctype,
            Rule::RemoveEmptyAttributes => config.remove_empty_attributes,
            Rule::RemoveEnableBackgroundAttribute => config.remove_enable_background_attribute,
            Rule::RemoveInkscapeFootprints => config.remove_inkscape_footprints,
            Rule::RemoveInvisibleCharacters => config.remove_invisible_characters,
            Rule::RemoveMetadata => config.remove_metadata,
            Rule::RemoveTitleAndDesc => config.remove_title_and_desc,
            Rule::RemoveUnnecessaryWhitespace => config.remove_unnecessary_whitespace,
            Rule::RemoveUnsafeElements => config.remove_unsafe_elements,
            Rule::RemoveUnusedMasks => config.remove_unused_masks,
            Rule::RemoveUnusedNamespaces => config.remove_unused_namespaces,
            Rule::RemoveWidthHeightAttributes => config.remove_width_height_attributes,
            Rule::SortAttributes => config.sort_attributes,
        }
    }

    /// The rules enabled by `config`, in pipeline order.
    pub fn enabled(config: &RuleConfig) -> Vec<Rule> {
        Self::ORDERED
            .into_iter()
            .filter(|rule| rule.is_enabled(config))
            .collect()
    }

    /// Apply this rule to the document, mutating it in place.
    pub fn apply(self, doc: &mut Document) -> Result<(), SvgslimError> {
        match self {
            Rule::ConvertColorsToHex => colors::convert_colors_to_hex(doc),
            Rule::ConvertCssClassesToAttributes => styles::convert_css_classes_to_attributes(doc),
            Rule::ConvertEmptyTagsToSelfClosing => cleanup::convert_empty_tags_to_self_closing(doc),
            Rule::ConvertInlineStylesToAttributes => {
                styles::convert_inline_styles_to_attributes(doc)
            }
            Rule::FlattenGroups => groups::flatten_groups(doc),
            Rule::MinifySvgCoordinates => coordinates::minify_svg_coordinates(doc),
            Rule::MinifyTransformations => transforms::minify_transformations(doc),
            Rule::RemoveComments => cleanup::remove_comments(doc),
            Rule::RemoveDefaultAttributes => defaults::remove_default_attributes(doc),
            Rule::RemoveDeprecatedAttributes => defaults::remove_deprecated_attributes(doc),
            Rule::RemoveDoctype => return raw::remove_doctype(doc),
            Rule::RemoveEmptyAttributes => cleanup::remove_empty_attributes(doc),
            Rule::RemoveEnableBackgroundAttribute => {
                cleanup::remove_enable_background_attribute(doc)
            }
            Rule::RemoveInkscapeFootprints => inkscape::remove_inkscape_footprints(doc),
            Rule::RemoveInvisibleCharacters => return raw::remove_invisible_characters(doc),
            Rule::RemoveMetadata => cleanup::remove_metadata(doc),
            Rule::RemoveTitleAndDesc => cleanup::remove_title_and_desc(doc),
            Rule::RemoveUnnecessaryWhitespace => return raw::remove_unnecessary_whitespace(doc),
            Rule::RemoveUnsafeElements => unsafe_content::remove_unsafe_elements(doc),
            Rule::RemoveUnusedMasks => masks::remove_unused_masks(doc),
            Rule::RemoveUnusedNamespaces => namespaces::remove_unused_namespaces(doc),
            Rule::RemoveWidthHeightAttributes => cleanup::remove_width_height_attributes(doc),
            Rule::SortAttributes => cleanup::sort_attributes(doc),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_flatten_groups_checks_size() {
        let checked: Vec<_> = Rule::ORDERED
            .into_iter()
            .filter(|r| r.should_check_size())
            .collect();
        assert_eq!(checked, vec![Rule::FlattenGroups]);
    }

    #[test]
    fn test_default_config_disables_three_rules() {
        let config = RuleConfig::default();
        let enabled = Rule::enabled(&config);
        assert_eq!(enabled.len(), Rule::ORDERED.len() - 3);
        assert!(!enabled.contains(&Rule::FlattenGroups));
        assert!(!enabled.contains(&Rule::RemoveUnsafeElements));
        assert!(!enabled.contains(&Rule::RemoveWidthHeightAttributes));
    }

    #[test]
    fn test_enabled_preserves_pipeline_order() {
        let mut config = RuleConfig::default();
        config.flatten_groups = true;
        let enabled = Rule::enabled(&config);
        let colors = enabled
            .iter()
            .position(|r| *r == Rule::ConvertColorsToHex)
            .unwrap();
        let flatten = enabled.iter().position(|r| *r == Rule::FlattenGroups).unwrap();
        let coords = enabled
            .iter()
            .position(|r| *r == Rule::MinifySvgCoordinates)
            .unwrap();
        assert!(colors < flatten && flatten < coords);
    }
}

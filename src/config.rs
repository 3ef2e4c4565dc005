//! Rule configuration.
//!
//! One boolean per rule, overlaid from an optional JSON file. Pipeline
//! ordering is fixed by the rule list (`rules::Rule::ORDERED`); the
//! configuration only selects which rules run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SvgslimError;

/// Which optimization rules are enabled.
///
/// Everything defaults to on except the three structural/destructive rules:
/// `flatten_groups`, `remove_unsafe_elements` and
/// `remove_width_height_attributes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleConfig {
    pub convert_colors_to_hex: bool,
    pub convert_css_classes_to_attributes: bool,
    pub convert_empty_tags_to_self_closing: bool,
    pub convert_inline_styles_to_attributes: bool,
    pub flatten_groups: bool,
    pub minify_svg_coordinates: bool,
    pub minify_transformations: bool,
    pub remove_comments: bool,
    pub remove_default_attributes: bool,
    pub remove_deprecated_attributes: bool,
    pub remove_doctype: bool,
    pub remove_empty_attributes: bool,
    pub remove_enable_background_attribute: bool,
    pub remove_inkscape_footprints: bool,
    pub remove_invisible_characters: bool,
    pub remove_metadata: bool,
    pub remove_title_and_desc: bool,
    pub remove_unnecessary_whitespace: bool,
    pub remove_unsafe_elements: bool,
    pub remove_unused_masks: bool,
    pub remove_unused_namespaces: bool,
    pub remove_width_height_attributes: bool,
    pub sort_attributes: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            convert_colors_to_hex: true,
            convert_css_classes_to_attributes: true,
            convert_empty_tags_to_self_closing: true,
            convert_inline_styles_to_attributes: true,
            flatten_groups: false,
            minify_svg_coordinates: true,
            minify_transformations: true,
            remove_comments: true,
            remove_default_attributes: true,
            remove_deprecated_attributes: true,
            remove_doctype: true,
            remove_empty_attributes: true,
            remove_enable_background_attribute: true,
            remove_inkscape_footprints: true,
            remove_invisible_characters: true,
            remove_metadata: true,
            remove_title_and_desc: true,
            remove_unnecessary_whitespace: true,
            remove_unsafe_elements: false,
            remove_unused_masks: true,
            remove_unused_namespaces: true,
            remove_width_height_attributes: false,
            sort_attributes: true,
        }
    }
}

impl RuleConfig {
    /// Load a configuration from a JSON file, overlaying it on the defaults.
    ///
    /// Unknown keys are ignored; missing keys keep their default. The file
    /// maps rule identifiers to booleans:
    ///
    /// ```json
    /// { "flattenGroups": true, "removeComments": false }
    /// ```
    pub fn from_json_file(path: &Path) -> Result<Self, SvgslimError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SvgslimError::FileNotFound(path.to_path_buf()),
            _ => SvgslimError::Io(e),
        })?;
        Self::from_json(&content)
    }

    /// Parse a JSON configuration overlay.
    pub fn from_json(content: &str) -> Result<Self, SvgslimError> {
        serde_json::from_str(content)
            .map_err(|e| SvgslimError::InvalidArgument(format!("Invalid rule configuration: {}", e)))
    }
}

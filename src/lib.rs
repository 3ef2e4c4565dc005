//! svgslim - a rule-based SVG optimizer
//!
//! svgslim parses SVG markup into a document tree, applies a configurable
//! ordered pipeline of transformation rules, and emits a minimized,
//! semantically equivalent document. Structural rules that can grow the
//! output are guarded by a per-rule size check that rolls their mutation
//! back when it doesn't pay off.

mod ast;
mod config;
pub mod dom;
mod error;
mod format;
mod metadata;
mod optimizer;
mod parse;
mod provider;
mod rules;
mod serialize;
mod validate;

pub use ast::*;
pub use config::RuleConfig;
pub use error::SvgslimError;
pub use format::format_bytes;
pub use metadata::{MetaData, MetaDataAggregator};
pub use optimizer::SvgOptimizer;
pub use parse::parse_svg;
pub use rules::Rule;
pub use serialize::serialize;
pub use validate::is_valid;

/// Optimize an SVG string with the default rule set.
pub fn optimize_default(svg: &str) -> Result<String, SvgslimError> {
    optimize_string(svg, &RuleConfig::default())
}

/// Optimize an SVG string with a custom rule selection and return the
/// optimized markup. This is the whole embedding contract: everything a
/// host application needs is this one call.
pub fn optimize_string(svg: &str, config: &RuleConfig) -> Result<String, SvgslimError> {
    let mut optimizer = SvgOptimizer::from_string(svg);
    optimizer.with_rules(config.clone());
    optimizer.optimize()?;
    Ok(optimizer.content().to_string())
}

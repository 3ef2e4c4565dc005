//! Pipeline orchestration and the public optimizer facade.

use std::path::Path;

use crate::ast::Document;
use crate::config::RuleConfig;
use crate::dom;
use crate::error::SvgslimError;
use crate::metadata::MetaData;
use crate::provider::{save_content, Provider};
use crate::rules::Rule;
use crate::validate;

/// The SVG optimizer: a provider-backed pipeline of transformation rules
/// with a per-rule size-regression safety net.
///
/// ```no_run
/// use svgslim::{RuleConfig, SvgOptimizer};
///
/// # fn main() -> Result<(), svgslim::SvgslimError> {
/// let mut optimizer = SvgOptimizer::from_file("icon.svg")?;
/// optimizer.with_rules(RuleConfig::default());
/// optimizer.optimize()?;
/// optimizer.save_to_file("icon.svg")?;
/// println!("saved {} bytes", optimizer.metadata()?.saved_bytes());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SvgOptimizer {
    provider: Provider,
    config: RuleConfig,
    content: String,
    optimized: bool,
}

impl SvgOptimizer {
    /// Optimize SVG content held in memory.
    pub fn from_string(content: impl Into<String>) -> Self {
        Self::new(Provider::from_string(content))
    }

    /// Optimize an SVG file. Fails immediately if the file is missing or
    /// unreadable.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SvgslimError> {
        Ok(Self::new(Provider::from_file(path.as_ref())?))
    }

    fn new(provider: Provider) -> Self {
        Self {
            provider,
            config: RuleConfig::default(),
            content: String::new(),
            optimized: false,
        }
    }

    /// Select which rules run. Ordering is fixed by the pipeline; the
    /// configuration only enables and disables.
    pub fn with_rules(&mut self, config: RuleConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Run the pipeline. Re-invoking redoes the work from the raw input.
    pub fn optimize(&mut self) -> Result<&mut Self, SvgslimError> {
        let input = self.provider.input_content();

        if !validate::is_valid(input) {
            return Err(SvgslimError::Validation);
        }

        let mut doc = dom::load_from_str(input)?;
        let output = self.apply_rules(&mut doc)?;

        self.content = output;
        self.optimized = true;
        Ok(self)
    }

    /// Apply the enabled rules in pipeline order.
    ///
    /// `baseline` holds the smallest known-good serialization, starting from
    /// the untouched tree. A rule that declares `should_check_size` only
    /// keeps its mutation when the serialized result is strictly smaller
    /// than the baseline; otherwise the tree is reloaded from the baseline
    /// string, undoing that rule alone. Unchecked rules are kept
    /// unconditionally.
    fn apply_rules(&self, doc: &mut Document) -> Result<String, SvgslimError> {
        let mut baseline = self.provider.canonicalize(&dom::save_to_string(doc));

        for rule in Rule::enabled(&self.config) {
            rule.apply(doc)?;

            if rule.should_check_size() {
                let candidate = self.provider.canonicalize(&dom::save_to_string(doc));
                if candidate.len() < baseline.len() {
                    baseline = candidate;
                } else {
                    *doc = dom::load_from_str(&baseline).map_err(|e| {
                        SvgslimError::XmlProcessing(format!(
                            "Failed to reload content: {}",
                            e
                        ))
                    })?;
                }
            }
        }

        Ok(self.provider.canonicalize(&dom::save_to_string(doc)))
    }

    /// The optimized content, or an empty string before `optimize()`.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Byte sizes before and after. Fails before `optimize()` completes.
    pub fn metadata(&self) -> Result<MetaData, SvgslimError> {
        if !self.optimized {
            return Err(SvgslimError::MetadataUnavailable);
        }
        Ok(MetaData::new(
            self.provider.input_content().len() as u64,
            self.content.len() as u64,
        ))
    }

    /// Write the optimized content, creating parent directories as needed.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SvgslimError> {
        save_content(path.as_ref(), &self.content)
    }
}

//! Minifier configuration.

use anyhow::{Context as _, Result};
use css_orchestrator::DEFAULT_MAX_PASSES;
use css_selectors::Compatibility;
use css_writer::WriterOptions;
use serde::Deserialize;

/// Settings for one [`crate::minify()`] call.
///
/// Every field is optional when deserialized; missing ones take the defaults
/// below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Options {
    /// Browser profile that decides which selectors are unsafe to merge.
    pub compatibility: Compatibility,
    /// Run the structural optimizer.
    pub advanced: bool,
    pub beautify: bool,
    pub keep_breaks: bool,
    pub space_after_closing_brace: bool,
    /// Ceiling on optimizer passes per token sequence.
    pub max_passes: usize,
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Self {
            compatibility: Compatibility::All,
            advanced: true,
            beautify: false,
            keep_breaks: false,
            space_after_closing_brace: false,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl Options {
    /// Parse options from a JSON object such as `{"beautify": true}`.
    ///
    /// # Errors
    /// Returns an error if the text is not valid JSON, names an unknown
    /// option, or carries a value of the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid minifier options")
    }

    /// The subset of options the writer reads.
    #[inline]
    pub const fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            beautify: self.beautify,
            keep_breaks: self.keep_breaks,
            space_after_closing_brace: self.space_after_closing_brace,
        }
    }
}

use anyhow::{Context, Result};

use super::Formatter;
use crate::engine::LintResult;

/// Re-emits the engine records as a JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Formatter for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn format(&self, results: &[LintResult]) -> Result<String> {
        serde_json::to_string(results).context("Failed to serialize lint results")
    }
}

//! Lint result data model
//!
//! Mirrors the records the engine emits with `--format json`. Field names
//! follow the engine's camelCase keys, and keys devlint does not read are
//! carried in `extra`, so the records reach the `json` formatter untouched.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine severity for a warning
pub const SEVERITY_WARNING: u8 = 1;

/// Engine severity for an error
pub const SEVERITY_ERROR: u8 = 2;

/// A single diagnostic reported for a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    /// Rule that produced the message; absent for parse errors
    #[serde(default)]
    pub rule_id: Option<String>,

    /// 1 = warning, 2 = error
    pub severity: u8,

    pub message: String,

    #[serde(default)]
    pub line: usize,

    #[serde(default)]
    pub column: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,

    /// Set when the file could not be parsed at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatal: Option<bool>,

    /// Autofix payload, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<serde_json::Value>,

    /// Keys devlint does not read (`nodeType`, `messageId`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LintMessage {
    /// Whether the message counts as an error in summaries
    pub fn is_error(&self) -> bool {
        self.fatal.unwrap_or(false) || self.severity == SEVERITY_ERROR
    }
}

/// All diagnostics for one linted file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub file_path: PathBuf,

    #[serde(default)]
    pub messages: Vec<LintMessage>,

    #[serde(default)]
    pub error_count: usize,

    #[serde(default)]
    pub warning_count: usize,

    #[serde(default)]
    pub fixable_error_count: usize,

    #[serde(default)]
    pub fixable_warning_count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatal_error_count: Option<usize>,

    /// Source text, only present when the engine could not parse the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Keys devlint does not read (`suppressedMessages`, `usedDeprecatedRules`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LintResult {
    /// Create an empty result for a file
    pub fn clean(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            messages: Vec::new(),
            error_count: 0,
            warning_count: 0,
            fixable_error_count: 0,
            fixable_warning_count: 0,
            fatal_error_count: None,
            source: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Total number of problems reported for the file
    pub fn problem_count(&self) -> usize {
        self.error_count + self.warning_count
    }
}

/// What linting one directory produced
#[derive(Debug, Clone, PartialEq)]
pub enum DirOutcome {
    /// The directory does not exist; nothing was linted
    NotFound,
    /// The engine ran and reported no messages
    Clean(Vec<LintResult>),
    /// The engine ran and reported at least one message
    Violations(Vec<LintResult>),
}

impl DirOutcome {
    /// Classify engine output for an existing directory
    pub fn from_results(results: Vec<LintResult>) -> Self {
        if results.iter().all(|r| r.messages.is_empty()) {
            DirOutcome::Clean(results)
        } else {
            DirOutcome::Violations(results)
        }
    }

    /// Results to hand to a formatter, if the directory was linted
    pub fn results(&self) -> Option<&[LintResult]> {
        match self {
            DirOutcome::NotFound => None,
            DirOutcome::Clean(results) | DirOutcome::Violations(results) => Some(results),
        }
    }

    /// Short label used in logs and run reports
    pub fn label(&self) -> &'static str {
        match self {
            DirOutcome::NotFound => "not found",
            DirOutcome::Clean(_) => "clean",
            DirOutcome::Violations(_) => "violations",
        }
    }
}

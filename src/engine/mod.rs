//! Lint engine integration
//!
//! The engine itself is an external program. This module defines the seam the
//! runner talks to (`LintEngine`), the records it returns, and the ESLint
//! process implementation with its executable and shared-config lookup.

use anyhow::Result;
use std::future::Future;
use std::path::{Path, PathBuf};

mod eslint;
pub mod resolve;
mod types;

pub use eslint::{EslintEngine, LinterOptions};
pub use types::{DirOutcome, LintMessage, LintResult, SEVERITY_ERROR, SEVERITY_WARNING};

use crate::config::EngineSettings;

/// Something that can lint a path inside a package
pub trait LintEngine: Send + Sync {
    /// Lint `target` (relative to `root`) and return one result per file
    fn lint_path(
        &self,
        root: &Path,
        target: &Path,
    ) -> impl Future<Output = Result<Vec<LintResult>>> + Send;
}

impl EslintEngine {
    /// Build the engine for a package root from settings.
    ///
    /// Resolves the plugin anchor, the shared rule-set and the executable;
    /// any of them missing is fatal.
    pub fn from_settings(settings: &EngineSettings, root: &Path) -> Result<Self> {
        let anchor = match settings.resolve_plugins_relative_to.as_deref() {
            Some(dir) if !dir.trim().is_empty() => absolutize(Path::new(dir), root),
            _ => resolve::wrapper_location()?,
        };
        tracing::debug!("Plugins resolve relative to {}", anchor.display());

        let base_config = resolve::resolve_shared_config(&settings.base_config, &anchor)?;
        tracing::debug!("Shared configuration: {}", base_config.display());

        let executable = resolve::locate_executable(settings.command.as_deref(), root, &anchor)?;
        tracing::debug!("Engine executable: {}", executable.display());

        Ok(Self::new(
            executable,
            LinterOptions {
                extensions: settings.extensions.clone(),
                base_config,
                use_eslintrc: settings.use_eslintrc,
                resolve_plugins_relative_to: anchor,
            },
        ))
    }
}

fn absolutize(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

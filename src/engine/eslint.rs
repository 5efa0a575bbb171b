use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

use super::types::LintResult;
use super::LintEngine;

/// Options the engine is constructed with
#[derive(Debug, Clone, PartialEq)]
pub struct LinterOptions {
    /// File extensions linted inside a directory, with leading dots
    pub extensions: Vec<String>,
    /// Shared rule-set file used as the base configuration
    pub base_config: PathBuf,
    /// Whether local `.eslintrc.*` files may be discovered
    pub use_eslintrc: bool,
    /// Directory plugins referenced by the base configuration resolve from
    pub resolve_plugins_relative_to: PathBuf,
}

/// Lint engine backed by the `eslint` executable
#[derive(Debug, Clone)]
pub struct EslintEngine {
    executable: PathBuf,
    options: LinterOptions,
}

impl EslintEngine {
    /// Create an engine; nothing is spawned until a path is linted
    pub fn new(executable: impl Into<PathBuf>, options: LinterOptions) -> Self {
        Self {
            executable: executable.into(),
            options,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn options(&self) -> &LinterOptions {
        &self.options
    }

    /// Command-line arguments for linting `target`
    pub fn args(&self, target: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if !self.options.use_eslintrc {
            args.push("--no-eslintrc".into());
        }
        args.push("--config".into());
        args.push(self.options.base_config.clone().into_os_string());
        if !self.options.extensions.is_empty() {
            args.push("--ext".into());
            args.push(self.options.extensions.join(",").into());
        }
        args.push("--resolve-plugins-relative-to".into());
        args.push(self.options.resolve_plugins_relative_to.clone().into_os_string());
        args.push("--format".into());
        args.push("json".into());
        args.push(target.as_os_str().to_os_string());
        args
    }
}

impl LintEngine for EslintEngine {
    async fn lint_path(&self, root: &Path, target: &Path) -> Result<Vec<LintResult>> {
        let args = self.args(target);
        tracing::debug!(
            "Running {} {:?} in {}",
            self.executable.display(),
            args,
            root.display()
        );

        let started = Instant::now();
        let output = Command::new(&self.executable)
            .args(&args)
            .current_dir(root)
            // Newer engines default to flat config, which ignores --no-eslintrc and --ext
            .env("ESLINT_USE_FLAT_CONFIG", "false")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", self.executable.display()))?;

        tracing::debug!(
            "Engine finished for {} in {}ms with {}",
            target.display(),
            started.elapsed().as_millis(),
            output.status
        );

        // 0: no errors, 1: lint errors reported; anything else is an engine failure
        match output.status.code() {
            Some(0) | Some(1) => {}
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stdout = String::from_utf8_lossy(&output.stdout);
                let detail = if stderr.trim().is_empty() {
                    stdout.trim().to_string()
                } else {
                    stderr.trim().to_string()
                };
                bail!(
                    "Linting '{}' failed ({}): {}",
                    target.display(),
                    output.status,
                    detail
                );
            }
        }

        if !output.stderr.is_empty() {
            tracing::warn!(
                "Engine stderr for {}: {}",
                target.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        serde_json::from_slice(&output.stdout).with_context(|| {
            format!(
                "Engine output for '{}' is not valid lint JSON",
                target.display()
            )
        })
    }
}

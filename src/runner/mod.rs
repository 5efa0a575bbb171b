//! The lint run
//!
//! Resolves the package root, lints each configured directory concurrently
//! and prints the formatted results in directory order.

use anyhow::{Context, Result, anyhow};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::{RunSettings, Settings};
use crate::engine::{DirOutcome, EslintEngine, LintEngine};
use crate::formatter::load_formatter;
use crate::package::PackageDescriptor;

/// Outcome of one directory in a run
#[derive(Debug, Clone, PartialEq)]
pub struct DirReport {
    pub directory: String,
    pub outcome: DirOutcome,
}

/// Per-directory outcomes of a completed run, in print order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// The package linted, when the run went through `lint_package`
    pub package: Option<PackageDescriptor>,
    pub directories: Vec<DirReport>,
}

impl RunReport {
    /// Number of directories that were actually linted
    pub fn linted(&self) -> usize {
        self.directories
            .iter()
            .filter(|d| d.outcome != DirOutcome::NotFound)
            .count()
    }

    pub fn outcome(&self, directory: &str) -> Option<&DirOutcome> {
        self.directories
            .iter()
            .find(|d| d.directory == directory)
            .map(|d| &d.outcome)
    }
}

/// Canonical package root: the given directory, or the current one
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let base = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };
    base.canonicalize()
        .with_context(|| format!("Failed to resolve package root {}", base.display()))
}

/// Runs one lint pass over a package's directories
pub struct Wrapper<E> {
    root: PathBuf,
    engine: Arc<E>,
    directories: Vec<String>,
    formatter: String,
}

impl<E: LintEngine + 'static> Wrapper<E> {
    pub fn new(root: PathBuf, engine: E, run: &RunSettings) -> Self {
        Self {
            root,
            engine: Arc::new(engine),
            directories: run.directories.clone(),
            formatter: run.formatter.clone(),
        }
    }

    /// Lint one directory relative to the root
    pub async fn lint_dir(&self, dir: &str) -> Result<DirOutcome> {
        lint_dir_in(self.engine.as_ref(), &self.root, dir).await
    }

    /// Lint every configured directory and print each result.
    ///
    /// The formatter is loaded first. Directories are linted concurrently but
    /// printed in configured order, each as soon as it and the ones before it
    /// are done. The first failure aborts the remaining passes, and they are
    /// torn down before the error is returned.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunReport> {
        let formatter = load_formatter(&self.formatter).await?;

        let tasks: Vec<(String, JoinHandle<Result<DirOutcome>>)> = self
            .directories
            .iter()
            .map(|dir| {
                let engine = Arc::clone(&self.engine);
                let root = self.root.clone();
                let task_dir = dir.clone();
                let handle =
                    tokio::spawn(async move { lint_dir_in(engine.as_ref(), &root, &task_dir).await });
                (dir.clone(), handle)
            })
            .collect();

        let mut report = RunReport::default();
        let mut pending = tasks.into_iter();
        while let Some((directory, handle)) = pending.next() {
            let outcome = match handle.await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(err)) => {
                    abort_all(pending).await;
                    return Err(err);
                }
                Err(join_err) => {
                    abort_all(pending).await;
                    return Err(anyhow!(join_err).context(format!("Lint task for '{directory}' failed")));
                }
            };

            if let Some(results) = outcome.results() {
                let text = formatter.format(results)?;
                writeln!(out, "{text}").context("Failed to write lint output")?;
            }
            report.directories.push(DirReport { directory, outcome });
        }
        out.flush().context("Failed to write lint output")?;

        Ok(report)
    }
}

/// Abort the remaining passes and wait until each has been torn down
async fn abort_all(pending: impl Iterator<Item = (String, JoinHandle<Result<DirOutcome>>)>) {
    let handles: Vec<(String, JoinHandle<Result<DirOutcome>>)> = pending.collect();
    for (directory, handle) in &handles {
        tracing::debug!("Aborting lint of '{directory}'");
        handle.abort();
    }
    for (directory, handle) in handles {
        match handle.await {
            Err(err) if !err.is_cancelled() => {
                tracing::warn!("Lint task for '{directory}' failed while aborting: {err}");
            }
            _ => {}
        }
    }
}

async fn lint_dir_in<E: LintEngine>(engine: &E, root: &Path, dir: &str) -> Result<DirOutcome> {
    let path = root.join(dir);
    if !path.exists() {
        tracing::debug!("Skipping '{dir}': {} does not exist", path.display());
        return Ok(DirOutcome::NotFound);
    }

    let results = engine.lint_path(root, Path::new(dir)).await?;
    let outcome = DirOutcome::from_results(results);
    tracing::info!(
        "Linted '{dir}': {} ({} files)",
        outcome.label(),
        outcome.results().map_or(0, <[crate::engine::LintResult]>::len)
    );
    Ok(outcome)
}

/// Lint a package the way the CLI does: announce it, build the engine, run.
pub async fn lint_package<W: Write>(root: &Path, settings: &Settings, out: &mut W) -> Result<RunReport> {
    let package = PackageDescriptor::load(root, &settings.run.package_file)?;
    writeln!(out, "Running lint for {}", package.name).context("Failed to write lint output")?;

    let engine = EslintEngine::from_settings(&settings.engine, root)?;
    let wrapper = Wrapper::new(root.to_path_buf(), engine, &settings.run);
    let mut report = wrapper.run(out).await?;
    report.package = Some(package);
    Ok(report)
}

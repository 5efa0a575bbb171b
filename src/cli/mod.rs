//! Command-line interface for devlint
//!
//! No arguments are needed: run it from a package root and it lints `src`
//! and `test`. The flags only change where it looks and how much it logs.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod output;

pub use output::Output;

use crate::config::Settings;
use crate::engine::DirOutcome;
use crate::runner::{self, RunReport};

/// Run the shared ESLint rule-set over a package's src and test directories
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package root (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Additional settings file (toml, json or yaml)
    #[arg(short, long, value_name = "FILE", env = "DEVLINT_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the lint run
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        let root = runner::resolve_root(self.root.as_deref())?;
        tracing::debug!("Package root: {}", root.display());
        if let Some(config) = self.config.as_deref().filter(|path| !path.exists()) {
            output.warning(&format!(
                "Settings file {} does not exist; using defaults",
                config.display()
            ));
        }
        let settings = Settings::load(&root, self.config.as_deref())?;

        let mut stdout = std::io::stdout();
        let report = runner::lint_package(&root, &settings, &mut stdout).await?;

        if output.is_verbose() {
            summarize(&report, &output);
        }
        Ok(())
    }
}

fn summarize(report: &RunReport, output: &Output) {
    if let Some(package) = &report.package {
        output.verbose(&format!("Package {}", package.display_name()));
    }
    output.verbose(&format!(
        "Linted {} of {} directories",
        report.linted(),
        report.directories.len()
    ));
    for dir in &report.directories {
        let detail = match &dir.outcome {
            DirOutcome::NotFound => dir.outcome.label().to_string(),
            DirOutcome::Clean(results) => format!("{} ({} files)", dir.outcome.label(), results.len()),
            DirOutcome::Violations(results) => format!(
                "{} ({} problems in {} files)",
                dir.outcome.label(),
                results.iter().map(|r| r.problem_count()).sum::<usize>(),
                results.iter().filter(|r| !r.messages.is_empty()).count()
            ),
        };
        output.verbose_breakdown(&dir.directory, &detail);
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_needed() {
        let cli = Cli::try_parse_from(["devlint"]).unwrap();
        assert_eq!(cli.root, None);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["devlint", "--root", "packages/block-test", "-vv", "-c", "ci.toml"])
            .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("packages/block-test")));
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["devlint", "src"]).is_err());
    }
}

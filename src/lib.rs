//! # devlint
//!
//! Runs a package's lint pass the way the shared dev scripts do: the
//! `@blockly/eslint-config` rule-set is applied to `src` and `test`, local
//! `.eslintrc` files are ignored, and results are printed in the engine's
//! `stylish` layout.
//!
//! ```bash
//! cd packages/my-plugin
//! devlint
//! ```
//!
//! The engine is ESLint, run as an external process. Directories that do not
//! exist are skipped; engine failures abort the run.

pub mod cli;
pub mod config;
pub mod engine;
pub mod formatter;
pub mod package;
pub mod runner;

pub use cli::{Cli, Output};
pub use config::Settings;


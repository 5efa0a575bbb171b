//! Formatters turn lint results into printable text
//!
//! Formatters are looked up by name, the same names the engine uses.

use anyhow::{Result, bail};

use crate::engine::LintResult;

mod json;
mod stylish;

pub use json::Json;
pub use stylish::Stylish;

/// Names accepted by `load_formatter`
pub const FORMATTERS: &[&str] = &["stylish", "json"];

/// Renders a sequence of lint results
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    fn format(&self, results: &[LintResult]) -> Result<String>;
}

/// Load a formatter by name.
///
/// Colour follows the terminal: `console` disables it when stdout is not a
/// TTY or when `NO_COLOR` / `CLICOLOR=0` is set.
pub async fn load_formatter(name: &str) -> Result<Box<dyn Formatter>> {
    let formatter: Box<dyn Formatter> = match name {
        "stylish" => Box::new(Stylish::new(console::colors_enabled())),
        "json" => Box::new(Json),
        other => bail!(
            "There was a problem loading formatter '{other}'. Known formatters: {}",
            FORMATTERS.join(", ")
        ),
    };
    tracing::debug!("Loaded formatter '{}'", formatter.name());
    Ok(formatter)
}

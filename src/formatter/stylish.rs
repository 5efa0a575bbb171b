use anyhow::Result;
use console::Style;
use regex::Regex;
use std::sync::LazyLock;

use super::Formatter;
use crate::engine::LintResult;

static TRAILING_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^ ])\.$").expect("trailing period pattern is valid"));

/// Column separator inside a file's table
const SEPARATOR: &str = "  ";

/// The engine's default human-readable layout: one table per file followed
/// by a problem count.
#[derive(Debug, Clone, Copy)]
pub struct Stylish {
    color: bool,
}

struct Row {
    line: String,
    column: String,
    is_error: bool,
    message: String,
    rule: String,
}

impl Row {
    fn kind(&self) -> &'static str {
        if self.is_error { "error" } else { "warning" }
    }
}

impl Stylish {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn style(&self) -> Style {
        Style::new().force_styling(self.color)
    }

    fn table(&self, rows: &[Row]) -> String {
        let line_width = width(rows.iter().map(|r| r.line.as_str()));
        let column_width = width(rows.iter().map(|r| r.column.as_str()));
        let kind_width = width(rows.iter().map(Row::kind));
        let message_width = width(rows.iter().map(|r| r.message.as_str()));

        let dim = self.style().dim();
        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let kind = if row.is_error {
                self.style().red().apply_to(row.kind())
            } else {
                self.style().yellow().apply_to(row.kind())
            };

            let mut line = String::from(SEPARATOR);
            line.push_str(&pad(line_width - len(&row.line)));
            line.push_str(&dim.apply_to(format!("{}:{}", row.line, row.column)).to_string());
            line.push_str(&pad(column_width - len(&row.column)));
            line.push_str(SEPARATOR);
            line.push_str(&kind.to_string());
            line.push_str(&pad(kind_width - row.kind().len()));
            line.push_str(SEPARATOR);
            line.push_str(&row.message);
            if !row.rule.is_empty() {
                line.push_str(&pad(message_width - len(&row.message)));
                line.push_str(SEPARATOR);
                line.push_str(&dim.apply_to(&row.rule).to_string());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }
}

impl Formatter for Stylish {
    fn name(&self) -> &'static str {
        "stylish"
    }

    fn format(&self, results: &[LintResult]) -> Result<String> {
        let mut output = String::from("\n");
        let mut errors = 0;
        let mut warnings = 0;
        let mut fixable_errors = 0;
        let mut fixable_warnings = 0;
        let mut has_error = false;

        for result in results.iter().filter(|r| !r.messages.is_empty()) {
            errors += result.error_count;
            warnings += result.warning_count;
            fixable_errors += result.fixable_error_count;
            fixable_warnings += result.fixable_warning_count;

            let rows: Vec<Row> = result
                .messages
                .iter()
                .map(|message| Row {
                    line: message.line.to_string(),
                    column: message.column.to_string(),
                    is_error: message.is_error(),
                    message: TRAILING_PERIOD.replace(&message.message, "$1").into_owned(),
                    rule: message.rule_id.clone().unwrap_or_default(),
                })
                .collect();
            has_error |= rows.iter().any(|r| r.is_error);

            output.push_str(
                &self
                    .style()
                    .underlined()
                    .apply_to(result.file_path.display())
                    .to_string(),
            );
            output.push('\n');
            output.push_str(&self.table(&rows));
            output.push_str("\n\n");
        }

        let total = errors + warnings;
        if total == 0 {
            return Ok(String::new());
        }

        let summary = if has_error {
            self.style().red().bold()
        } else {
            self.style().yellow().bold()
        };
        output.push_str(
            &summary
                .apply_to(format!(
                    "\u{2716} {total} {} ({errors} {}, {warnings} {})\n",
                    pluralize("problem", total),
                    pluralize("error", errors),
                    pluralize("warning", warnings),
                ))
                .to_string(),
        );
        if fixable_errors > 0 || fixable_warnings > 0 {
            output.push_str(
                &summary
                    .apply_to(format!(
                        "  {fixable_errors} {} and {fixable_warnings} {} potentially fixable with the `--fix` option.\n",
                        pluralize("error", fixable_errors),
                        pluralize("warning", fixable_warnings),
                    ))
                    .to_string(),
            );
        }
        Ok(output)
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Cell width as the engine measures it: UTF-16 code units
fn len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(len).max().unwrap_or(0)
}

fn pad(count: usize) -> String {
    " ".repeat(count)
}

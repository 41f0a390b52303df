//! Result rendering for table and JSON output.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A report that can be laid out as key/value rows.
pub trait Tabular {
    /// Rows in display order.
    fn rows(&self) -> Vec<(&'static str, String)>;
}

/// Render a report in the requested format.
pub fn render<R>(report: &R, format: OutputFormat) -> Result<String>
where
    R: Serialize + Tabular,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(table(&report.rows())),
    }
}

/// Format a float the way tables show prices.
pub fn number(value: f64) -> String {
    format!("{:.6}", value)
}

fn table(rows: &[(&'static str, String)]) -> String {
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or(0);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(rule("┌", "┬", "┐"));
    for (key, value) in rows {
        lines.push(format!(
            "│ {:<kw$} │ {:>vw$} │",
            key,
            value,
            kw = key_width,
            vw = value_width
        ));
    }
    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}

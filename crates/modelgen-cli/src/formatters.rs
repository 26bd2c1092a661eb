//! Output formatters for CLI commands.
//!
//! Every command result goes through [`format_output`], so `--format`
//! behaves the same for `generate` and `inspect`.

use anyhow::Result;
use colored::Colorize;
use modelgen_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Arguments
///
/// * `data` - The data to format (must be serializable)
/// * `format` - The output format (Json, Text, Pretty)
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use modelgen_cli::formatters::format_output;
/// use modelgen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     models: usize,
///     destination: String,
/// }
///
/// let summary = Summary {
///     models: 3,
///     destination: "./out".to_string(),
/// };
///
/// let output = format_output(&summary, OutputFormat::Json)?;
/// assert!(output.contains("\"models\": 3"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Pretty-printed JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Single-line JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Single-line JSON without colors, for scripts and pipes.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    const INDENT: &str = "  ";

    /// Colorized, indented rendering for terminals.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        Ok(out)
    }

    fn write_value(out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Null => out.push_str(&"null".dimmed().to_string()),
            Value::Bool(b) => out.push_str(&b.to_string().yellow().to_string()),
            Value::Number(n) => out.push_str(&n.to_string().cyan().to_string()),
            Value::String(s) => out.push_str(&format!("\"{}\"", s.green())),
            Value::Array(items) if items.is_empty() => out.push_str("[]"),
            Value::Object(entries) if entries.is_empty() => out.push_str("{}"),
            Value::Array(items) => {
                out.push_str("[\n");
                for (index, item) in items.iter().enumerate() {
                    out.push_str(&INDENT.repeat(depth + 1));
                    write_value(out, item, depth + 1);
                    close_entry(out, index + 1 == items.len());
                }
                out.push_str(&INDENT.repeat(depth));
                out.push(']');
            }
            Value::Object(entries) => {
                out.push_str("{\n");
                for (index, (key, item)) in entries.iter().enumerate() {
                    out.push_str(&INDENT.repeat(depth + 1));
                    out.push_str(&format!("\"{}\": ", key.blue().bold()));
                    write_value(out, item, depth + 1);
                    close_entry(out, index + 1 == entries.len());
                }
                out.push_str(&INDENT.repeat(depth));
                out.push('}');
            }
        }
    }

    fn close_entry(out: &mut String, last: bool) {
        if !last {
            out.push(',');
        }
        out.push('\n');
    }
}

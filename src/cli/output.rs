//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::SummaryLevel;
use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    url: &'a str,
    chars: usize,
    bytes: usize,
    text: &'a str,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    url: &'a str,
    level: SummaryLevel,
    summary: &'a str,
}

/// Formats extracted text.
#[must_use]
pub fn format_extract(url: &str, text: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "# {url} ({})", format_size(text.len()));
            output.push('\n');
            output.push_str(text);
            output.push('\n');
            output
        }
        OutputFormat::Json => format_json(&ExtractOutput {
            url,
            chars: text.chars().count(),
            bytes: text.len(),
            text,
        }),
    }
}

/// Formats a generated summary.
#[must_use]
pub fn format_summary(url: &str, level: SummaryLevel, summary: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Summary ({level}) of {url}");
            output.push_str(&"=".repeat(40));
            output.push_str("\n\n");
            output.push_str(summary);
            output.push('\n');
            output
        }
        OutputFormat::Json => format_json(&SummaryOutput {
            url,
            level,
            summary,
        }),
    }
}

/// Formats an error.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({ "error": error.to_string() })),
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Text);
    }

    #[test]
    fn test_format_extract_text() {
        let output = format_extract("https://a", "body", OutputFormat::Text);
        assert_eq!(output, "# https://a (4 B)\n\nbody\n");
    }

    #[test]
    fn test_format_extract_json() {
        let output = format_extract("https://a", "héllo", OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["chars"], 5);
        assert_eq!(value["bytes"], 6);
        assert_eq!(value["text"], "héllo");
    }

    #[test]
    fn test_format_summary_json() {
        let output = format_summary("https://a", SummaryLevel::Medium, "sum", OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["level"], "MEDIUM");
        assert_eq!(value["summary"], "sum");
    }

    #[test]
    fn test_format_summary_text() {
        let output = format_summary("https://a", SummaryLevel::High, "sum", OutputFormat::Text);
        assert!(output.starts_with("Summary (HIGH) of https://a\n"));
        assert!(output.ends_with("\n\nsum\n"));
    }

    #[test]
    fn test_format_error() {
        let err: Error = RequestError::InvalidUrl.into();
        assert_eq!(
            format_error(&err, OutputFormat::Text),
            "Please enter a valid http(s) URL."
        );
        let value: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputFormat::Json)).unwrap();
        assert_eq!(value["error"], "Please enter a valid http(s) URL.");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(100), "100 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}

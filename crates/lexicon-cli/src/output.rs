//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lexicon_export::ExportFormat;
use serde::Serialize;
use std::path::PathBuf;

/// What an export produced, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Project code
    pub project: String,
    /// Project version the file was built from
    pub version: u64,
    /// Format name
    pub format: String,
    /// Published file
    pub path: PathBuf,
    /// MIME type to serve the file with
    pub content_type: String,
    /// Suggested download name
    pub download_name: String,
}

impl ExportSummary {
    /// Describe a published export.
    pub fn new(project: &str, version: u64, format: ExportFormat, path: PathBuf) -> Self {
        Self {
            project: project.to_string(),
            version,
            format: format.to_string(),
            path,
            content_type: format.content_type().to_string(),
            download_name: format.download_name(project),
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an export result.
    pub fn format_export(&self, summary: &ExportSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Text => Ok(self.success(&format!(
                "Exported {} v{} as {}: {}",
                summary.project,
                summary.version,
                summary.format,
                summary.path.display()
            ))),
        }
    }

    /// Format a list of generated word forms.
    pub fn format_words(&self, words: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(words)?),
            OutputFormat::Text if words.is_empty() => {
                Ok(self.warning("The tool produced no word forms."))
            }
            OutputFormat::Text => Ok(words.join("\n")),
        }
    }

    /// Format an XML document for output.
    pub fn format_document(&self, document: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "document": document
            }))?),
            OutputFormat::Text => Ok(document.to_string()),
        }
    }

    /// Format an import result.
    pub fn import_result(&self, code: &str, entries: usize, ignore_words: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "project": code,
                "entries": entries,
                "ignore_words": ignore_words,
            }))?),
            OutputFormat::Text => Ok(self.success(&format!(
                "Imported {} with {} entr{} and {} ignore word(s)",
                code,
                entries,
                if entries == 1 { "y" } else { "ies" },
                ignore_words
            ))),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ExportSummary {
        ExportSummary::new("kgu", 3, ExportFormat::Oxt, PathBuf::from("data/exports/kgu_3.oxt"))
    }

    #[test]
    fn test_summary_fields() {
        let summary = summary();
        assert_eq!(summary.format, "oxt");
        assert_eq!(summary.download_name, "kgu.oxt");
        assert_eq!(summary.content_type, "application/vnd.openoffice.extension");
    }

    #[test]
    fn test_export_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_export(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["project"], "kgu");
        assert_eq!(value["version"], 3);
        assert_eq!(value["path"], "data/exports/kgu_3.oxt");
    }

    #[test]
    fn test_export_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_export(&summary()).unwrap();
        assert_eq!(output, "✓ Exported kgu v3 as oxt: data/exports/kgu_3.oxt");
    }

    #[test]
    fn test_words_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let words = vec!["hobol".to_string(), "hoboled".to_string()];
        assert_eq!(formatter.format_words(&words).unwrap(), "hobol\nhoboled");
        assert!(formatter.format_words(&[]).unwrap().contains("no word forms"));
    }

    #[test]
    fn test_words_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_words(&["a".to_string()]).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec!["a"]);
    }

    #[test]
    fn test_import_text_plural() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(
            formatter.import_result("kgu", 1, 0).unwrap(),
            "✓ Imported kgu with 1 entry and 0 ignore word(s)"
        );
        assert!(formatter.import_result("kgu", 2, 0).unwrap().contains("2 entries"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}

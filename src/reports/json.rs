//! JSON report generator.

use super::{ComparisonReport, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ClassifiedSlide, DiffSummary};
use crate::layout::PagePlan;
use crate::model::Deck;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Leave out the per-slide classification
    summary_only: bool,
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Create a reporter that emits metadata, summary and pages only
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &ComparisonReport<'_>, config: &ReportConfig) -> Result<String, ReportError> {
        let json = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: config.metadata.tool_version.clone(),
                },
                generated_at: Utc::now().to_rfc3339(),
                title: config.title_for(report),
                source: DeckInfo::new(report.source, config.metadata.source_path.clone()),
                target: DeckInfo::new(report.target, config.metadata.target_path.clone()),
            },
            summary: report.diff.summary,
            similarity: report.diff.summary.similarity(),
            slides: (!self.summary_only).then_some(report.diff.slides.as_slice()),
            pages: report.pages,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(rendered + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata,
    summary: DiffSummary,
    similarity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    slides: Option<&'a [ClassifiedSlide]>,
    pages: &'a [PagePlan],
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    title: String,
    source: DeckInfo,
    target: DeckInfo,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: String,
}

#[derive(Serialize)]
struct DeckInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    slide_count: usize,
    fingerprint: String,
}

impl DeckInfo {
    fn new(deck: &Deck, file_path: Option<String>) -> Self {
        Self {
            name: deck.name().to_string(),
            file_path,
            slide_count: deck.len(),
            fingerprint: format!("{:016x}", deck.fingerprint()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::fixture;
    use serde_json::Value;

    fn render(reporter: &JsonReporter) -> Value {
        let f = fixture();
        let out = reporter.generate(&f.report(), &ReportConfig::default()).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn test_structure() {
        let json = render(&JsonReporter::new());
        assert_eq!(json["metadata"]["tool"]["name"], "deck-diff");
        assert_eq!(json["metadata"]["source"]["slide_count"], 5);
        assert_eq!(json["summary"]["moved"], 2);
        assert_eq!(json["slides"].as_array().unwrap().len(), 6);
        assert_eq!(json["pages"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_pages_carry_layout() {
        let json = render(&JsonReporter::new());
        let first = &json["pages"][0];
        assert_eq!(first["bar_color"], "grey");
        assert_eq!(first["label"], "moved");
        assert_eq!(first["move_annotation"]["from_rank"], 1);
        assert_eq!(first["move_annotation"]["to_rank"], 2);
        assert_eq!(json["pages"][2]["bar_color"], "green");
        assert!(json["pages"][2].get("move_annotation").is_none());
    }

    #[test]
    fn test_summary_only_and_compact() {
        let json = render(&JsonReporter::summary_only());
        assert!(json.get("slides").is_none());

        let f = fixture();
        let compact = JsonReporter::new()
            .pretty(false)
            .generate(&f.report(), &ReportConfig::default())
            .unwrap();
        assert_eq!(compact.lines().count(), 1);
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let json = render(&JsonReporter::new());
        let ts = json["metadata"]["generated_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}

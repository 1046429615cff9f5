//! Report type definitions.

use crate::diff::DeckDiff;
use crate::layout::PagePlan;
use crate::model::Deck;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Auto-detect: side-by-side if TTY, summary otherwise
    #[default]
    Auto,
    /// One line per changed slide
    Summary,
    /// Structured JSON output
    Json,
    /// Side-by-side terminal pages with colored bars
    #[value(alias = "sidebyside")]
    SideBySide,
    /// Standalone HTML document
    Html,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::SideBySide => write!(f, "side-by-side"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            metadata: ReportMetadata::new(),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title to show, falling back to `source vs target`.
    #[must_use]
    pub fn title_for(&self, report: &ComparisonReport<'_>) -> String {
        self.title.clone().unwrap_or_else(|| {
            format!("{} vs {}", report.source.name(), report.target.name())
        })
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Source input path or label
    pub source_path: Option<String>,
    /// Target input path or label
    pub target_path: Option<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}

/// Everything a reporter needs for one comparison.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport<'a> {
    pub source: &'a Deck,
    pub target: &'a Deck,
    pub diff: &'a DeckDiff,
    /// Pages in render order; reporters keep this order
    pub pages: &'a [PagePlan],
}

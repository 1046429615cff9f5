//! Report generation for deck comparisons.
//!
//! Every reporter consumes the ordered [`PagePlan`](crate::layout::PagePlan)
//! list and must keep its order, bar colors and move arrows as given:
//! - Summary: one line per page, shell friendly
//! - JSON: structured data for programmatic integration
//! - Side-by-side: terminal rows with colored bars
//! - HTML: standalone document with slide images
//!
//! # Security
//!
//! Deck names and file paths come from the user's file system. The `escape`
//! module must be used before embedding them in HTML.

pub mod escape;
mod html;
mod json;
mod sidebyside;
mod summary;
mod types;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use sidebyside::SideBySideReporter;
pub use summary::SummaryReporter;
pub use types::{ComparisonReport, ReportConfig, ReportFormat, ReportMetadata};

use std::io::Write;
use thiserror::Error;

/// Notice rendered instead of pages when the plan is empty.
pub const NOTHING_TO_SHOW: &str = "No slide differences: nothing to show";

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render one comparison
    fn generate(&self, report: &ComparisonReport<'_>, config: &ReportConfig) -> Result<String, ReportError>;

    /// Write the rendered report to a writer
    fn write_report(
        &self,
        report: &ComparisonReport<'_>,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rendered = self.generate(report, config)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
///
/// `Auto` should be resolved by the caller; here it falls back to summary.
#[must_use]
pub fn create_reporter_with_options(format: ReportFormat, use_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::SideBySide => {
            if use_color {
                Box::new(SideBySideReporter::new())
            } else {
                Box::new(SideBySideReporter::new().no_colors())
            }
        }
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

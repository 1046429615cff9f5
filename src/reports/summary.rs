//! Summary report generator for shell output.
//!
//! One line per page, in the form `slide 2 -> slide 3`, `slide 4 only in
//! source` or `slide 1 only in target`, followed by the label counts.

use super::{ComparisonReport, NOTHING_TO_SHOW, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::layout::PagePlan;
use std::fmt::Write;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn page_line(&self, page: &PagePlan) -> String {
        match (&page.left, &page.right) {
            (Some(left), Some(right)) => {
                let line = format!("slide {} -> slide {}", left.number(), right.number());
                match page.move_annotation {
                    Some(arrow) => self.color(&format!("{line} (moved {:+})", arrow.displacement()), "yellow"),
                    None => self.color(&line, "dim"),
                }
            }
            (Some(left), None) => self.color(&format!("slide {} only in source", left.number()), "red"),
            (None, Some(right)) => self.color(&format!("slide {} only in target", right.number()), "green"),
            (None, None) => String::new(),
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &ComparisonReport<'_>, config: &ReportConfig) -> Result<String, ReportError> {
        let mut out = String::new();
        let summary = &report.diff.summary;

        writeln!(out, "{}", self.color(&config.title_for(report), "bold"))?;
        writeln!(
            out,
            "source: {} slides, target: {} slides",
            summary.source_slides, summary.target_slides
        )?;
        writeln!(out)?;

        if report.pages.is_empty() {
            writeln!(out, "{NOTHING_TO_SHOW}")?;
        } else {
            for page in report.pages {
                writeln!(out, "{}", self.page_line(page))?;
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "{} stable, {} moved, {} only in source, {} only in target ({:.0}% similar)",
            summary.stable,
            self.color(&summary.moved.to_string(), "yellow"),
            self.color(&summary.source_only.to_string(), "red"),
            self.color(&summary.target_only.to_string(), "green"),
            summary.similarity() * 100.0
        )?;
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

//! Side-by-side terminal output: source slides on the left, target slides
//! on the right, one row per page.

use super::{ComparisonReport, NOTHING_TO_SHOW, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::layout::{BarColor, MoveAnnotation, PagePlan};
use crate::model::Slide;
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// ANSI color codes
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREY: &str = "\x1b[38;5;242m";
}

const BAR: &str = "█";
const SEPARATOR: &str = " │ ";
const SEPARATOR_WIDTH: usize = 3;
const DEFAULT_WIDTH: usize = 100;
const MIN_WIDTH: usize = 40;

/// Side-by-side page reporter
pub struct SideBySideReporter {
    /// Total line width
    width: usize,
    /// Use colors
    use_colors: bool,
}

impl SideBySideReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            use_colors: true,
        }
    }

    /// Set terminal width
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = if width < MIN_WIDTH { MIN_WIDTH } else { width };
        self
    }

    /// Disable colors
    #[must_use]
    pub const fn no_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    const fn col(&self, code: &'static str) -> &'static str {
        if self.use_colors { code } else { "" }
    }

    /// Width of one half, excluding the bar and its trailing space.
    const fn cell_width(&self) -> usize {
        (self.width - SEPARATOR_WIDTH) / 2 - 2
    }

    const fn bar_code(color: BarColor) -> &'static str {
        match color {
            BarColor::Grey => colors::GREY,
            BarColor::Red => colors::RED,
            BarColor::Green => colors::GREEN,
        }
    }

    fn format_header(&self, source: &str, target: &str) -> String {
        let cell = self.cell_width() + 2;
        format!(
            "{}{}{}{SEPARATOR}{}{}{}\n{}\n",
            self.col(colors::BOLD),
            pad(&truncate(source, cell), cell),
            self.col(colors::RESET),
            self.col(colors::BOLD),
            truncate(target, cell),
            self.col(colors::RESET),
            self.col(colors::DIM).to_string() + &"─".repeat(self.width) + self.col(colors::RESET),
        )
    }

    fn format_half(&self, slide: Option<&Slide>, color: BarColor, arrow: Option<MoveAnnotation>) -> String {
        let cell = self.cell_width();
        let Some(slide) = slide else {
            return format!("  {}", pad("", cell));
        };

        let mut text = format!("slide {:<3} {}", slide.number(), slide.token.short());
        if let Some(arrow) = arrow {
            let _ = write!(text, "  {}", arrow_text(arrow));
        }
        let text = truncate(&text, cell);
        let highlight = match (arrow, color) {
            (Some(_), _) => colors::YELLOW,
            (None, BarColor::Grey) => colors::DIM,
            (None, other) => Self::bar_code(other),
        };
        format!(
            "{}{BAR}{} {}{}{}",
            self.col(Self::bar_code(color)),
            self.col(colors::RESET),
            self.col(highlight),
            pad(&text, cell),
            self.col(colors::RESET),
        )
    }

    fn format_page(&self, page: &PagePlan) -> String {
        let left = self.format_half(page.left.as_ref(), page.bar_color, None);
        let right = self.format_half(page.right.as_ref(), page.bar_color, page.move_annotation);
        format!("{left}{SEPARATOR}{}\n", right.trim_end())
    }
}

impl Default for SideBySideReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SideBySideReporter {
    fn generate(&self, report: &ComparisonReport<'_>, config: &ReportConfig) -> Result<String, ReportError> {
        let mut out = String::new();
        let summary = &report.diff.summary;

        writeln!(
            out,
            "{}{}{}",
            self.col(colors::CYAN),
            config.title_for(report),
            self.col(colors::RESET)
        )?;
        out.push_str(&self.format_header(
            &format!("{} ({} slides)", report.source.name(), summary.source_slides),
            &format!("{} ({} slides)", report.target.name(), summary.target_slides),
        ));

        if report.pages.is_empty() {
            writeln!(out, "{}{NOTHING_TO_SHOW}{}", self.col(colors::DIM), self.col(colors::RESET))?;
        } else {
            for page in report.pages {
                out.push_str(&self.format_page(page));
            }
        }

        writeln!(
            out,
            "\n{}stable {}  {}moved {}{}  {}removed {}{}  {}added {}{}",
            self.col(colors::DIM),
            summary.stable,
            self.col(colors::YELLOW),
            summary.moved,
            self.col(colors::RESET),
            self.col(colors::RED),
            summary.source_only,
            self.col(colors::RESET),
            self.col(colors::GREEN),
            summary.target_only,
            self.col(colors::RESET),
        )?;
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::SideBySide
    }
}

/// `↓ +2` for a slide that moved later, `↑ -1` for one that moved earlier.
fn arrow_text(arrow: MoveAnnotation) -> String {
    let d = arrow.displacement();
    if d >= 0 { format!("↓ {d:+}") } else { format!("↑ {d}") }
}

/// Truncate to a display width, marking the cut with `…`.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Right-pad to a display width.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

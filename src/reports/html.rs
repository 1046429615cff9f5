//! HTML report generator.

use super::escape::{escape_html, escape_html_attr, file_url};
use super::{ComparisonReport, NOTHING_TO_SHOW, ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::layout::{BarColor, PagePlan};
use crate::model::Slide;
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { include_styles: true }
    }

    /// Leave out the inline stylesheet
    #[must_use]
    pub const fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    const fn get_styles(&self) -> &'static str {
        r"
        <style>
            :root {
                --bg-color: #1e1e2e;
                --text-color: #cdd6f4;
                --accent-color: #89b4fa;
                --grey-bar: #6c7086;
                --red-bar: #f38ba8;
                --green-bar: #a6e3a1;
                --move-color: #f9e2af;
                --card-bg: #313244;
            }
            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                background-color: var(--bg-color);
                color: var(--text-color);
                margin: 0;
                padding: 20px;
            }
            h1 { color: var(--accent-color); }
            .summary { margin-bottom: 24px; }
            .page {
                display: grid;
                grid-template-columns: 1fr 1fr;
                gap: 16px;
                margin-bottom: 16px;
            }
            .half {
                background-color: var(--card-bg);
                border-left: 8px solid transparent;
                border-radius: 4px;
                padding: 8px;
                min-height: 2em;
            }
            .bar-grey { border-left-color: var(--grey-bar); }
            .bar-red { border-left-color: var(--red-bar); }
            .bar-green { border-left-color: var(--green-bar); }
            .half img { max-width: 100%; display: block; }
            .caption { font-size: 0.9em; color: #a6adc8; }
            .move { color: var(--move-color); font-weight: bold; }
            .empty { opacity: 0.4; }
        </style>
        "
    }

    fn write_half(&self, html: &mut String, slide: Option<&Slide>, page: &PagePlan, arrow: bool) -> std::fmt::Result {
        let bar = match page.bar_color {
            BarColor::Grey => "bar-grey",
            BarColor::Red => "bar-red",
            BarColor::Green => "bar-green",
        };
        let Some(slide) = slide else {
            return writeln!(html, r#"<div class="half empty"></div>"#);
        };

        writeln!(html, r#"<div class="half {bar}">"#)?;
        if let Some(image) = &slide.image {
            writeln!(
                html,
                r#"<img src="{}" alt="{}">"#,
                escape_html_attr(&file_url(image)),
                escape_html_attr(&format!("slide {}", slide.number()))
            )?;
        }
        write!(
            html,
            r#"<div class="caption">slide {} <code>{}</code>"#,
            slide.number(),
            escape_html(&slide.token.short())
        )?;
        if let Some(annotation) = page.move_annotation.filter(|_| arrow) {
            let d = annotation.displacement();
            let symbol = if d >= 0 { "&darr;" } else { "&uarr;" };
            write!(html, r#" <span class="move">{symbol} {d:+}</span>"#)?;
        }
        writeln!(html, "</div>\n</div>")
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, report: &ComparisonReport<'_>, config: &ReportConfig) -> Result<String, ReportError> {
        let title = escape_html(&config.title_for(report));
        let summary = &report.diff.summary;
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>")?;
        writeln!(html, "<meta charset=\"utf-8\">\n<title>{title}</title>")?;
        if self.include_styles {
            html.push_str(self.get_styles());
        }
        writeln!(html, "</head>\n<body>\n<h1>{title}</h1>")?;

        writeln!(
            html,
            r#"<p class="summary">{} ({} slides) &rarr; {} ({} slides): {} stable, {} moved, {} only in source, {} only in target</p>"#,
            escape_html(report.source.name()),
            summary.source_slides,
            escape_html(report.target.name()),
            summary.target_slides,
            summary.stable,
            summary.moved,
            summary.source_only,
            summary.target_only,
        )?;

        if report.pages.is_empty() {
            writeln!(html, "<p class=\"notice\">{}</p>", escape_html(NOTHING_TO_SHOW))?;
        }
        for page in report.pages {
            writeln!(html, r#"<div class="page {}">"#, page.label)?;
            self.write_half(&mut html, page.left.as_ref(), page, false)?;
            self.write_half(&mut html, page.right.as_ref(), page, true)?;
            writeln!(html, "</div>")?;
        }

        writeln!(
            html,
            "<footer class=\"caption\">Generated by {} {}</footer>\n</body>\n</html>",
            env!("CARGO_PKG_NAME"),
            escape_html(&config.metadata.tool_version)
        )?;
        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}

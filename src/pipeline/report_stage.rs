//! Report output stage.

use super::compare_stage::Comparison;
use super::{OutputTarget, auto_detect_format, should_use_color, write_output};
use crate::config::AppConfig;
use crate::model::Deck;
use crate::reports::{ComparisonReport, ReportConfig, ReportMetadata, create_reporter_with_options};
use anyhow::Result;

/// Labels of the two inputs as shown in report metadata.
#[derive(Debug, Clone, Default)]
pub struct InputLabels {
    pub source: Option<String>,
    pub target: Option<String>,
}

/// Render a comparison and write it to the configured destination.
pub fn output_report(
    config: &AppConfig,
    comparison: &Comparison,
    source: &Deck,
    target: &Deck,
    labels: InputLabels,
) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &output_target);
    let use_color = should_use_color(config.output.no_color, &output_target);

    let report_config = ReportConfig {
        title: config.output.title.clone(),
        metadata: ReportMetadata {
            source_path: labels.source,
            target_path: labels.target,
            ..ReportMetadata::new()
        },
    };
    let report = ComparisonReport {
        source,
        target,
        diff: &comparison.diff,
        pages: &comparison.pages,
    };

    tracing::debug!("rendering {format} report (color: {use_color})");
    let rendered = create_reporter_with_options(format, use_color).generate(&report, &report_config)?;
    write_output(&rendered, &output_target, config.behavior.quiet)
}

//! Compare command handler.
//!
//! Implements the `compare` subcommand for aligning two decks.

use crate::config::{AppConfig, CompareConfig};
use crate::convert::{OfficeRasterizer, join_decks};
use crate::pipeline::{
    InputLabels, LoadedDeck, OutputTarget, auto_detect_format, compute_comparison, deck_name,
    exit_code_for, load_deck, output_report,
};
use crate::reports::ReportFormat;
use anyhow::Result;
use std::path::Path;

/// Run the compare command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(config: CompareConfig) -> Result<i32> {
    let labels = InputLabels {
        source: Some(config.paths.source.display().to_string()),
        target: Some(config.paths.target.display().to_string()),
    };
    let source_name = deck_name(&config.paths.source);
    compare_paths(&config.app, &config.paths.source, &source_name, &config.paths.target, labels)
}

/// Load, align and report on two inputs.
///
/// Shared with the history command, which compares a retrieved revision
/// against the working copy.
pub(crate) fn compare_paths(
    app: &AppConfig,
    source: &Path,
    source_name: &str,
    target: &Path,
    labels: InputLabels,
) -> Result<i32> {
    let rasterizer = OfficeRasterizer::new(app.conversion.options());
    let keep_images = keeps_images(app);
    let target_name = deck_name(target);

    let (source_deck, target_deck): (LoadedDeck, LoadedDeck) = join_decks(
        || load_deck(source, source_name, "source", &app.conversion, &rasterizer, keep_images),
        || load_deck(target, &target_name, "target", &app.conversion, &rasterizer, keep_images),
    )?;

    let comparison = compute_comparison(
        &source_deck.deck,
        &target_deck.deck,
        app.layout,
        app.behavior.quiet,
    )?;

    let exit_code = exit_code_for(&comparison, app.behavior.fail_on_change);
    output_report(app, &comparison, &source_deck.deck, &target_deck.deck, labels)?;

    Ok(exit_code)
}

/// HTML reports link to the rendered images, so they must outlive the run.
fn keeps_images(app: &AppConfig) -> bool {
    let target = OutputTarget::from_option(app.output.file.clone());
    app.conversion.keep_images || auto_detect_format(app.output.format, &target) == ReportFormat::Html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComparePaths;
    use crate::model::{SlideToken, format_manifest_line};
    use crate::pipeline::exit_codes;
    use std::fs;
    use std::path::PathBuf;

    fn write_manifest(dir: &Path, name: &str, slides: &str) -> PathBuf {
        let lines: Vec<String> = slides
            .chars()
            .enumerate()
            .map(|(i, c)| {
                format_manifest_line(
                    &SlideToken::of_content(c.to_string().as_bytes()),
                    &format!("slide_{:03}.png", i + 1),
                )
            })
            .collect();
        let path = dir.join(name);
        fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    fn config(source: PathBuf, target: PathBuf, out: PathBuf, fail_on_change: bool) -> CompareConfig {
        CompareConfig {
            paths: ComparePaths { source, target },
            app: AppConfig::builder()
                .output_format(ReportFormat::Json)
                .output_file(Some(out))
                .fail_on_change(fail_on_change)
                .quiet(true)
                .build(),
        }
    }

    #[test]
    fn test_compare_manifests_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_manifest(dir.path(), "v1.sha256", "ABCD");
        let target = write_manifest(dir.path(), "v2.sha256", "ABXD");
        let out = dir.path().join("report.json");

        let code = run_compare(config(source, target, out.clone(), true)).unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["summary"]["stable"], 3);
        assert_eq!(json["summary"]["source_only"], 1);
        assert_eq!(json["summary"]["target_only"], 1);
    }

    #[test]
    fn test_identical_decks_exit_success() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_manifest(dir.path(), "v1.sha256", "ABC");
        let target = write_manifest(dir.path(), "v2.sha256", "ABC");
        let out = dir.path().join("report.json");

        let code = run_compare(config(source, target, out, true)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_manifest(dir.path(), "v1.sha256", "A");
        let out = dir.path().join("report.json");
        let result = run_compare(config(source, dir.path().join("nope.sha256"), out, false));
        assert!(result.is_err());
    }

    #[test]
    fn test_html_keeps_images() {
        let app = AppConfig::builder().output_format(ReportFormat::Html).build();
        assert!(keeps_images(&app));
        let app = AppConfig::builder().output_format(ReportFormat::Summary).build();
        assert!(!keeps_images(&app));
    }
}

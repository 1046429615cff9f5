//! Pipeline and CLI integration tests.
//!
//! These tests exercise the load → compare → plan → report pipeline and the
//! CLI command handlers against slide directories and manifests written to
//! temporary directories.

use deck_diff::cli::{run_compare, run_hash};
use deck_diff::config::{
    AppConfig, CompareConfig, ComparePaths, ConversionConfig, HashConfig, LayoutOverrides, Validatable,
};
use deck_diff::convert::{OfficeRasterizer, read_sidecars};
use deck_diff::pipeline::{compute_comparison, exit_codes, load_deck};
use deck_diff::reports::ReportFormat;
use deck_diff::{LayoutConfig, SlideLabel};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

/// Write one fake `slide_NNN.png` per character; equal characters mean equal images.
fn slide_dir(root: &Path, name: &str, slides: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for (i, c) in slides.chars().enumerate() {
        fs::write(dir.join(format!("slide_{:03}.png", i + 1)), format!("image {c}")).unwrap();
    }
    dir
}

fn compare_config(source: PathBuf, target: PathBuf, app: AppConfig) -> CompareConfig {
    CompareConfig {
        paths: ComparePaths { source, target },
        app,
    }
}

fn json_to(out: &Path) -> AppConfig {
    AppConfig::builder()
        .output_format(ReportFormat::Json)
        .output_file(Some(out.to_path_buf()))
        .quiet(true)
        .build()
}

// ============================================================================
// Load and compare stages
// ============================================================================

mod stages {
    use super::*;

    #[test]
    fn image_directories_compare_by_content() {
        let tmp = TempDir::new().unwrap();
        let v1 = slide_dir(tmp.path(), "v1", "ABCD");
        let v2 = slide_dir(tmp.path(), "v2", "ACBD");
        let rasterizer = OfficeRasterizer::default();
        let conversion = ConversionConfig::default();

        let source = load_deck(&v1, "v1", "source", &conversion, &rasterizer, false).unwrap();
        let target = load_deck(&v2, "v2", "target", &conversion, &rasterizer, false).unwrap();
        let comparison = compute_comparison(&source.deck, &target.deck, LayoutConfig::default(), true).unwrap();

        assert_eq!(comparison.diff.summary.stable, 2);
        assert_eq!(comparison.diff.summary.moved, 2);
        assert_eq!(comparison.pages.len(), 2);
        assert!(comparison.pages.iter().all(|p| p.label == SlideLabel::Moved));
        let left_image = comparison.pages[0].left.as_ref().unwrap().image.as_ref().unwrap();
        assert_eq!(left_image, &v1.join("slide_002.png"));
    }

    #[test]
    fn sidecars_and_images_give_same_tokens() {
        let tmp = TempDir::new().unwrap();
        let dir = slide_dir(tmp.path(), "deck", "XYZ");
        let config = HashConfig {
            input: dir.clone(),
            out_dir: None,
            conversion: ConversionConfig::default(),
        };
        assert_eq!(run_hash(config).unwrap(), exit_codes::SUCCESS);

        let from_sidecars = read_sidecars("deck", &dir).unwrap().unwrap();
        let images = slide_dir(tmp.path(), "images", "XYZ");
        let rasterizer = OfficeRasterizer::default();
        let from_images =
            load_deck(&images, "images", "target", &ConversionConfig::default(), &rasterizer, false).unwrap();

        assert_eq!(
            from_sidecars.tokens().collect::<Vec<_>>(),
            from_images.deck.tokens().collect::<Vec<_>>()
        );
    }
}

// ============================================================================
// Command handlers
// ============================================================================

mod commands {
    use super::*;

    #[test]
    fn compare_writes_json_report() {
        let tmp = TempDir::new().unwrap();
        let v1 = slide_dir(tmp.path(), "v1", "ABC");
        let v2 = slide_dir(tmp.path(), "v2", "AXBC");
        let out = tmp.path().join("diff.json");

        let code = run_compare(compare_config(v1, v2, json_to(&out))).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["summary"]["target_only"], 1);
        let pages = json["pages"].as_array().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["bar_color"], "green");
        assert_eq!(pages[0]["label"], "target-only");
    }

    #[test]
    fn fail_on_change_sets_exit_code() {
        let tmp = TempDir::new().unwrap();
        let v1 = slide_dir(tmp.path(), "v1", "AB");
        let v2 = slide_dir(tmp.path(), "v2", "A");
        let out = tmp.path().join("diff.json");
        let mut app = json_to(&out);
        app.behavior.fail_on_change = true;

        assert_eq!(
            run_compare(compare_config(v1, v2, app)).unwrap(),
            exit_codes::CHANGES_DETECTED
        );
    }

    #[test]
    fn identical_decks_render_notice() {
        let tmp = TempDir::new().unwrap();
        let v1 = slide_dir(tmp.path(), "v1", "AB");
        let v2 = slide_dir(tmp.path(), "v2", "AB");
        let out = tmp.path().join("diff.txt");
        let app = AppConfig::builder()
            .output_format(ReportFormat::Summary)
            .output_file(Some(out.clone()))
            .fail_on_change(true)
            .quiet(true)
            .build();

        assert_eq!(run_compare(compare_config(v1, v2, app)).unwrap(), exit_codes::SUCCESS);
        let text = fs::read_to_string(out).unwrap();
        assert!(text.contains(deck_diff::reports::NOTHING_TO_SHOW));
    }

    #[test]
    fn html_report_links_slide_images() {
        let tmp = TempDir::new().unwrap();
        let v1 = slide_dir(tmp.path(), "v1", "AB");
        let v2 = slide_dir(tmp.path(), "v2", "AC");
        let out = tmp.path().join("diff.html");
        let app = AppConfig::builder()
            .output_format(ReportFormat::Html)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        run_compare(compare_config(v1, v2, app)).unwrap();
        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains(r#"<div class="half bar-red">"#));
        assert!(html.contains(r#"<div class="half bar-green">"#));
        assert!(html.contains("v1/slide_002.png"));
        assert!(html.contains("v2/slide_002.png"));
    }

    #[test]
    fn unsupported_input_is_error() {
        let tmp = TempDir::new().unwrap();
        let v1 = slide_dir(tmp.path(), "v1", "A");
        let notes = tmp.path().join("notes.docx");
        fs::write(&notes, "x").unwrap();

        let result = run_compare(compare_config(v1, notes, json_to(&tmp.path().join("o.json"))));
        assert!(result.is_err());
    }
}

// ============================================================================
// Configuration layering
// ============================================================================

mod config {
    use super::*;

    #[test]
    fn file_settings_are_overridden_by_cli() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".deck-diff.yaml");
        fs::write(
            &path,
            "layout:\n  suppress_common_slides: false\noutput:\n  format: html\nconversion:\n  dpi: 300\n",
        )
        .unwrap();

        let cli = AppConfig::builder().output_format(ReportFormat::Json).build();
        let (config, loaded_from) = AppConfig::from_file_with_overrides(Some(&path), &cli);

        assert_eq!(loaded_from, Some(path));
        assert!(!config.layout.suppress_common_slides);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.conversion.dpi, 300);
        assert!(config.is_valid());
    }

    #[test]
    fn layout_flags_reenable_what_the_file_turned_off() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".deck-diff.yaml");
        fs::write(&path, "layout:\n  show_moved_pages: false\n").unwrap();

        let cli = AppConfig::builder().show_moved_pages(true).build();
        let (mut config, _) = AppConfig::from_file_with_overrides(Some(&path), &cli);
        assert!(!config.layout.show_moved_pages);

        config.apply_layout_overrides(LayoutOverrides {
            show_moved_pages: Some(true),
            ..LayoutOverrides::default()
        });
        assert!(config.layout.show_moved_pages);
        assert!(config.layout.suppress_common_slides);
    }

    #[test]
    fn invalid_dpi_is_reported() {
        let config = AppConfig::builder().dpi(5).build();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field.contains("dpi")));
    }
}

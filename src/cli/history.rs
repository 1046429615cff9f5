//! History command handler.
//!
//! Implements the `history` subcommand: compares a presentation in the
//! working tree against an earlier revision of the same file.

use super::compare::compare_paths;
use crate::config::HistoryConfig;
use crate::pipeline::{InputLabels, deck_name};
use crate::sources::retrieve_revision;
use anyhow::{Context, Result};

/// Run the history command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_history(config: HistoryConfig) -> Result<i32> {
    let quiet = config.app.behavior.quiet;
    let retrieved = retrieve_revision(&config.file, &config.revision)
        .with_context(|| format!("Failed to retrieve {} at {}", config.file.display(), config.revision))?;

    if !quiet {
        tracing::info!("Comparing {} with the working copy", retrieved.label());
    }

    let labels = InputLabels {
        source: Some(retrieved.label().to_string()),
        target: Some(config.file.display().to_string()),
    };
    let source_name = format!("{}@{}", deck_name(&config.file), config.revision);

    // `retrieved` owns the temp file and must outlive the comparison.
    compare_paths(&config.app, retrieved.path(), &source_name, &config.file, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::sources::RevisionSpec;

    #[test]
    fn test_outside_repository_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("deck.sha256");
        std::fs::write(&file, "").unwrap();
        let config = HistoryConfig {
            file,
            revision: RevisionSpec::head(),
            app: AppConfig::builder().quiet(true).build(),
        };
        assert!(run_history(config).is_err());
    }

    #[test]
    fn test_compares_committed_manifest_with_working_copy() {
        use crate::convert::command_exists;
        use crate::model::{SlideToken, format_manifest_line};
        use crate::pipeline::exit_codes;
        use crate::reports::ReportFormat;
        use std::process::Command;

        if !command_exists("git") {
            return;
        }
        let manifest = |slides: &str| {
            slides
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    format_manifest_line(
                        &SlideToken::of_content(c.to_string().as_bytes()),
                        &format!("slide_{:03}.png", i + 1),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        let dir = tempfile::tempdir().unwrap();
        let git = |args: &[&str]| {
            let status = Command::new("git")
                .arg("-C")
                .arg(dir.path())
                .args(["-c", "user.name=t", "-c", "user.email=t@example.com"])
                .args(args)
                .output()
                .unwrap()
                .status;
            assert!(status.success(), "git {args:?}");
        };
        let file = dir.path().join("talk.sha256");
        git(&["init", "--quiet"]);
        std::fs::write(&file, manifest("ABC")).unwrap();
        git(&["add", "talk.sha256"]);
        git(&["commit", "--quiet", "-m", "v1"]);
        std::fs::write(&file, manifest("ACB")).unwrap();

        let out = dir.path().join("report.json");
        let config = HistoryConfig {
            file,
            revision: RevisionSpec::head(),
            app: AppConfig::builder()
                .quiet(true)
                .fail_on_change(true)
                .output_format(ReportFormat::Json)
                .output_file(Some(out.clone()))
                .build(),
        };
        assert_eq!(run_history(config).unwrap(), exit_codes::CHANGES_DETECTED);

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["summary"]["source_only"], 0);
        assert_eq!(json["summary"]["target_only"], 0);
        assert!(json["metadata"]["source"]["file_path"]
            .as_str()
            .is_some_and(|p| p.ends_with("talk.sha256@HEAD")));
    }
}

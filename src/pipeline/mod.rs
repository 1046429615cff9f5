//! Pipeline orchestration for deck comparisons.
//!
//! Shared load → compare → plan → report logic used by the CLI command
//! handlers.

mod compare_stage;
mod load;
mod output;
mod report_stage;

pub use compare_stage::{Comparison, compute_comparison};
pub use load::{InputKind, LoadedDeck, WorkDir, deck_name, load_deck};
pub use output::{OutputTarget, auto_detect_format, should_use_color, write_output};
pub use report_stage::{InputLabels, output_report};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no differences, or differences without --fail-on-change
    pub const SUCCESS: i32 = 0;
    /// Differences were found and --fail-on-change was set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Exit code for a finished comparison.
#[must_use]
pub const fn exit_code_for(comparison: &Comparison, fail_on_change: bool) -> i32 {
    if fail_on_change && comparison.diff.summary.has_changes() {
        exit_codes::CHANGES_DETECTED
    } else {
        exit_codes::SUCCESS
    }
}

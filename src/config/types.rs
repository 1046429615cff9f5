//! Configuration types for deck-diff operations.

use crate::convert::{ConversionOptions, DEFAULT_DPI, DEFAULT_TIMEOUT_SECS};
use crate::layout::LayoutConfig;
use crate::reports::ReportFormat;
use crate::sources::RevisionSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI flags are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Page layout flags
    pub layout: LayoutConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Rendering of presentations to slide images
    pub conversion: ConversionConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for [`AppConfig`].
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    #[must_use]
    pub const fn suppress_common_slides(mut self, suppress: bool) -> Self {
        self.config.layout.suppress_common_slides = suppress;
        self
    }

    #[must_use]
    pub const fn show_moved_pages(mut self, show: bool) -> Self {
        self.config.layout.show_moved_pages = show;
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    #[must_use]
    pub fn title(mut self, title: Option<String>) -> Self {
        self.config.output.title = title;
        self
    }

    #[must_use]
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    #[must_use]
    pub const fn dpi(mut self, dpi: u32) -> Self {
        self.config.conversion.dpi = dpi;
        self
    }

    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.conversion.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn work_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.conversion.work_dir = dir;
        self
    }

    #[must_use]
    pub const fn keep_images(mut self, keep: bool) -> Self {
        self.config.conversion.keep_images = keep;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Operation Configurations
// ============================================================================

/// Configuration for one `compare` run
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Input paths
    pub paths: ComparePaths,
    /// Settings after merging file and CLI
    pub app: AppConfig,
}

/// Inputs of a comparison
#[derive(Debug, Clone)]
pub struct ComparePaths {
    /// Earlier deck (directory, manifest or presentation)
    pub source: PathBuf,
    /// Later deck
    pub target: PathBuf,
}

/// Configuration for one `history` run
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Working copy of the presentation
    pub file: PathBuf,
    /// Which earlier revision to compare against
    pub revision: RevisionSpec,
    /// Settings after merging file and CLI
    pub app: AppConfig,
}

/// Configuration for one `hash` run
#[derive(Debug, Clone)]
pub struct HashConfig {
    /// Presentation, PDF or image directory
    pub input: PathBuf,
    /// Where to write images and sidecars; a directory next to the input when absent
    pub out_dir: Option<PathBuf>,
    /// Rendering settings
    pub conversion: ConversionConfig,
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Output file path (stdout when absent)
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Custom report title
    pub title: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            no_color: false,
            title: None,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 when the decks differ
    pub fail_on_change: bool,
    /// Suppress informational output
    pub quiet: bool,
}

/// Rendering of presentations to slide images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConversionConfig {
    /// Raster resolution in dots per inch
    pub dpi: u32,
    /// Per-tool timeout in seconds
    pub timeout_secs: u64,
    /// Directory for rendered images; a temporary directory when absent
    pub work_dir: Option<PathBuf>,
    /// Keep rendered images after the run
    pub keep_images: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            work_dir: None,
            keep_images: false,
        }
    }
}

impl ConversionConfig {
    /// Options handed to rasterizers.
    #[must_use]
    pub const fn options(&self) -> ConversionOptions {
        ConversionOptions {
            dpi: self.dpi,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.layout.suppress_common_slides);
        assert!(config.layout.show_moved_pages);
        assert_eq!(config.output.format, ReportFormat::Auto);
        assert_eq!(config.conversion.dpi, 150);
        assert_eq!(config.conversion.timeout_secs, 60);
        assert!(!config.behavior.fail_on_change);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .suppress_common_slides(false)
            .show_moved_pages(false)
            .output_format(ReportFormat::Json)
            .fail_on_change(true)
            .dpi(300)
            .timeout_secs(5)
            .build();
        assert!(!config.layout.suppress_common_slides);
        assert!(!config.layout.show_moved_pages);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_change);
        assert_eq!(config.conversion.options().dpi, 300);
        assert_eq!(config.conversion.options().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("layout:\n  suppress_common_slides: false\n").unwrap();
        assert!(!config.layout.suppress_common_slides);
        assert!(config.layout.show_moved_pages);
        assert_eq!(config.conversion, ConversionConfig::default());
    }
}

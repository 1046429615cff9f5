//! Configuration presets.

use super::types::{AppConfig, BehaviorConfig, ConversionConfig, OutputConfig};
use crate::layout::LayoutConfig;
use crate::reports::ReportFormat;

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Changed slides only, moves annotated
    Default,
    /// Every slide, with images kept for the HTML report
    Review,
    /// JSON output, quiet, fail on any change
    CiCd,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Review => "review",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "review" | "full" => Some(Self::Review),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Show changed slides only, with move arrows",
            Self::Review => "Show every slide side by side as an HTML document with images",
            Self::CiCd => "Machine-readable output that fails the build on any change",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Review, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Review => Self::review_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    /// Review preset.
    ///
    /// - All slides shown, including unchanged ones
    /// - HTML output with rendered images kept on disk
    #[must_use]
    pub fn review_preset() -> Self {
        Self {
            layout: LayoutConfig {
                suppress_common_slides: false,
                show_moved_pages: true,
            },
            output: OutputConfig {
                format: ReportFormat::Html,
                ..OutputConfig::default()
            },
            behavior: BehaviorConfig::default(),
            conversion: ConversionConfig {
                keep_images: true,
                ..ConversionConfig::default()
            },
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Fail on any change
    /// - Quiet mode to reduce noise
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            layout: LayoutConfig::default(),
            output: OutputConfig {
                format: ReportFormat::Json,
                no_color: true,
                ..OutputConfig::default()
            },
            behavior: BehaviorConfig {
                fail_on_change: true,
                quiet: true,
            },
            conversion: ConversionConfig::default(),
        }
    }
}

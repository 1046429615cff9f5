//! Configuration validation.

use super::types::{AppConfig, BehaviorConfig, ConversionConfig, OutputConfig};
use crate::layout::LayoutConfig;
use std::ops::RangeInclusive;

/// Accepted raster resolutions.
pub const DPI_RANGE: RangeInclusive<u32> = 36..=1200;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.layout.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.conversion.validate());
        errors
    }
}

impl Validatable for LayoutConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Every flag combination is valid; an empty plan is reported at planning time
        Vec::new()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent)
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError {
                field: "output.file".to_string(),
                message: format!("Parent directory does not exist: {}", parent.display()),
            });
        }
        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for ConversionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !DPI_RANGE.contains(&self.dpi) {
            errors.push(ConfigError {
                field: "conversion.dpi".to_string(),
                message: format!(
                    "DPI must be between {} and {}, got {}",
                    DPI_RANGE.start(),
                    DPI_RANGE.end(),
                    self.dpi
                ),
            });
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "conversion.timeout_secs".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }
        if let Some(dir) = &self.work_dir
            && dir.exists()
            && !dir.is_dir()
        {
            errors.push(ConfigError {
                field: "conversion.work_dir".to_string(),
                message: format!("Not a directory: {}", dir.display()),
            });
        }
        errors
    }
}

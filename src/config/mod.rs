//! Configuration for deck-diff.
//!
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! The alignment core never reads any of this. Callers build an immutable
//! [`LayoutConfig`](crate::layout::LayoutConfig) from [`AppConfig::layout`]
//! and hand it to the planner.
//!
//! # Configuration File
//!
//! Place a `.deck-diff.yaml` file in your project root or `~/.config/deck-diff/`:
//!
//! ```yaml
//! layout:
//!   suppress_common_slides: false
//! output:
//!   format: html
//! conversion:
//!   dpi: 200
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use file::{
    CONFIG_FILE_NAMES, ConfigFileError, LayoutOverrides, discover_config_file, generate_example_config,
    load_config_file, load_or_default,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, CompareConfig, ComparePaths, ConversionConfig, HashConfig,
    HistoryConfig, OutputConfig,
};
pub use validation::{ConfigError, DPI_RANGE, Validatable};

/// Generate a JSON Schema for the `AppConfig` configuration format.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| crate::error::DeckDiffError::config(format!("schema serialization failed: {e}")))
}

//! Rasterizer trait and conversion options.

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default raster resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 150;

/// Default per-subprocess timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Knobs shared by all rasterizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Raster resolution for slide images
    pub dpi: u32,
    /// Wall-clock limit for each external tool run
    pub timeout: Duration,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ConversionOptions {
    #[must_use]
    pub const fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Turns a presentation file into one image per slide.
///
/// Implementations write their images into `workdir` and return them in
/// slide order. They must not touch anything outside `workdir` other than
/// reading `input`.
pub trait SlideRasterizer: Send + Sync {
    /// Render every slide of `input` to an image file.
    fn rasterize(&self, input: &Path, workdir: &Path) -> Result<Vec<PathBuf>>;

    /// Short name for log messages.
    fn name(&self) -> &'static str;

    /// Lowercase file extensions this rasterizer accepts.
    fn supported_extensions(&self) -> &[&'static str];

    /// Whether `path` has one of the supported extensions.
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.supported_extensions().contains(&ext.as_str())
            })
    }
}

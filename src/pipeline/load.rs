//! Deck loading from any supported input.
//!
//! An input is a directory of slide images or sidecar hashes, a hash
//! manifest, or a presentation that is rendered and hashed first.

use crate::config::ConversionConfig;
use crate::convert::{SlideRasterizer, hash_images, read_sidecars, slide_files};
use crate::error::DeckDiffError;
use crate::model::{Deck, deck_from_manifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Extensions read as hash manifests.
const MANIFEST_EXTENSIONS: &[&str] = &["sha256", "txt", "manifest"];

/// What kind of input a path is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Directory with `slide_NNN.sha256` sidecars or slide images
    Directory,
    /// `sha256sum`-style manifest file
    Manifest,
    /// Presentation or PDF to render
    Presentation,
}

impl InputKind {
    /// Classify `path`; presentations are whatever `rasterizer` supports.
    pub fn detect(path: &Path, rasterizer: &dyn SlideRasterizer) -> crate::error::Result<Self> {
        if path.is_dir() {
            return Ok(Self::Directory);
        }
        if !path.exists() {
            return Err(DeckDiffError::validation(format!(
                "Input not found: {}",
                path.display()
            )));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if MANIFEST_EXTENSIONS.contains(&ext.as_str()) {
            Ok(Self::Manifest)
        } else if rasterizer.supports(path) {
            Ok(Self::Presentation)
        } else {
            Err(DeckDiffError::validation(format!(
                "Unsupported input {}: expected a directory, a manifest ({}) or one of: {}",
                path.display(),
                MANIFEST_EXTENSIONS.join(", "),
                rasterizer.supported_extensions().join(", ")
            )))
        }
    }
}

/// Where rendered slide images live for the duration of a run.
#[derive(Debug)]
pub enum WorkDir {
    /// Removed when dropped
    Temporary(TempDir),
    /// Left on disk
    Kept(PathBuf),
}

impl WorkDir {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Temporary(dir) => dir.path(),
            Self::Kept(path) => path,
        }
    }
}

/// A deck together with the directory backing its images, if any.
#[derive(Debug)]
pub struct LoadedDeck {
    pub deck: Deck,
    pub workdir: Option<WorkDir>,
}

/// Display name for a deck loaded from `path`.
#[must_use]
pub fn deck_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Load one deck.
///
/// `role` names the per-deck subdirectory under a configured work dir, so
/// source and target never share one.
pub fn load_deck(
    path: &Path,
    name: &str,
    role: &str,
    conversion: &ConversionConfig,
    rasterizer: &dyn SlideRasterizer,
    keep_images: bool,
) -> Result<LoadedDeck> {
    let kind = InputKind::detect(path, rasterizer)?;
    tracing::debug!("loading {} as {kind:?}", path.display());

    let (deck, workdir) = match kind {
        InputKind::Directory => (load_directory(path, name)?, None),
        InputKind::Manifest => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
            let image_dir = path.parent().unwrap_or(Path::new("."));
            let deck = deck_from_manifest(name, &content, Some(image_dir))
                .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;
            (deck, None)
        }
        InputKind::Presentation => {
            let workdir = make_workdir(role, conversion, keep_images)?;
            let images = rasterizer
                .rasterize(path, workdir.path())
                .with_context(|| format!("Failed to render {}", path.display()))?;
            let deck = hash_images(name, &images)
                .with_context(|| format!("Failed to hash slides of {}", path.display()))?;
            if let WorkDir::Kept(dir) = &workdir {
                tracing::info!("Slide images for {name} kept in {}", dir.display());
            }
            (deck, Some(workdir))
        }
    };

    tracing::info!("Loaded {} slides from {}", deck.len(), path.display());
    Ok(LoadedDeck { deck, workdir })
}

fn load_directory(dir: &Path, name: &str) -> Result<Deck> {
    if let Some(deck) = read_sidecars(name, dir)
        .with_context(|| format!("Failed to read sidecar hashes in {}", dir.display()))?
    {
        return Ok(deck);
    }

    let images = slide_files(dir, "png")?;
    if images.is_empty() {
        anyhow::bail!(DeckDiffError::validation(format!(
            "No slide_NNN.sha256 sidecars or .png images in {}",
            dir.display()
        )));
    }
    hash_images(name, &images).with_context(|| format!("Failed to hash images in {}", dir.display()))
}

fn make_workdir(role: &str, conversion: &ConversionConfig, keep_images: bool) -> Result<WorkDir> {
    if let Some(base) = &conversion.work_dir {
        let dir = base.join(role);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create work directory {}", dir.display()))?;
        return Ok(WorkDir::Kept(dir));
    }

    let temp = tempfile::Builder::new()
        .prefix(&format!("deck-diff-{role}-"))
        .tempdir()
        .context("Failed to create temporary directory")?;
    if keep_images {
        Ok(WorkDir::Kept(temp.keep()))
    } else {
        Ok(WorkDir::Temporary(temp))
    }
}

//! Hash command handler.
//!
//! Implements the `hash` subcommand: renders a presentation once, writes
//! `slide_NNN.sha256` sidecars next to the images and prints the manifest.
//! The output directory can then be compared without rendering again.

use crate::config::HashConfig;
use crate::convert::{OfficeRasterizer, SlideRasterizer, hash_images, manifest_text, write_sidecars};
use crate::pipeline::{InputKind, OutputTarget, deck_name, exit_codes, load_deck, write_output};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run the hash command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_hash(config: HashConfig) -> Result<i32> {
    let rasterizer = OfficeRasterizer::new(config.conversion.options());
    let name = deck_name(&config.input);
    let kind = InputKind::detect(&config.input, &rasterizer)?;

    let (deck, out_dir) = if kind == InputKind::Presentation {
        let out_dir = config
            .out_dir
            .clone()
            .unwrap_or_else(|| default_out_dir(&config.input));
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create {}", out_dir.display()))?;
        let images = rasterizer
            .rasterize(&config.input, &out_dir)
            .with_context(|| format!("Failed to render {}", config.input.display()))?;
        (hash_images(&name, &images)?, out_dir)
    } else {
        let loaded = load_deck(&config.input, &name, "source", &config.conversion, &rasterizer, false)?;
        let out_dir = config.out_dir.clone().unwrap_or_else(|| match kind {
            InputKind::Directory => config.input.clone(),
            _ => default_out_dir(&config.input),
        });
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create {}", out_dir.display()))?;
        (loaded.deck, out_dir)
    };

    let written = write_sidecars(&deck, &out_dir)?;
    tracing::info!("Wrote {} sidecar hashes to {}", written.len(), out_dir.display());

    write_output(&manifest_text(&deck), &OutputTarget::Stdout, true)?;
    Ok(exit_codes::SUCCESS)
}

/// `<dir>/<stem>_slides` next to the input.
fn default_out_dir(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}_slides", deck_name(input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;
    use crate::convert::read_sidecars;
    use std::fs;

    #[test]
    fn test_default_out_dir() {
        assert_eq!(
            default_out_dir(Path::new("/talks/q3.pptx")),
            PathBuf::from("/talks/q3_slides")
        );
    }

    #[test]
    fn test_hash_image_directory_writes_sidecars_in_place() {
        let dir = tempfile::tempdir().unwrap();
        for (i, content) in ["one", "two"].iter().enumerate() {
            fs::write(dir.path().join(format!("slide_{:03}.png", i + 1)), content).unwrap();
        }
        let config = HashConfig {
            input: dir.path().to_path_buf(),
            out_dir: None,
            conversion: ConversionConfig::default(),
        };
        assert_eq!(run_hash(config).unwrap(), exit_codes::SUCCESS);

        let deck = read_sidecars("d", dir.path()).unwrap().unwrap();
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_unsupported_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.docx");
        fs::write(&input, "x").unwrap();
        let config = HashConfig {
            input,
            out_dir: None,
            conversion: ConversionConfig::default(),
        };
        assert!(run_hash(config).is_err());
    }
}

//! Slide image hashing and sidecar files.

use crate::error::{DeckDiffError, ErrorContext, Result};
use crate::model::manifest::{image_file_name, sidecar_file_name, slide_number};
use crate::model::{Deck, Slide, SlideToken, deck_from_manifest, format_manifest_line};
use rayon::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// SHA-256 of an image file's raw bytes.
pub fn hash_image(path: &Path) -> Result<SlideToken> {
    let file = File::open(path).map_err(|e| DeckDiffError::io(path, e))?;
    SlideToken::of_reader(file).map_err(|e| DeckDiffError::io(path, e))
}

/// Hash slide images given in slide order into a deck.
pub fn hash_images(name: impl Into<String>, images: &[PathBuf]) -> Result<Deck> {
    let tokens = images
        .par_iter()
        .map(|path| hash_image(path))
        .collect::<Result<Vec<_>>>()?;

    let slides = tokens
        .into_iter()
        .zip(images)
        .enumerate()
        .map(|(index, (token, path))| Slide::new(index, token).with_image(path))
        .collect();
    Deck::new(name, slides)
}

/// Manifest text for a deck, one line per slide.
///
/// Slides without an image path are listed under their `slide_NNN.png` name.
#[must_use]
pub fn manifest_text(deck: &Deck) -> String {
    deck.slides()
        .iter()
        .map(|slide| {
            let file_name = slide
                .image
                .as_deref()
                .and_then(Path::file_name)
                .map_or_else(|| image_file_name(slide.number()), |n| n.to_string_lossy().into_owned());
            format_manifest_line(&slide.token, &file_name) + "\n"
        })
        .collect()
}

/// Write one `slide_NNN.sha256` file per slide into `dir`.
pub fn write_sidecars(deck: &Deck, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| DeckDiffError::io(dir, e))?;
    let mut written = Vec::with_capacity(deck.len());
    for slide in deck.slides() {
        let image_name = slide
            .image
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned());
        let number = image_name
            .as_deref()
            .and_then(slide_number)
            .unwrap_or_else(|| slide.number());
        let file_name = image_name.unwrap_or_else(|| image_file_name(number));

        let path = dir.join(sidecar_file_name(number));
        let line = format_manifest_line(&slide.token, &file_name) + "\n";
        fs::write(&path, line).map_err(|e| DeckDiffError::io(&path, e))?;
        written.push(path);
    }
    tracing::debug!("wrote {} sidecar files to {}", written.len(), dir.display());
    Ok(written)
}

/// Files in `dir` with the given extension, ordered by slide number then name.
///
/// Numbered files come before unnumbered ones.
pub fn slide_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DeckDiffError::io(dir, e))? {
        let path = entry.map_err(|e| DeckDiffError::io(dir, e))?.path();
        let matches = path.is_file()
            && path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            files.push(path);
        }
    }
    files.sort_by_cached_key(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (slide_number(&name).unwrap_or(usize::MAX), name)
    });
    Ok(files)
}

/// Deck from the `slide_NNN.sha256` sidecars in `dir`, if there are any.
pub fn read_sidecars(name: impl Into<String>, dir: &Path) -> Result<Option<Deck>> {
    let sidecars: Vec<PathBuf> = slide_files(dir, "sha256")?
        .into_iter()
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .and_then(slide_number)
                .is_some()
        })
        .collect();
    if sidecars.is_empty() {
        return Ok(None);
    }

    let mut content = String::new();
    for path in &sidecars {
        content.push_str(&fs::read_to_string(path).map_err(|e| DeckDiffError::io(path, e))?);
        if !content.ends_with('\n') {
            content.push('\n');
        }
    }
    deck_from_manifest(name, &content, Some(dir))
        .with_context(|| format!("sidecars in {}", dir.display()))
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn images(dir: &TempDir, contents: &[&str]) -> Vec<PathBuf> {
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                let path = dir.path().join(format!("slide_{:03}.png", i + 1));
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_hash_matches_content_token() {
        let dir = TempDir::new().unwrap();
        let paths = images(&dir, &["alpha"]);
        assert_eq!(hash_image(&paths[0]).unwrap(), SlideToken::of_content(b"alpha"));
    }

    #[test]
    fn test_hash_images_keeps_order_and_paths() {
        let dir = TempDir::new().unwrap();
        let paths = images(&dir, &["a", "b", "a"]);
        let deck = hash_images("deck", &paths).unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.slides()[0].token, deck.slides()[2].token);
        assert_eq!(deck.slides()[1].image.as_deref(), Some(paths[1].as_path()));
    }

    #[test]
    fn test_missing_image_is_io_error() {
        let err = hash_image(Path::new("/nonexistent/slide_001.png")).unwrap_err();
        assert!(matches!(err, DeckDiffError::Io { .. }));
    }

    #[test]
    fn test_sidecars_round_trip_through_directory() {
        let dir = TempDir::new().unwrap();
        let paths = images(&dir, &["one", "two"]);
        let deck = hash_images("deck", &paths).unwrap();

        let written = write_sidecars(&deck, dir.path()).unwrap();
        assert_eq!(written[1].file_name().unwrap(), "slide_002.sha256");

        let reread = read_sidecars("deck", dir.path()).unwrap().unwrap();
        assert_eq!(reread.tokens().collect::<Vec<_>>(), deck.tokens().collect::<Vec<_>>());
        assert_eq!(reread.slides()[0].image.as_deref(), Some(paths[0].as_path()));
    }

    #[test]
    fn test_no_sidecars_gives_none() {
        let dir = TempDir::new().unwrap();
        images(&dir, &["x"]);
        assert!(read_sidecars("deck", dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_sidecar_names_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("slide_001.sha256"), "not-a-hash  slide_001.png\n").unwrap();
        match read_sidecars("deck", dir.path()) {
            Err(DeckDiffError::Validation(msg)) => {
                assert!(msg.starts_with("sidecars in "), "unexpected message: {msg}");
                assert!(msg.contains("manifest line 1"), "unexpected message: {msg}");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_slide_files_numeric_order() {
        let dir = TempDir::new().unwrap();
        for name in ["slide_10.png", "slide_2.png", "cover.png", "notes.txt"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let names: Vec<_> = slide_files(dir.path(), "png")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["slide_2.png", "slide_10.png", "cover.png"]);
    }

    #[test]
    fn test_manifest_text_lines() {
        let deck = Deck::from_tokens("d", [SlideToken::of_content(b"a")]);
        let text = manifest_text(&deck);
        assert!(text.ends_with("  slide_001.png\n"));
        assert_eq!(text.len(), 64 + 2 + "slide_001.png".len() + 1);
    }
}

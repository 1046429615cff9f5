//! Hash manifests: the text hand-off between slide hashing and comparison.
//!
//! One slide per line in `sha256sum` layout:
//!
//! ```text
//! 9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08  slide_001.png
//! ```
//!
//! When every file name carries a `slide_<N>` number the deck is ordered by
//! that number, otherwise by line order.

use super::{Deck, Slide, SlideToken};
use crate::error::{DeckDiffError, ErrorContext, OptionContext, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static SLIDE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^slide[_-]?(\d+)\.[a-z0-9]+$").expect("static regex"));

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub token: SlideToken,
    pub file_name: String,
}

/// Extract the 1-based slide number from a `slide_NNN.ext` file name.
///
/// Names whose number does not fit a `usize` yield `None`; use
/// [`parse_slide_number`] where that must be an error.
#[must_use]
pub fn slide_number(file_name: &str) -> Option<usize> {
    parse_slide_number(file_name).ok().flatten()
}

/// Like [`slide_number`], but a `slide_<N>` name with an unparseable number
/// is a validation error rather than "unnumbered".
pub fn parse_slide_number(file_name: &str) -> Result<Option<usize>> {
    let Some(digits) = SLIDE_NUMBER.captures(file_name).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };
    digits
        .as_str()
        .parse()
        .map(Some)
        .map_err(|e| DeckDiffError::validation(format!("slide number in {file_name}: {e}")))
}

/// Image file name for a 1-based slide number.
#[must_use]
pub fn image_file_name(number: usize) -> String {
    format!("slide_{number:03}.png")
}

/// Sidecar hash file name for a 1-based slide number.
#[must_use]
pub fn sidecar_file_name(number: usize) -> String {
    format!("slide_{number:03}.sha256")
}

/// Render one manifest line (without trailing newline).
#[must_use]
pub fn format_manifest_line(token: &SlideToken, file_name: &str) -> String {
    format!("{token}  {file_name}")
}

/// Parse manifest text into entries in deck order.
pub fn parse_manifest(content: &str) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();
    for (line_no, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (hash, name) = line
            .split_once(char::is_whitespace)
            .with_context_none(|| format!("manifest line {}: expected '<hash>  <file>'", line_no + 1))?;
        // sha256sum marks binary mode with a leading '*'
        let name = name.trim().trim_start_matches('*');
        if name.is_empty() {
            return Err(DeckDiffError::validation(format!(
                "manifest line {}: missing file name",
                line_no + 1
            )));
        }
        let token = hash
            .parse::<SlideToken>()
            .with_context(|| format!("manifest line {}", line_no + 1))?;
        entries.push(ManifestEntry {
            token,
            file_name: name.to_string(),
        });
    }

    let numbers = entries
        .iter()
        .enumerate()
        .map(|(i, e)| parse_slide_number(&e.file_name).with_context(|| format!("manifest entry {}", i + 1)))
        .collect::<Result<Vec<_>>>()?;
    let numbers: Option<Vec<usize>> = numbers.into_iter().collect();
    if let Some(numbers) = numbers {
        let mut seen = HashSet::with_capacity(numbers.len());
        for number in &numbers {
            if !seen.insert(*number) {
                return Err(DeckDiffError::validation(format!(
                    "manifest lists slide {number} more than once"
                )));
            }
        }
        let mut keyed: Vec<(usize, ManifestEntry)> = numbers.into_iter().zip(entries).collect();
        keyed.sort_by_key(|(number, _)| *number);
        entries = keyed.into_iter().map(|(_, entry)| entry).collect();
    }

    Ok(entries)
}

/// Build a deck from manifest text.
///
/// When `image_dir` is given, each slide's image path is resolved against it.
pub fn deck_from_manifest(
    name: impl Into<String>,
    content: &str,
    image_dir: Option<&Path>,
) -> Result<Deck> {
    let slides = parse_manifest(content)?
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let slide = Slide::new(index, entry.token);
            match image_dir {
                Some(dir) => slide.with_image(dir.join(&entry.file_name)),
                None => slide,
            }
        })
        .collect();
    Deck::new(name, slides)
}

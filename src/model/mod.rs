//! Deck data model.
//!
//! A [`Deck`] is the ordered list of [`Slide`]s of one presentation, each
//! carrying a [`SlideToken`] computed upstream from the rendered slide image.
//! Decks are validated on construction and never mutated afterwards.

mod deck;
pub mod manifest;
mod token;

pub use deck::{Deck, Slide};
pub use manifest::{ManifestEntry, deck_from_manifest, format_manifest_line, parse_manifest};
pub use token::{SlideToken, TOKEN_LEN};

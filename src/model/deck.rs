//! Slides and decks.

use super::SlideToken;
use crate::error::{DeckDiffError, Result};
use crate::utils::fingerprint_tokens;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One slide of a deck, identified by its position and content token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// 0-based position in its deck
    pub index: usize,
    /// Content identity
    pub token: SlideToken,
    /// Rendered image backing this slide, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl Slide {
    #[must_use]
    pub const fn new(index: usize, token: SlideToken) -> Self {
        Self {
            index,
            token,
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// 1-based slide number as shown to people.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.index + 1
    }
}

/// An ordered, immutable sequence of slides for one presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deck {
    name: String,
    slides: Vec<Slide>,
}

impl Deck {
    /// Build a deck, rejecting duplicate or out-of-place indices.
    pub fn new(name: impl Into<String>, slides: Vec<Slide>) -> Result<Self> {
        let name = name.into();
        let mut seen = vec![false; slides.len()];
        for (position, slide) in slides.iter().enumerate() {
            if slide.index < seen.len() && seen[slide.index] {
                return Err(DeckDiffError::validation(format!(
                    "deck '{name}' has duplicate slide index {}",
                    slide.index
                )));
            }
            if slide.index != position {
                return Err(DeckDiffError::validation(format!(
                    "deck '{name}' has slide index {} at position {position}",
                    slide.index
                )));
            }
            seen[slide.index] = true;
        }
        Ok(Self { name, slides })
    }

    /// Build a deck from tokens in presentation order.
    #[must_use]
    pub fn from_tokens(name: impl Into<String>, tokens: impl IntoIterator<Item = SlideToken>) -> Self {
        let slides = tokens
            .into_iter()
            .enumerate()
            .map(|(index, token)| Slide::new(index, token))
            .collect();
        Self {
            name: name.into(),
            slides,
        }
    }

    /// An empty deck.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slides: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Tokens in presentation order.
    pub fn tokens(&self) -> impl Iterator<Item = &SlideToken> + '_ {
        self.slides.iter().map(|s| &s.token)
    }

    /// Fast fingerprint of the whole token sequence.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        fingerprint_tokens(self.tokens())
    }
}

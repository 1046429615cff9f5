//! Slide alignment and classification.
//!
//! # Architecture
//!
//! - [`AlignmentEngine`] pairs the slides of a source and a target deck
//!   into a [`Pairing`]: anchors (longest order-preserving common
//!   subsequence), moves, and unmatched slides on either side.
//! - [`DiffClassifier`] labels each entry of the pairing as
//!   [`SlideLabel::Stable`], [`SlideLabel::Moved`], [`SlideLabel::SourceOnly`]
//!   or [`SlideLabel::TargetOnly`] and computes move displacements.
//! - [`DeckDiff`] bundles the classified slides with a [`DiffSummary`].
//!
//! Everything here is pure: no I/O, no shared state, decks are only read.
//!
//! # Example
//!
//! ```
//! use deck_diff::diff::{AlignmentEngine, SlideLabel};
//! use deck_diff::model::{Deck, SlideToken};
//!
//! let t = |s: &str| SlideToken::of_content(s.as_bytes());
//! let source = Deck::from_tokens("v1", [t("title"), t("agenda"), t("summary")]);
//! let target = Deck::from_tokens("v2", [t("title"), t("summary")]);
//!
//! let diff = AlignmentEngine::new().compare(&source, &target).unwrap();
//! assert_eq!(diff.summary.source_only, 1);
//! assert_eq!(diff.slides[1].label, SlideLabel::SourceOnly);
//! ```

mod classify;
mod engine;
mod pairing;
mod result;

pub use classify::{ClassifiedSlide, DiffClassifier, MatchRanks, SlideLabel};
pub use engine::AlignmentEngine;
pub use pairing::{Pairing, PairingEntry};
pub use result::{DeckDiff, DiffSummary};

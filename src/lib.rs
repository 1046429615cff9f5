//! **Slide-level diff for presentation decks.**
//!
//! `deck-diff` compares two versions of a slide deck by slide content. Each
//! slide is reduced to an opaque [`SlideToken`] (the SHA-256 of its rendered
//! image), the two token sequences are aligned, every slide is labeled as
//! stable, moved, source-only or target-only, and the result is laid out as
//! side-by-side pages ready for rendering.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Deck`], [`Slide`] and [`SlideToken`], plus the
//!   `sha256sum`-style manifest format decks can be stored in.
//! - **[`diff`]**: the [`AlignmentEngine`] (longest common subsequence with
//!   move pairing) and the [`DiffClassifier`] that labels every slide.
//! - **[`layout`]**: the [`LayoutPlanner`] turning classified slides into
//!   [`PagePlan`]s.
//! - **[`convert`]**: rendering presentations to slide images and hashing them.
//! - **[`sources`]**: retrieving earlier revisions of a deck from git.
//! - **[`reports`]**: summary, JSON, side-by-side terminal and HTML output.
//! - **[`pipeline`]** and **[`cli`]**: load → compare → plan → report.
//!
//! ## Comparing Two Decks
//!
//! ```
//! use deck_diff::{Deck, DeckDiff, LayoutConfig, LayoutPlanner, SlideLabel, SlideToken};
//!
//! fn deck(name: &str, slides: &[&str]) -> Deck {
//!     Deck::from_tokens(name, slides.iter().map(|s| SlideToken::of_content(s.as_bytes())))
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let v1 = deck("v1", &["title", "agenda", "numbers", "thanks"]);
//!     let v2 = deck("v2", &["title", "numbers", "agenda", "thanks"]);
//!
//!     let diff = DeckDiff::compute(&v1, &v2)?;
//!     assert_eq!(diff.with_label(SlideLabel::Moved).count(), 2);
//!
//!     let pages = LayoutPlanner::new(LayoutConfig::default()).plan(&diff.slides)?;
//!     for page in &pages {
//!         println!("{:?} {:?}", page.label, page.move_annotation);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The alignment core is pure: it reads no files, spawns nothing and never
//! consults configuration. Rendering and hashing live in [`convert`].

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Slide counts and page widths are small; usize↔i64/f64 casts are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    // Variable names like `src`/`tgt` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod convert;
pub mod diff;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod sources;
pub mod utils;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use convert::{OfficeRasterizer, SlideRasterizer};
pub use diff::{AlignmentEngine, ClassifiedSlide, DeckDiff, DiffClassifier, DiffSummary, Pairing, SlideLabel};
pub use error::{DeckDiffError, ErrorContext, OptionContext, Result};
pub use layout::{BarColor, LayoutConfig, LayoutPlanner, MoveAnnotation, PagePlan};
pub use model::{Deck, Slide, SlideToken};
pub use reports::{ReportFormat, ReportGenerator};
pub use sources::RevisionSpec;

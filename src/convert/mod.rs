//! Slide materialization: rendering presentations and hashing slide images.
//!
//! These collaborators run before alignment. A [`SlideRasterizer`] renders a
//! presentation to one image per slide, [`hash_images`] turns those images
//! into a [`Deck`](crate::model::Deck), and [`join_decks`] materializes the
//! source and target decks in parallel.

mod hashing;
mod office;
mod traits;

pub use hashing::{hash_image, hash_images, manifest_text, read_sidecars, slide_files, write_sidecars};
pub use office::{OfficeRasterizer, command_exists};
pub use traits::{ConversionOptions, DEFAULT_DPI, DEFAULT_TIMEOUT_SECS, SlideRasterizer};

/// Run two independent loaders in parallel and wait for both.
///
/// The loaders share nothing; the first error (source side first) wins.
pub fn join_decks<S, T, E, A, B>(load_source: A, load_target: B) -> Result<(S, T), E>
where
    A: FnOnce() -> Result<S, E> + Send,
    B: FnOnce() -> Result<T, E> + Send,
    S: Send,
    T: Send,
    E: Send,
{
    let (source, target) = rayon::join(load_source, load_target);
    Ok((source?, target?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeckDiffError, Result};
    use crate::model::{Deck, SlideToken};

    #[test]
    fn test_join_returns_both_sides() {
        let (a, b): (Deck, Deck) = join_decks::<_, _, DeckDiffError, _, _>(
            || Ok(Deck::from_tokens("a", [SlideToken::of_content(b"1")])),
            || Ok(Deck::empty("b")),
        )
        .unwrap();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn test_join_propagates_error() {
        let result: Result<(Deck, Deck)> = join_decks(
            || Ok(Deck::empty("a")),
            || Err(DeckDiffError::validation("bad target")),
        );
        assert!(matches!(result, Err(DeckDiffError::Validation(_))));
    }
}

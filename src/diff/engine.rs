//! Slide alignment engine.
//!
//! Alignment runs in three passes:
//!
//! 1. A canonical longest common subsequence of the two token sequences gives
//!    the anchor matches, the largest set of slides whose relative order is
//!    the same in both decks.
//! 2. The remaining slides are paired greedily in source order against the
//!    first unconsumed target slide with an equal token. These are moves.
//! 3. An anchor that a crossing move could replace without shortening the
//!    anchor chain is itself reported as moved, so that a swap of two slides
//!    is shown on both sides instead of on an arbitrary one.
//!
//! Whatever is left over is source-only or target-only.

use super::classify::DiffClassifier;
use super::pairing::{Pairing, PairingEntry};
use super::result::DeckDiff;
use crate::error::Result;
use crate::model::{Deck, SlideToken};

/// Aligns two decks into a [`Pairing`].
#[derive(Debug, Clone, Copy)]
pub struct AlignmentEngine {
    resolve_ambiguous_swaps: bool,
}

impl AlignmentEngine {
    /// Create an engine with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resolve_ambiguous_swaps: true,
        }
    }

    /// Report anchors that a crossing move could stand in for as moved (default on)
    #[must_use]
    pub const fn resolve_ambiguous_swaps(mut self, enabled: bool) -> Self {
        self.resolve_ambiguous_swaps = enabled;
        self
    }

    /// Align `source` against `target`.
    ///
    /// The returned pairing has already passed [`Pairing::verify`]; a failure
    /// there is reported as an invariant violation and never recovered.
    pub fn align(&self, source: &Deck, target: &Deck) -> Result<Pairing> {
        let src: Vec<&SlideToken> = source.tokens().collect();
        let tgt: Vec<&SlideToken> = target.tokens().collect();

        let anchors = if is_identical(source, target, &src, &tgt) {
            tracing::debug!("decks '{}' and '{}' are identical", source.name(), target.name());
            (0..src.len()).map(|i| (i, i)).collect()
        } else {
            tracing::debug!(
                "building {}x{} alignment table for '{}' vs '{}'",
                src.len() + 1,
                tgt.len() + 1,
                source.name(),
                target.name()
            );
            canonical_lcs(&src, &tgt)
        };

        let mut source_anchored = vec![false; src.len()];
        let mut target_anchored = vec![false; tgt.len()];
        for &(s, t) in &anchors {
            source_anchored[s] = true;
            target_anchored[t] = true;
        }

        let residual_target: Vec<usize> = (0..tgt.len()).filter(|&t| !target_anchored[t]).collect();
        let mut consumed = vec![false; residual_target.len()];
        let mut moved = Vec::new();
        let mut source_only = Vec::new();

        for s in (0..src.len()).filter(|&s| !source_anchored[s]) {
            let hit = residual_target
                .iter()
                .enumerate()
                .find(|&(slot, &t)| !consumed[slot] && tgt[t] == src[s]);
            match hit {
                Some((slot, &t)) => {
                    consumed[slot] = true;
                    moved.push((s, t));
                }
                None => source_only.push(s),
            }
        }

        let target_only: Vec<usize> = residual_target
            .iter()
            .zip(&consumed)
            .filter(|&(_, used)| !used)
            .map(|(&t, _)| t)
            .collect();

        let demoted = if self.resolve_ambiguous_swaps {
            ambiguous_anchors(&anchors, &moved)
        } else {
            vec![false; anchors.len()]
        };

        let mut entries =
            Vec::with_capacity(anchors.len() + moved.len() + source_only.len() + target_only.len());
        for (&(source, target), &demote) in anchors.iter().zip(&demoted) {
            entries.push(if demote {
                PairingEntry::Moved { source, target }
            } else {
                PairingEntry::Anchor { source, target }
            });
        }
        entries.extend(moved.iter().map(|&(source, target)| PairingEntry::Moved { source, target }));
        entries.extend(source_only.iter().map(|&source| PairingEntry::SourceOnly { source }));
        entries.extend(target_only.iter().map(|&target| PairingEntry::TargetOnly { target }));

        let pairing = Pairing::new(entries);
        pairing.verify(source, target)?;

        let (stable, moved_count, src_only, tgt_only) = pairing.counts();
        tracing::debug!(
            "alignment: {} anchors, {} moved ({} demoted), {} source-only, {} target-only",
            stable,
            moved_count,
            demoted.iter().filter(|d| **d).count(),
            src_only,
            tgt_only
        );

        Ok(pairing)
    }

    /// Align and classify in one step.
    pub fn compare(&self, source: &Deck, target: &Deck) -> Result<DeckDiff> {
        let pairing = self.align(source, target)?;
        let slides = DiffClassifier::new().classify(&pairing, source, target)?;
        Ok(DeckDiff::new(slides, source.len(), target.len()))
    }
}

impl Default for AlignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn is_identical(source: &Deck, target: &Deck, src: &[&SlideToken], tgt: &[&SlideToken]) -> bool {
    src.len() == tgt.len() && source.fingerprint() == target.fingerprint() && src == tgt
}

/// Canonical LCS as `(source, target)` index pairs in increasing order.
///
/// Equal tokens are always taken on the diagonal. On a skip tie the target
/// side advances, which keeps the lowest source index available and yields
/// the lexicographically smallest source-index sequence.
fn canonical_lcs(src: &[&SlideToken], tgt: &[&SlideToken]) -> Vec<(usize, usize)> {
    let n = src.len();
    let m = tgt.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    // suffix[i * width + j] = LCS length of src[i..] and tgt[j..]
    let width = m + 1;
    let mut suffix = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            suffix[i * width + j] = if src[i] == tgt[j] {
                suffix[(i + 1) * width + j + 1] + 1
            } else {
                suffix[(i + 1) * width + j].max(suffix[i * width + j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(suffix[0] as usize);
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < m {
        if src[i] == tgt[j] {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if suffix[i * width + j + 1] >= suffix[(i + 1) * width + j] {
            j += 1;
        } else {
            i += 1;
        }
    }
    pairs
}

/// Flags anchors that some moved pair could replace while keeping the chain
/// strictly increasing on both sides.
fn ambiguous_anchors(anchors: &[(usize, usize)], moved: &[(usize, usize)]) -> Vec<bool> {
    let mut demoted = vec![false; anchors.len()];
    if moved.is_empty() {
        return demoted;
    }
    for (k, flag) in demoted.iter_mut().enumerate() {
        let lower = k.checked_sub(1).map(|p| anchors[p]);
        let upper = anchors.get(k + 1).copied();
        *flag = moved.iter().any(|&(s, t)| {
            let above = lower.is_none_or(|(ls, lt)| s > ls && t > lt);
            let below = upper.is_none_or(|(us, ut)| s < us && t < ut);
            above && below
        });
    }
    demoted
}

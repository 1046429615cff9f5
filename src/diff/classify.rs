//! Classification of a raw pairing into labeled slides.

use super::pairing::{Pairing, PairingEntry};
use crate::error::{DeckDiffError, Result};
use crate::model::{Deck, Slide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a slide between the two decks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLabel {
    /// Present in both decks, relative order unchanged
    Stable,
    /// Present in both decks, repositioned
    Moved,
    /// Only in the source deck
    SourceOnly,
    /// Only in the target deck
    TargetOnly,
}

impl SlideLabel {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Stable | Self::Moved)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Moved => "moved",
            Self::SourceOnly => "source-only",
            Self::TargetOnly => "target-only",
        }
    }
}

impl fmt::Display for SlideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of a matched slide among the matched slides of each deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRanks {
    pub source: usize,
    pub target: usize,
}

/// One labeled slide (or matched pair of slides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSlide {
    pub entry: PairingEntry,
    pub label: SlideLabel,
    /// Target rank minus source rank; only set for moved pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displacement: Option<i64>,
    /// Ranks within the matched subsequences; set for stable and moved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranks: Option<MatchRanks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Slide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Slide>,
}

/// Turns a [`Pairing`] into an ordered list of [`ClassifiedSlide`]s.
///
/// Output order: entries with a source side by source index, followed by
/// target-only entries by target index.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffClassifier;

impl DiffClassifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    pub fn classify(
        &self,
        pairing: &Pairing,
        source: &Deck,
        target: &Deck,
    ) -> Result<Vec<ClassifiedSlide>> {
        let source_ranks = match_ranks(pairing, source.len(), PairingEntry::source);
        let target_ranks = match_ranks(pairing, target.len(), PairingEntry::target);

        let mut classified = Vec::with_capacity(pairing.len());
        for entry in pairing.entries() {
            let source_slide = entry.source().map(|s| lookup(source, s)).transpose()?;
            let target_slide = entry.target().map(|t| lookup(target, t)).transpose()?;

            let (label, ranks) = match *entry {
                PairingEntry::Anchor { source, target } => (
                    SlideLabel::Stable,
                    ranks_for(&source_ranks, &target_ranks, source, target),
                ),
                PairingEntry::Moved { source, target } => (
                    SlideLabel::Moved,
                    ranks_for(&source_ranks, &target_ranks, source, target),
                ),
                PairingEntry::SourceOnly { .. } => (SlideLabel::SourceOnly, None),
                PairingEntry::TargetOnly { .. } => (SlideLabel::TargetOnly, None),
            };
            let displacement = match (label, ranks) {
                (SlideLabel::Moved, Some(r)) => Some(r.target as i64 - r.source as i64),
                _ => None,
            };

            classified.push(ClassifiedSlide {
                entry: *entry,
                label,
                displacement,
                ranks,
                source: source_slide,
                target: target_slide,
            });
        }

        classified.sort_by_key(|c| match (c.entry.source(), c.entry.target()) {
            (Some(s), _) => (0, s),
            (None, Some(t)) => (1, t),
            (None, None) => (2, 0),
        });

        Ok(classified)
    }
}

fn lookup(deck: &Deck, index: usize) -> Result<Slide> {
    deck.get(index).cloned().ok_or_else(|| {
        DeckDiffError::invariant(format!(
            "pairing refers to slide {index} outside deck '{}'",
            deck.name()
        ))
    })
}

/// Rank of each slide within the ordered subsequence of matched slides of one deck.
fn match_ranks(
    pairing: &Pairing,
    len: usize,
    side: fn(&PairingEntry) -> Option<usize>,
) -> Vec<Option<usize>> {
    let mut matched = vec![false; len];
    for entry in pairing.entries().iter().filter(|e| e.is_match()) {
        if let Some(i) = side(entry).filter(|&i| i < len) {
            matched[i] = true;
        }
    }
    let mut next = 0;
    matched
        .into_iter()
        .map(|m| {
            m.then(|| {
                next += 1;
                next - 1
            })
        })
        .collect()
}

fn ranks_for(
    source_ranks: &[Option<usize>],
    target_ranks: &[Option<usize>],
    source: usize,
    target: usize,
) -> Option<MatchRanks> {
    Some(MatchRanks {
        source: source_ranks.get(source).copied().flatten()?,
        target: target_ranks.get(target).copied().flatten()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::AlignmentEngine;
    use crate::model::SlideToken;

    fn deck(labels: &str) -> Deck {
        Deck::from_tokens(
            labels,
            labels.chars().map(|c| SlideToken::of_content(c.to_string().as_bytes())),
        )
    }

    fn classify(source: &str, target: &str) -> Vec<ClassifiedSlide> {
        let (s, t) = (deck(source), deck(target));
        let pairing = AlignmentEngine::new().align(&s, &t).unwrap();
        DiffClassifier::new().classify(&pairing, &s, &t).unwrap()
    }

    #[test]
    fn test_swap_displacements() {
        let slides = classify("ABCD", "ACBD");
        let labels: Vec<_> = slides.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            [SlideLabel::Stable, SlideLabel::Moved, SlideLabel::Moved, SlideLabel::Stable]
        );
        assert_eq!(slides[1].displacement, Some(1));
        assert_eq!(slides[2].displacement, Some(-1));
        assert_eq!(slides[0].displacement, None);
    }

    #[test]
    fn test_ranks_skip_unmatched_slides() {
        // X is deleted, so B keeps rank 1 on the source side
        let slides = classify("AXB", "BA");
        let b = slides
            .iter()
            .find(|c| c.entry.source() == Some(2))
            .unwrap();
        let ranks = b.ranks.unwrap();
        assert_eq!(ranks.source, 1);
        assert_eq!(ranks.target, 0);
    }

    #[test]
    fn test_order_source_then_target_only() {
        let slides = classify("AB", "ZA");
        let keys: Vec<_> = slides.iter().map(|c| (c.entry.source(), c.entry.target())).collect();
        assert_eq!(keys, [(Some(0), Some(1)), (Some(1), None), (None, Some(0))]);
        assert_eq!(slides[1].label, SlideLabel::SourceOnly);
        assert_eq!(slides[2].label, SlideLabel::TargetOnly);
    }

    #[test]
    fn test_slides_are_attached() {
        let slides = classify("A", "A");
        assert_eq!(slides[0].source.as_ref().map(|s| s.index), Some(0));
        assert_eq!(slides[0].target.as_ref().map(|s| s.index), Some(0));
    }

    #[test]
    fn test_rejects_out_of_range_entry() {
        let s = deck("A");
        let t = deck("A");
        let pairing = Pairing::new(vec![PairingEntry::Anchor { source: 5, target: 0 }]);
        assert!(DiffClassifier::new().classify(&pairing, &s, &t).is_err());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(SlideLabel::SourceOnly.to_string(), "source-only");
        assert!(SlideLabel::Moved.is_match());
        assert!(!SlideLabel::TargetOnly.is_match());
    }
}

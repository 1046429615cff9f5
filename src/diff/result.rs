//! Comparison result types.

use super::classify::{ClassifiedSlide, SlideLabel};
use super::engine::AlignmentEngine;
use crate::error::Result;
use crate::model::Deck;
use serde::Serialize;

/// Classified slides of one comparison plus their summary.
#[derive(Debug, Clone, Serialize)]
pub struct DeckDiff {
    pub slides: Vec<ClassifiedSlide>,
    pub summary: DiffSummary,
}

impl DeckDiff {
    #[must_use]
    pub fn new(slides: Vec<ClassifiedSlide>, source_slides: usize, target_slides: usize) -> Self {
        let summary = DiffSummary::from_slides(&slides, source_slides, target_slides);
        Self { slides, summary }
    }

    /// Align and classify two decks with the default engine.
    pub fn compute(source: &Deck, target: &Deck) -> Result<Self> {
        AlignmentEngine::new().compare(source, target)
    }

    /// Slides carrying the given label, in classification order.
    pub fn with_label(&self, label: SlideLabel) -> impl Iterator<Item = &ClassifiedSlide> + '_ {
        self.slides.iter().filter(move |c| c.label == label)
    }
}

/// Counts per label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub source_slides: usize,
    pub target_slides: usize,
    pub stable: usize,
    pub moved: usize,
    pub source_only: usize,
    pub target_only: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn from_slides(slides: &[ClassifiedSlide], source_slides: usize, target_slides: usize) -> Self {
        let mut summary = Self {
            source_slides,
            target_slides,
            ..Self::default()
        };
        for slide in slides {
            match slide.label {
                SlideLabel::Stable => summary.stable += 1,
                SlideLabel::Moved => summary.moved += 1,
                SlideLabel::SourceOnly => summary.source_only += 1,
                SlideLabel::TargetOnly => summary.target_only += 1,
            }
        }
        summary
    }

    /// Whether anything other than stable slides was found.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.moved + self.source_only + self.target_only > 0
    }

    /// Share of slides that are stable, counted over both decks.
    #[must_use]
    pub fn similarity(&self) -> f64 {
        let total = self.source_slides + self.target_slides;
        if total == 0 {
            return 1.0;
        }
        (2 * self.stable) as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SlideToken;

    fn deck(labels: &str) -> Deck {
        Deck::from_tokens(
            labels,
            labels.chars().map(|c| SlideToken::of_content(c.to_string().as_bytes())),
        )
    }

    #[test]
    fn test_summary_counts() {
        let diff = AlignmentEngine::new().compare(&deck("ABCD"), &deck("ACBDE")).unwrap();
        assert_eq!(diff.summary.stable, 2);
        assert_eq!(diff.summary.moved, 2);
        assert_eq!(diff.summary.target_only, 1);
        assert!(diff.summary.has_changes());
        assert_eq!(diff.with_label(SlideLabel::Moved).count(), 2);
    }

    #[test]
    fn test_similarity() {
        let same = AlignmentEngine::new().compare(&deck("AB"), &deck("AB")).unwrap();
        assert!(!same.summary.has_changes());
        assert!((same.summary.similarity() - 1.0).abs() < f64::EPSILON);

        let empty = AlignmentEngine::new().compare(&deck(""), &deck("")).unwrap();
        assert!((empty.summary.similarity() - 1.0).abs() < f64::EPSILON);

        let disjoint = DeckDiff::compute(&deck("AB"), &deck("CD")).unwrap();
        assert!(disjoint.summary.similarity().abs() < f64::EPSILON);
    }
}

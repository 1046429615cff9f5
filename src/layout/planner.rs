//! Page planning for side-by-side rendering.

use crate::diff::{ClassifiedSlide, SlideLabel};
use crate::error::{DeckDiffError, Result};
use crate::model::Slide;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Layout flags. Passed explicitly to the planner; nothing is read from
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LayoutConfig {
    /// Omit stable slides from the output entirely
    pub suppress_common_slides: bool,
    /// Emit pages in source order with move arrows; when false, group pages by label
    pub show_moved_pages: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            suppress_common_slides: true,
            show_moved_pages: true,
        }
    }
}

/// Color of the bar drawn next to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Grey,
    Red,
    Green,
}

impl BarColor {
    #[must_use]
    pub const fn for_label(label: SlideLabel) -> Self {
        match label {
            SlideLabel::Stable | SlideLabel::Moved => Self::Grey,
            SlideLabel::SourceOnly => Self::Red,
            SlideLabel::TargetOnly => Self::Green,
        }
    }
}

/// Arrow drawn for a moved slide, between ranks among matched slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAnnotation {
    pub from_rank: usize,
    pub to_rank: usize,
}

impl MoveAnnotation {
    /// Signed distance; positive means the slide moved later in the deck.
    #[must_use]
    pub const fn displacement(&self) -> i64 {
        self.to_rank as i64 - self.from_rank as i64
    }
}

/// One output page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePlan {
    pub left: Option<Slide>,
    pub right: Option<Slide>,
    pub bar_color: BarColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_annotation: Option<MoveAnnotation>,
    pub label: SlideLabel,
}

impl PagePlan {
    fn from_classified(slide: &ClassifiedSlide, annotate: bool) -> Self {
        let move_annotation = match (annotate, slide.label, slide.ranks) {
            (true, SlideLabel::Moved, Some(ranks)) => Some(MoveAnnotation {
                from_rank: ranks.source,
                to_rank: ranks.target,
            }),
            _ => None,
        };
        Self {
            left: slide.source.clone(),
            right: slide.target.clone(),
            bar_color: BarColor::for_label(slide.label),
            move_annotation,
            label: slide.label,
        }
    }
}

/// Turns classified slides into an ordered list of pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutPlanner {
    config: LayoutConfig,
}

impl LayoutPlanner {
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Plan pages in render order.
    ///
    /// Fails with a recoverable layout error when `classified` is non-empty
    /// but the configuration leaves no page to show.
    pub fn plan(&self, classified: &[ClassifiedSlide]) -> Result<Vec<PagePlan>> {
        let ordered = if self.config.show_moved_pages {
            interleaved_order(classified)
        } else {
            grouped_order(classified)
        };

        let pages: Vec<PagePlan> = ordered
            .into_iter()
            .filter(|c| !(self.config.suppress_common_slides && c.label == SlideLabel::Stable))
            .map(|c| PagePlan::from_classified(c, self.config.show_moved_pages))
            .collect();

        tracing::debug!(
            "planned {} pages from {} classified slides (suppress_common={}, show_moved={})",
            pages.len(),
            classified.len(),
            self.config.suppress_common_slides,
            self.config.show_moved_pages
        );

        if pages.is_empty() && !classified.is_empty() {
            return Err(DeckDiffError::empty_plan(classified.len()));
        }
        Ok(pages)
    }
}

/// Source order, with each target-only slide placed right after the stable
/// anchor that precedes it in the target deck (or at the start).
fn interleaved_order(classified: &[ClassifiedSlide]) -> Vec<&ClassifiedSlide> {
    let mut sourced: Vec<&ClassifiedSlide> =
        classified.iter().filter(|c| c.entry.source().is_some()).collect();
    sourced.sort_by_key(|c| c.entry.source());

    let mut inserted: Vec<&ClassifiedSlide> = classified
        .iter()
        .filter(|c| c.label == SlideLabel::TargetOnly)
        .collect();
    inserted.sort_by_key(|c| c.entry.target());

    // Stable anchors by target index, to find the nearest one before each insertion
    let mut anchors: Vec<(usize, usize)> = classified
        .iter()
        .filter(|c| c.label == SlideLabel::Stable)
        .filter_map(|c| Some((c.entry.target()?, c.entry.source()?)))
        .collect();
    anchors.sort_unstable();

    let mut leading = Vec::new();
    let mut after_anchor: Vec<(usize, &ClassifiedSlide)> = Vec::new();
    for slide in inserted {
        let t = slide.entry.target().unwrap_or(0);
        let before = anchors.partition_point(|&(anchor_t, _)| anchor_t < t);
        match before.checked_sub(1).map(|k| anchors[k].1) {
            Some(anchor_source) => after_anchor.push((anchor_source, slide)),
            None => leading.push(slide),
        }
    }

    let mut ordered = Vec::with_capacity(classified.len());
    ordered.extend(leading);
    for slide in sourced {
        ordered.push(slide);
        if slide.label == SlideLabel::Stable {
            let s = slide.entry.source();
            ordered.extend(
                after_anchor
                    .iter()
                    .filter(|(anchor_source, _)| Some(*anchor_source) == s)
                    .map(|(_, inserted)| *inserted),
            );
        }
    }
    ordered
}

/// Matched slides in source order, then source-only, then target-only.
fn grouped_order(classified: &[ClassifiedSlide]) -> Vec<&ClassifiedSlide> {
    let mut matched: Vec<&ClassifiedSlide> =
        classified.iter().filter(|c| c.label.is_match()).collect();
    matched.sort_by_key(|c| c.entry.source());

    let mut removed: Vec<&ClassifiedSlide> = classified
        .iter()
        .filter(|c| c.label == SlideLabel::SourceOnly)
        .collect();
    removed.sort_by_key(|c| c.entry.source());

    let mut added: Vec<&ClassifiedSlide> = classified
        .iter()
        .filter(|c| c.label == SlideLabel::TargetOnly)
        .collect();
    added.sort_by_key(|c| c.entry.target());

    matched.into_iter().chain(removed).chain(added).collect()
}

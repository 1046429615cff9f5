//! Comparison stage: align, classify and plan pages.

use crate::diff::{AlignmentEngine, DeckDiff};
use crate::layout::{LayoutConfig, LayoutPlanner, PagePlan};
use crate::model::Deck;
use anyhow::{Context, Result};

/// Output of the comparison stage.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub diff: DeckDiff,
    /// Pages in render order; empty when the layout left nothing to show
    pub pages: Vec<PagePlan>,
}

/// Compare two loaded decks and plan the pages to render.
///
/// An empty plan from non-empty input is not an error here: it is logged
/// and the reporters render their empty-result notice.
pub fn compute_comparison(source: &Deck, target: &Deck, layout: LayoutConfig, quiet: bool) -> Result<Comparison> {
    if !quiet {
        tracing::info!(
            "Comparing {} ({} slides) with {} ({} slides)",
            source.name(),
            source.len(),
            target.name(),
            target.len()
        );
    }

    let diff = AlignmentEngine::new()
        .compare(source, target)
        .context("Slide alignment failed")?;

    let pages = match LayoutPlanner::new(layout).plan(&diff.slides) {
        Ok(pages) => pages,
        Err(e) if e.is_recoverable() => {
            if !quiet {
                tracing::info!("{e}");
            }
            Vec::new()
        }
        Err(e) => return Err(e).context("Layout planning failed"),
    };

    if !quiet {
        let s = &diff.summary;
        tracing::info!(
            "{} stable, {} moved, {} only in source, {} only in target",
            s.stable,
            s.moved,
            s.source_only,
            s.target_only
        );
    }

    Ok(Comparison { diff, pages })
}

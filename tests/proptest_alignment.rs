//! Property-based tests for alignment, classification and layout.
//!
//! Decks are drawn from a small alphabet so that shared, repeated and
//! reordered slides are all common.

use deck_diff::{
    AlignmentEngine, BarColor, Deck, DeckDiff, LayoutConfig, LayoutPlanner, SlideLabel, SlideToken,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn deck(name: &str, symbols: &[u8]) -> Deck {
    Deck::from_tokens(name, symbols.iter().map(|s| SlideToken::of_content(&[*s])))
}

fn symbols(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..6, 0..max_len)
}

fn distinct_symbols(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::hash_set(0u8..40, 0..max_len)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn pairing_covers_every_slide_once(a in symbols(14), b in symbols(14)) {
        let (source, target) = (deck("s", &a), deck("t", &b));
        let pairing = AlignmentEngine::new().align(&source, &target).unwrap();

        let mut seen_source = HashSet::new();
        let mut seen_target = HashSet::new();
        for entry in pairing.entries() {
            prop_assert!(entry.source().is_some() || entry.target().is_some());
            if let Some(s) = entry.source() {
                prop_assert!(seen_source.insert(s), "source {} paired twice", s);
            }
            if let Some(t) = entry.target() {
                prop_assert!(seen_target.insert(t), "target {} paired twice", t);
            }
        }
        prop_assert_eq!(seen_source.len(), a.len());
        prop_assert_eq!(seen_target.len(), b.len());
        prop_assert!(pairing.verify(&source, &target).is_ok());
    }

    #[test]
    fn matches_pair_equal_tokens(a in symbols(14), b in symbols(14)) {
        let diff = DeckDiff::compute(&deck("s", &a), &deck("t", &b)).unwrap();
        for slide in diff.slides.iter().filter(|c| c.label.is_match()) {
            let (s, t) = (slide.source.as_ref().unwrap(), slide.target.as_ref().unwrap());
            prop_assert_eq!(s.token, t.token);
        }
    }

    #[test]
    fn stable_slides_keep_relative_order(a in symbols(14), b in symbols(14)) {
        let diff = DeckDiff::compute(&deck("s", &a), &deck("t", &b)).unwrap();
        let targets: Vec<usize> = diff
            .with_label(SlideLabel::Stable)
            .map(|c| c.entry.target().unwrap())
            .collect();
        prop_assert!(targets.windows(2).all(|w| w[0] < w[1]), "{:?}", targets);
    }

    #[test]
    fn moved_counts_match_on_both_sides(a in symbols(14), b in symbols(14)) {
        let diff = DeckDiff::compute(&deck("s", &a), &deck("t", &b)).unwrap();
        let moved: Vec<_> = diff.with_label(SlideLabel::Moved).collect();
        let with_source = moved.iter().filter(|c| c.entry.source().is_some()).count();
        let with_target = moved.iter().filter(|c| c.entry.target().is_some()).count();
        prop_assert_eq!(with_source, with_target);
        prop_assert!(moved.iter().all(|c| c.displacement.is_some()));
    }

    #[test]
    fn summary_adds_up(a in symbols(14), b in symbols(14)) {
        let diff = DeckDiff::compute(&deck("s", &a), &deck("t", &b)).unwrap();
        let s = diff.summary;
        prop_assert_eq!(s.stable + s.moved + s.source_only, a.len());
        prop_assert_eq!(s.stable + s.moved + s.target_only, b.len());
    }

    #[test]
    fn comparing_a_deck_with_itself_is_all_matches(a in symbols(16)) {
        let d = deck("s", &a);
        let diff = DeckDiff::compute(&d, &d).unwrap();
        prop_assert_eq!(diff.summary.source_only, 0);
        prop_assert_eq!(diff.summary.target_only, 0);
        prop_assert_eq!(diff.summary.stable + diff.summary.moved, a.len());
    }

    #[test]
    fn distinct_deck_with_itself_is_all_stable(a in distinct_symbols(20)) {
        let d = deck("s", &a);
        let diff = DeckDiff::compute(&d, &d).unwrap();
        prop_assert_eq!(diff.summary.stable, a.len());
        prop_assert!(!diff.summary.has_changes());
    }

    #[test]
    fn suppression_leaves_no_plain_grey_pages(a in symbols(12), b in symbols(12), moved_pages in any::<bool>()) {
        let diff = DeckDiff::compute(&deck("s", &a), &deck("t", &b)).unwrap();
        let planner = LayoutPlanner::new(LayoutConfig {
            suppress_common_slides: true,
            show_moved_pages: moved_pages,
        });
        if let Ok(pages) = planner.plan(&diff.slides) {
            for page in &pages {
                prop_assert!(page.label != SlideLabel::Stable);
                if page.bar_color == BarColor::Grey {
                    prop_assert_eq!(page.label, SlideLabel::Moved);
                }
            }
        }
    }

    #[test]
    fn unsuppressed_plan_shows_every_entry(a in symbols(12), b in symbols(12), moved_pages in any::<bool>()) {
        let diff = DeckDiff::compute(&deck("s", &a), &deck("t", &b)).unwrap();
        let planner = LayoutPlanner::new(LayoutConfig {
            suppress_common_slides: false,
            show_moved_pages: moved_pages,
        });
        let pages = planner.plan(&diff.slides).unwrap();
        prop_assert_eq!(pages.len(), diff.slides.len());
        if !moved_pages {
            prop_assert!(pages.iter().all(|p| p.move_annotation.is_none()));
        }
    }

    #[test]
    fn bar_color_follows_label(a in symbols(12), b in symbols(12)) {
        let diff = DeckDiff::compute(&deck("s", &a), &deck("t", &b)).unwrap();
        let planner = LayoutPlanner::new(LayoutConfig {
            suppress_common_slides: false,
            show_moved_pages: true,
        });
        for page in planner.plan(&diff.slides).unwrap() {
            let expected = match page.label {
                SlideLabel::Stable | SlideLabel::Moved => BarColor::Grey,
                SlideLabel::SourceOnly => BarColor::Red,
                SlideLabel::TargetOnly => BarColor::Green,
            };
            prop_assert_eq!(page.bar_color, expected);
        }
    }
}

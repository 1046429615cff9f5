#![no_main]
use deck_diff::{AlignmentEngine, Deck, LayoutConfig, LayoutPlanner, SlideToken};
use libfuzzer_sys::fuzz_target;

/// Fuzz alignment, classification and layout.
///
/// The input is split at the first zero byte into two decks; every other
/// byte is one slide, so repeats and reorders are frequent. Alignment must
/// never report an invariant violation.
fuzz_target!(|data: &[u8]| {
    let split = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let (left, right) = data.split_at(split);
    let right = right.get(1..).unwrap_or_default();

    let deck = |name: &str, bytes: &[u8]| {
        Deck::from_tokens(name, bytes.iter().map(|b| SlideToken::of_content(&[*b])))
    };
    let (source, target) = (deck("source", left), deck("target", right));

    let diff = AlignmentEngine::new()
        .compare(&source, &target)
        .expect("alignment invariants hold");
    for show_moved_pages in [true, false] {
        let _ = LayoutPlanner::new(LayoutConfig {
            suppress_common_slides: true,
            show_moved_pages,
        })
        .plan(&diff.slides);
    }
});

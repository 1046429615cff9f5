#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the hash manifest parser.
///
/// Feeds arbitrary UTF-8 text to `deck_from_manifest`, which parses hash
/// lines, orders them by slide number and builds a deck.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = deck_diff::model::deck_from_manifest("fuzz", s, None);
    }
});

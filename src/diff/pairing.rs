//! Raw slide pairing produced by the alignment step.

use crate::error::{DeckDiffError, Result};
use crate::model::Deck;
use serde::{Deserialize, Serialize};

/// One tuple of the pairing relation.
///
/// Every slide of both decks appears in exactly one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PairingEntry {
    /// Match kept in relative order (part of the anchor subsequence)
    Anchor { source: usize, target: usize },
    /// Match between slides whose relative order changed
    Moved { source: usize, target: usize },
    /// Source slide with no counterpart
    SourceOnly { source: usize },
    /// Target slide with no counterpart
    TargetOnly { target: usize },
}

impl PairingEntry {
    #[must_use]
    pub const fn source(&self) -> Option<usize> {
        match *self {
            Self::Anchor { source, .. } | Self::Moved { source, .. } | Self::SourceOnly { source } => {
                Some(source)
            }
            Self::TargetOnly { .. } => None,
        }
    }

    #[must_use]
    pub const fn target(&self) -> Option<usize> {
        match *self {
            Self::Anchor { target, .. } | Self::Moved { target, .. } | Self::TargetOnly { target } => {
                Some(target)
            }
            Self::SourceOnly { .. } => None,
        }
    }

    /// Whether both sides are present.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Anchor { .. } | Self::Moved { .. })
    }
}

/// The full pairing between a source and a target deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    entries: Vec<PairingEntry>,
}

impl Pairing {
    #[must_use]
    pub const fn new(entries: Vec<PairingEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[PairingEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of each kind: (anchor, moved, source-only, target-only).
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        self.entries
            .iter()
            .fold((0, 0, 0, 0), |(a, m, s, t), entry| match entry {
                PairingEntry::Anchor { .. } => (a + 1, m, s, t),
                PairingEntry::Moved { .. } => (a, m + 1, s, t),
                PairingEntry::SourceOnly { .. } => (a, m, s + 1, t),
                PairingEntry::TargetOnly { .. } => (a, m, s, t + 1),
            })
    }

    /// Check the one-to-one and full-coverage invariants against both decks,
    /// and that matched slides really carry equal tokens.
    pub fn verify(&self, source: &Deck, target: &Deck) -> Result<()> {
        let mut source_seen = vec![false; source.len()];
        let mut target_seen = vec![false; target.len()];

        for entry in &self.entries {
            if let Some(s) = entry.source() {
                let seen = source_seen.get_mut(s).ok_or_else(|| {
                    DeckDiffError::invariant(format!("source index {s} out of range"))
                })?;
                if *seen {
                    return Err(DeckDiffError::invariant(format!(
                        "source slide {s} appears in more than one entry"
                    )));
                }
                *seen = true;
            }
            if let Some(t) = entry.target() {
                let seen = target_seen.get_mut(t).ok_or_else(|| {
                    DeckDiffError::invariant(format!("target index {t} out of range"))
                })?;
                if *seen {
                    return Err(DeckDiffError::invariant(format!(
                        "target slide {t} appears in more than one entry"
                    )));
                }
                *seen = true;
            }
            if let (true, Some(s), Some(t)) = (entry.is_match(), entry.source(), entry.target()) {
                let equal = matches!(
                    (source.get(s), target.get(t)),
                    (Some(a), Some(b)) if a.token == b.token
                );
                if !equal {
                    return Err(DeckDiffError::invariant(format!(
                        "source slide {s} and target slide {t} paired with different tokens"
                    )));
                }
            }
        }

        if let Some(missing) = source_seen.iter().position(|seen| !seen) {
            return Err(DeckDiffError::invariant(format!(
                "source slide {missing} is not covered"
            )));
        }
        if let Some(missing) = target_seen.iter().position(|seen| !seen) {
            return Err(DeckDiffError::invariant(format!(
                "target slide {missing} is not covered"
            )));
        }
        Ok(())
    }
}

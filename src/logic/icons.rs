// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Icon matching against a theme's icon inventory.
//!
//! Token evidence is tried before synonym evidence: the filename itself is
//! the most direct signal, synonyms only widen recall for icons whose
//! basenames do not lexically resemble the filename (filename `ubu22`,
//! icon `ubuntu`). There is deliberately no minimum token length: a short
//! generic token may over-match, and the operator settles it through the
//! disambiguation prompt rather than a guessed threshold.

use crate::logic::tokenize::tokenize;

/// Outcome of matching one filename against the icon inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconMatch {
    /// Exactly one icon fits.
    Unique(String),
    /// Several icons fit; the operator must choose. Candidates keep
    /// inventory order, synonym-only matches appended last.
    Ambiguous(Vec<String>),
    /// Nothing fits; the missing-icon fallback applies.
    NotFound,
}

/// Match `filename` (and the resolved identity's `synonyms`) against the
/// lowercase icon basenames in `inventory`.
///
/// A basename is a candidate when any filename token is contained in it or
/// it is contained in a token, or when any synonym is contained in it.
pub fn resolve_icon(filename: &str, synonyms: &[String], inventory: &[String]) -> IconMatch {
    let tokens = tokenize(filename);
    let mut candidates: Vec<String> = Vec::new();

    for basename in inventory {
        let hit = tokens
            .iter()
            .any(|token| basename.contains(token.as_str()) || token.contains(basename.as_str()));
        if hit && !candidates.contains(basename) {
            candidates.push(basename.clone());
        }
    }

    for synonym in synonyms {
        for basename in inventory {
            if basename.contains(synonym.as_str()) && !candidates.contains(basename) {
                candidates.push(basename.clone());
            }
        }
    }

    match candidates.len() {
        0 => IconMatch::NotFound,
        1 => IconMatch::Unique(candidates.remove(0)),
        _ => IconMatch::Ambiguous(candidates),
    }
}

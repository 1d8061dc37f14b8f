// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Tiered OS-identity resolution from filename evidence.
//!
//! Tier order trades recall for precision: exact token equality cannot
//! false-positive across a delimiter boundary, while the substring tiers
//! recover mangled filenames that lack delimiters entirely. The order must
//! not change.

use tracing::debug;

use crate::logic::tokenize::tokenize;
use crate::models::MappingStore;

/// A resolved OS identity: the store key plus the synonyms to feed into
/// icon matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub key: String,
    pub synonyms: Vec<String>,
}

/// Resolve `filename` against the mapping store.
///
/// Tiers, first hit wins:
/// 1. a filename token equals a store key → that key and its full synonym
///    list;
/// 2. a store key is a substring of the lowercased filename → that key and
///    its full synonym list;
/// 3. a synonym of any key is a substring of the lowercased filename → its
///    key and just the matching synonym.
///
/// `None` means the caller must ask the operator.
pub fn resolve(filename: &str, store: &MappingStore) -> Option<Identity> {
    for token in tokenize(filename) {
        if let Some(synonyms) = store.synonyms(&token) {
            debug!(%filename, key = %token, tier = 1, "identity resolved");
            return Some(Identity {
                key: token,
                synonyms: synonyms.to_vec(),
            });
        }
    }

    let joined = filename.to_lowercase();
    for (key, synonyms) in store.iter() {
        if joined.contains(key) {
            debug!(%filename, %key, tier = 2, "identity resolved");
            return Some(Identity {
                key: key.to_string(),
                synonyms: synonyms.to_vec(),
            });
        }
    }

    for (key, synonyms) in store.iter() {
        for synonym in synonyms {
            if joined.contains(synonym.as_str()) {
                debug!(%filename, %key, %synonym, tier = 3, "identity resolved");
                return Some(Identity {
                    key: key.to_string(),
                    synonyms: vec![synonym.clone()],
                });
            }
        }
    }

    debug!(%filename, "no identity tier matched");
    None
}

#[cfg(test)]
mod tests {
    use super::{Identity, resolve};
    use crate::models::MappingStore;

    fn store_with(entries: &[(&str, &[&str])]) -> MappingStore {
        let mut store = MappingStore::default();
        for (key, synonyms) in entries {
            store.insert(*key, synonyms.iter().map(|s| s.to_string()).collect());
        }
        store
    }

    #[test]
    fn exact_token_match_returns_the_full_synonym_list() {
        let store = store_with(&[("ubuntu", &["ubuntu", "ubu"])]);

        assert_eq!(
            resolve("ubuntu-22.04", &store),
            Some(Identity {
                key: "ubuntu".into(),
                synonyms: vec!["ubuntu".into(), "ubu".into()],
            })
        );
    }

    // A filename with no delimiters still resolves when a key is embedded
    // in it.
    #[test]
    fn key_substring_matches_undelimited_filenames() {
        let store = store_with(&[("debian", &["debian"])]);

        assert_eq!(
            resolve("mydebianlive", &store),
            Some(Identity {
                key: "debian".into(),
                synonyms: vec!["debian".into()],
            })
        );
    }

    // Synonym matches narrow the list to the one synonym that hit.
    #[test]
    fn synonym_substring_returns_only_the_matching_synonym() {
        let store = store_with(&[("ubuntu", &["ubuntu", "ubu"])]);

        assert_eq!(
            resolve("ubu22", &store),
            Some(Identity {
                key: "ubuntu".into(),
                synonyms: vec!["ubu".into()],
            })
        );
    }

    #[test]
    fn token_boundaries_prevent_false_positives() {
        // "debug" must not resolve to "debian": no token equals the key and
        // the key is not a substring of the filename.
        let store = store_with(&[("debian", &["debian"])]);
        assert_eq!(resolve("debug-tools", &store), None);
    }

    #[test]
    fn unmatched_filename_yields_none() {
        let store = store_with(&[("fedora", &["fedora"])]);
        assert_eq!(resolve("haiku-r1beta4", &store), None);
    }
}

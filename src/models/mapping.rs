// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Persisted mapping from canonical OS keys to synonym spellings.
//!
//! The store is the knowledge base the identity resolver matches against:
//! each key is a lowercase OS identifier and its value lists alternate
//! spellings, the first being the canonical display token. It grows when
//! the operator names an OS the resolver could not place, and it is passed
//! explicitly to every resolver call instead of living in global state.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::utils::write_json_pretty;

/// Filename of the mapping store inside the Ventoy configuration directory.
pub const STORE_FILE: &str = "os_mappings.json";

/// Mapping from OS key to its non-empty list of synonym tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingStore {
    entries: BTreeMap<String, Vec<String>>,
}

impl MappingStore {
    /// Load the store from `path`. A missing file yields an empty store;
    /// only unreadable or malformed content is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            debug!(path = %path.display(), "mapping store absent, starting empty");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping store {:?}", path))?;
        let entries: BTreeMap<String, Vec<String>> = serde_json::from_str(&text)
            .with_context(|| format!("Mapping store {:?} is not valid JSON", path))?;
        Ok(Self { entries })
    }

    /// Persist the store to `path` as 4-space-indented JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_pretty(path, &self.entries)
            .with_context(|| format!("Failed to persist mapping store {:?}", path))
    }

    /// Synonyms recorded for `key`, if any.
    pub fn synonyms(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Iterate all `(key, synonyms)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a key with its synonym list, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, synonyms: Vec<String>) {
        self.entries.insert(key.into(), synonyms);
    }

    /// Record an operator-supplied identity for `filename`.
    ///
    /// The key is the alphanumeric-stripped lowercase filename, the value a
    /// single-element synonym list holding the lowercased answer. Returns
    /// the key so callers can reuse the fresh entry for icon matching.
    /// Persistence is the caller's decision; a failed write must not undo
    /// the in-memory resolution.
    pub fn learn(&mut self, filename: &str, answer: &str) -> String {
        let key = normalized_key(filename);
        let synonym = answer.to_lowercase();
        info!(%key, %synonym, "learned OS mapping");
        self.entries.insert(key.clone(), vec![synonym]);
        key
    }
}

/// Strip everything but ASCII alphanumerics from the lowercased filename.
pub fn normalized_key(filename: &str) -> String {
    filename
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

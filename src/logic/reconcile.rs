// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Pure merge of classification results into the menu entry list.

use std::collections::BTreeMap;

use crate::models::MenuEntry;

/// Merge `new_classifications` over `existing`, drop entries whose key is
/// no longer among `volume_keys`, and emit the result sorted by key.
///
/// The output is rebuilt wholesale on every run, so stale or duplicate rows
/// cannot accumulate and re-running with identical inputs is idempotent.
/// All I/O (listing the volume, writing the config) belongs to the
/// caller.
pub fn reconcile(
    existing: &[MenuEntry],
    volume_keys: &[String],
    new_classifications: &[MenuEntry],
) -> Vec<MenuEntry> {
    let mut merged: BTreeMap<String, String> = existing
        .iter()
        .map(|entry| (entry.key.clone(), entry.class.clone()))
        .collect();

    for entry in new_classifications {
        merged.insert(entry.key.clone(), entry.class.clone());
    }

    merged.retain(|key, _| volume_keys.iter().any(|k| k == key));

    merged
        .into_iter()
        .map(|(key, class)| MenuEntry { key, class })
        .collect()
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! JSON persistence helper shared by the mapping store and the menu config.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize `value` with 4-space indentation and write it to `path`.
///
/// Ventoy ships its configuration pretty-printed with 4 spaces, and the
/// mapping store follows the same convention, so both writers funnel
/// through here instead of `serde_json::to_string_pretty` (which indents
/// with 2).
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .with_context(|| format!("Failed to serialize JSON for {:?}", path))?;
    buf.push(b'\n');
    fs::write(path, &buf).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::write_json_pretty;

    // The on-disk format must use 4-space indentation to stay diffable
    // against configs written by Ventoy itself.
    #[test]
    fn write_json_pretty_indents_with_four_spaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sample.json");

        let mut map = BTreeMap::new();
        map.insert("ubuntu".to_string(), vec!["ubuntu".to_string()]);
        write_json_pretty(&path, &map).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("    \"ubuntu\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn write_json_pretty_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("roundtrip.json");

        let mut map = BTreeMap::new();
        map.insert("debian".to_string(), vec!["debian".to_string(), "deb".to_string()]);
        write_json_pretty(&path, &map).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: BTreeMap<String, Vec<String>> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, map);
    }
}

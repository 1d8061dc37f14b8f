// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Ventoy boot-menu configuration file access.
//!
//! The config is kept as a raw JSON object because Ventoy stores many
//! sections this tool does not own (menu tips, password, resolution, ...).
//! Only `menu_class` and `theme.file` get typed accessors; everything else
//! survives a rewrite untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::write_json_pretty;

/// Canonical configuration filename. Lookup is case-insensitive so a
/// `Ventoy.json` written by another tool interoperates.
pub const CONFIG_FILE: &str = "ventoy.json";

/// One row of the boot menu: ISO filename (without extension) and the icon
/// class shown next to it. `class` is an icon basename from the active
/// theme, the `"unknown"` sentinel, or `""` when no icon is available.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub key: String,
    pub class: String,
}

impl MenuEntry {
    pub fn new(key: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            class: class.into(),
        }
    }
}

/// In-memory Ventoy configuration, loaded once per operation and written
/// back wholesale after reconciliation.
#[derive(Clone, Debug, PartialEq)]
pub struct BootConfig {
    root: serde_json::Map<String, Value>,
}

impl BootConfig {
    /// Find the configuration file inside `dir`, matching the name
    /// case-insensitively. A missing file is fatal: there is no menu to
    /// classify into.
    pub fn locate(dir: &Path) -> Result<PathBuf> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to list configuration directory {:?}", dir))?;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().eq_ignore_ascii_case(CONFIG_FILE) && entry.path().is_file() {
                return Ok(entry.path());
            }
        }
        Err(anyhow!(
            "No {} found in {:?}; cannot classify without a boot-menu configuration",
            CONFIG_FILE,
            dir
        ))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {:?}", path))?;
        let root: serde_json::Map<String, Value> = serde_json::from_str(&text)
            .with_context(|| format!("Configuration {:?} is not a JSON object", path))?;
        Ok(Self { root })
    }

    /// Write the whole configuration back with 4-space indentation.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_pretty(path, &self.root)
            .with_context(|| format!("Failed to persist configuration {:?}", path))
    }

    /// Parsed `menu_class` rows. An absent array means no entries yet.
    pub fn entries(&self) -> Result<Vec<MenuEntry>> {
        match self.root.get("menu_class") {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone())
                .context("menu_class entries are malformed"),
        }
    }

    /// Replace `menu_class` wholesale. Callers pass the reconciled, sorted
    /// entry list; no in-place patching happens here.
    pub fn set_entries(&mut self, entries: &[MenuEntry]) -> Result<()> {
        let value = serde_json::to_value(entries).context("Failed to encode menu_class")?;
        self.root.insert("menu_class".to_string(), value);
        Ok(())
    }

    /// Raw `theme.file` path, e.g. `/ventoy/Themes/Matrix/theme.txt`.
    pub fn theme_file(&self) -> Option<&str> {
        self.root.get("theme")?.get("file")?.as_str()
    }

    /// Active theme name extracted from `theme.file`.
    pub fn theme_name(&self) -> Option<&str> {
        theme_name_from_path(self.theme_file()?)
    }

    /// Point `theme.file` at `theme`, keeping whatever root prefix the
    /// existing value used (`/ventoy`, `/Ventoy`, ...).
    pub fn set_theme(&mut self, theme: &str) {
        let previous = self.theme_file().map(str::to_owned);
        let value = theme_file_value(previous.as_deref(), theme);

        let theme_obj = self
            .root
            .entry("theme".to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Value::Object(map) = theme_obj {
            map.insert("file".to_string(), Value::String(value));
        } else {
            let mut map = serde_json::Map::new();
            map.insert("file".to_string(), Value::String(value));
            *theme_obj = Value::Object(map);
        }
    }
}

/// Extract the theme name from a `/<Root>/Themes/<Name>/theme.txt` path.
fn theme_name_from_path(path: &str) -> Option<&str> {
    let rest = path.split_once("/Themes/")?.1;
    let (name, _) = rest.split_once('/')?;
    if name.is_empty() { None } else { Some(name) }
}

/// Build a `theme.file` value for `theme`, reusing the root prefix of the
/// previous value when it has the expected shape.
fn theme_file_value(previous: Option<&str>, theme: &str) -> String {
    let prefix = previous
        .and_then(|p| p.split_once("/Themes/"))
        .map(|(prefix, _)| prefix)
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or("/ventoy");
    format!("{}/Themes/{}/theme.txt", prefix, theme)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{BootConfig, MenuEntry, theme_file_value, theme_name_from_path};

    fn config_from(text: &str) -> BootConfig {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ventoy.json");
        std::fs::write(&path, text).unwrap();
        BootConfig::load(&path).unwrap()
    }

    #[test]
    fn theme_name_parses_the_segment_after_themes() {
        assert_eq!(
            theme_name_from_path("/ventoy/Themes/Matrix/theme.txt"),
            Some("Matrix")
        );
        assert_eq!(
            theme_name_from_path("/Ventoy/Themes/blur-dark/theme.txt"),
            Some("blur-dark")
        );
        assert_eq!(theme_name_from_path("/ventoy/theme.txt"), None);
        assert_eq!(theme_name_from_path("/ventoy/Themes//theme.txt"), None);
    }

    #[test]
    fn theme_file_value_preserves_the_existing_root_prefix() {
        assert_eq!(
            theme_file_value(Some("/Ventoy/Themes/old/theme.txt"), "new"),
            "/Ventoy/Themes/new/theme.txt"
        );
        assert_eq!(
            theme_file_value(Some("garbage"), "new"),
            "/ventoy/Themes/new/theme.txt"
        );
        assert_eq!(theme_file_value(None, "new"), "/ventoy/Themes/new/theme.txt");
    }

    #[test]
    fn locate_matches_case_insensitively_and_reports_absence() {
        let tmp = TempDir::new().unwrap();
        assert!(BootConfig::locate(tmp.path()).is_err());

        std::fs::write(tmp.path().join("Ventoy.json"), "{}").unwrap();
        let found = BootConfig::locate(tmp.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "Ventoy.json");
    }

    #[test]
    fn entries_parse_and_absent_array_is_empty() {
        let config = config_from(r#"{"menu_class": [{"key": "a", "class": "ubuntu"}]}"#);
        assert_eq!(config.entries().unwrap(), vec![MenuEntry::new("a", "ubuntu")]);

        let empty = config_from("{}");
        assert!(empty.entries().unwrap().is_empty());
    }

    // Rewriting menu_class must not disturb sections this tool does not own.
    #[test]
    fn save_preserves_unrelated_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ventoy.json");
        std::fs::write(
            &path,
            r#"{"control": [{"VTOY_DEFAULT_SEARCH_ROOT": "/"}], "theme": {"file": "/ventoy/Themes/Matrix/theme.txt", "gfxmode": "1920x1080"}}"#,
        )
        .unwrap();

        let mut config = BootConfig::load(&path).unwrap();
        config
            .set_entries(&[MenuEntry::new("fedora-38", "fedora")])
            .unwrap();
        config.save(&path).unwrap();

        let reloaded = BootConfig::load(&path).unwrap();
        assert_eq!(reloaded.theme_name(), Some("Matrix"));
        assert_eq!(
            reloaded.entries().unwrap(),
            vec![MenuEntry::new("fedora-38", "fedora")]
        );
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("VTOY_DEFAULT_SEARCH_ROOT"));
        assert!(text.contains("gfxmode"));
    }

    #[test]
    fn set_theme_updates_the_file_path_in_place() {
        let mut config =
            config_from(r#"{"theme": {"file": "/Ventoy/Themes/Matrix/theme.txt"}}"#);
        config.set_theme("Nord");
        assert_eq!(config.theme_file(), Some("/Ventoy/Themes/Nord/theme.txt"));
        assert_eq!(config.theme_name(), Some("Nord"));
    }

    #[test]
    fn set_theme_creates_the_section_when_missing() {
        let mut config = config_from("{}");
        config.set_theme("Nord");
        assert_eq!(config.theme_file(), Some("/ventoy/Themes/Nord/theme.txt"));
    }
}

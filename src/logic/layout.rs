// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Filesystem layout of a Ventoy-prepared USB drive.
//!
//! The tool runs from the configuration directory (usually `<drive>/ventoy`);
//! ISO images live one level up at the drive root, themes under `Themes/`
//! next to the configuration. All enumeration helpers live here so the
//! engine and the UI agree on what is on the drive.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::mapping::STORE_FILE;

/// Paths and listings for one drive, rooted at the configuration directory.
#[derive(Clone, Debug)]
pub struct DriveLayout {
    config_dir: PathBuf,
}

impl DriveLayout {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Layout rooted at the process working directory, the way the tool is
    /// launched from the drive itself.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Ok(Self::new(cwd))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the mapping store file.
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(STORE_FILE)
    }

    /// Drive root holding the ISO images (parent of the config directory).
    pub fn volume_root(&self) -> PathBuf {
        self.config_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config_dir.clone())
    }

    /// Menu keys for every ISO at the drive root: filename without the
    /// `.iso` extension (matched case-insensitively), original case kept,
    /// sorted for deterministic processing order.
    pub fn iso_keys(&self) -> Result<Vec<String>> {
        let root = self.volume_root();
        let entries = fs::read_dir(&root)
            .with_context(|| format!("Failed to list drive root {:?}", root))?;

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_iso = path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("iso"));
            if is_iso && let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.config_dir.join("Themes")
    }

    /// Installed themes: subdirectories of `Themes/` that carry a
    /// `theme.txt`. A missing `Themes/` directory lists as empty; whether
    /// that is fatal is the caller's call.
    pub fn themes(&self) -> Result<Vec<String>> {
        let dir = self.themes_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries =
            fs::read_dir(&dir).with_context(|| format!("Failed to list themes in {:?}", dir))?;

        let mut themes = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_dir()
                && path.join("theme.txt").is_file()
                && let Some(name) = path.file_name().and_then(|n| n.to_str())
            {
                themes.push(name.to_string());
            }
        }
        themes.sort();
        Ok(themes)
    }

    pub fn icon_dir(&self, theme: &str) -> PathBuf {
        self.themes_dir().join(theme).join("icons")
    }

    /// Lowercase basenames of every `.png` under the theme's icon
    /// directory, sorted. Listed fresh on every call; the inventory must
    /// never be cached across theme changes or manual installs.
    pub fn icon_inventory(&self, theme: &str) -> Result<Vec<String>> {
        let dir = self.icon_dir(theme);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries =
            fs::read_dir(&dir).with_context(|| format!("Failed to list icons in {:?}", dir))?;

        let mut icons = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_png = path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if is_png && let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                icons.push(stem.to_lowercase());
            }
        }
        icons.sort();
        Ok(icons)
    }

    /// Path of one icon, for previews.
    pub fn icon_path(&self, theme: &str, basename: &str) -> PathBuf {
        self.icon_dir(theme).join(format!("{}.png", basename))
    }

    /// Whether the theme ships the `unknown.png` fallback icon.
    pub fn has_unknown_icon(&self, theme: &str) -> bool {
        self.icon_path(theme, "unknown").is_file()
    }

    /// Copy a user-picked image into the theme as `<class_name>.png`.
    pub fn install_icon(&self, theme: &str, class_name: &str, source: &Path) -> Result<()> {
        let target = self.icon_path(theme, class_name);
        fs::copy(source, &target)
            .with_context(|| format!("Failed to copy icon {:?} to {:?}", source, target))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::DriveLayout;

    /// Build `<tmp>/ventoy` plus drive-root files for listing tests.
    fn drive() -> (TempDir, DriveLayout) {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().join("ventoy");
        std::fs::create_dir_all(&config_dir).unwrap();
        let layout = DriveLayout::new(&config_dir);
        (tmp, layout)
    }

    fn touch(path: &std::path::Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn iso_keys_strip_extension_and_ignore_other_files() {
        let (tmp, layout) = drive();
        touch(&tmp.path().join("ubuntu-22.04.iso"));
        touch(&tmp.path().join("Windows11.ISO"));
        touch(&tmp.path().join("notes.txt"));

        assert_eq!(
            layout.iso_keys().unwrap(),
            vec!["Windows11".to_string(), "ubuntu-22.04".to_string()]
        );
    }

    #[test]
    fn themes_require_a_theme_txt() {
        let (_tmp, layout) = drive();
        touch(&layout.themes_dir().join("Matrix/theme.txt"));
        std::fs::create_dir_all(layout.themes_dir().join("Broken")).unwrap();

        assert_eq!(layout.themes().unwrap(), vec!["Matrix".to_string()]);
    }

    #[test]
    fn missing_themes_dir_lists_empty() {
        let (_tmp, layout) = drive();
        assert!(layout.themes().unwrap().is_empty());
    }

    #[test]
    fn icon_inventory_lowercases_png_basenames() {
        let (_tmp, layout) = drive();
        touch(&layout.icon_dir("Matrix").join("Ubuntu.png"));
        touch(&layout.icon_dir("Matrix").join("debian.png"));
        touch(&layout.icon_dir("Matrix").join("readme.md"));

        assert_eq!(
            layout.icon_inventory("Matrix").unwrap(),
            vec!["debian".to_string(), "ubuntu".to_string()]
        );
    }

    #[test]
    fn install_icon_lands_in_the_theme_icon_dir() {
        let (tmp, layout) = drive();
        std::fs::create_dir_all(layout.icon_dir("Matrix")).unwrap();
        let source = tmp.path().join("picked.png");
        std::fs::write(&source, b"png-bytes").unwrap();

        layout.install_icon("Matrix", "haiku-r1", &source).unwrap();

        let installed = layout.icon_path("Matrix", "haiku-r1");
        assert_eq!(std::fs::read(installed).unwrap(), b"png-bytes");
        assert!(!layout.has_unknown_icon("Matrix"));
    }
}

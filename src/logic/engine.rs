// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Classification engine driving the boot-menu workflows.
//!
//! Each operation is strictly sequential: one ISO is fully classified
//! (identity, icon, any operator prompts) before the next begins, and the
//! configuration is written once per batch after a full reconcile. The
//! mapping store is written immediately after every learned entry so a
//! crash never loses operator knowledge.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::{info, warn};

use crate::logic::icons::{IconMatch, resolve_icon};
use crate::logic::identity;
use crate::logic::interact::{FallbackAction, Interact, OsAnswer};
use crate::logic::layout::DriveLayout;
use crate::logic::reconcile::reconcile;
use crate::models::{BootConfig, MappingStore, MenuEntry};

/// Summary of a classification or rescan run for the status surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// ISOs classified (or re-scanned) this run.
    pub processed: usize,
    /// Menu entries in the configuration after reconciliation.
    pub total_entries: usize,
    /// Non-fatal problems the operator should hear about.
    pub warnings: Vec<String>,
}

/// Drive state for the main screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriveSnapshot {
    /// Active theme extracted from `theme.file`.
    pub theme: String,
    /// Installed themes, sorted.
    pub themes: Vec<String>,
    /// Every ISO currently on the drive.
    pub total_isos: usize,
    /// ISOs with no menu entry yet, in processing order.
    pub new_isos: Vec<String>,
    /// Rows currently in `menu_class`.
    pub entry_count: usize,
    /// Keys in the mapping store.
    pub known_systems: usize,
}

/// Read everything the main screen shows. Fails on the fatal
/// preconditions: missing configuration, unparseable active theme, or a
/// drive without a single installed theme.
pub fn snapshot(layout: &DriveLayout) -> Result<DriveSnapshot> {
    let store = MappingStore::load(&layout.store_path())?;
    let config_path = BootConfig::locate(layout.config_dir())?;
    let config = BootConfig::load(&config_path)?;
    let theme = active_theme(&config)?;

    let themes = layout.themes()?;
    if themes.is_empty() {
        return Err(anyhow!(
            "No themes with a theme.txt found under {:?}",
            layout.themes_dir()
        ));
    }

    let entries = config.entries()?;
    let known: HashSet<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    let volume = layout.iso_keys()?;
    let new_isos: Vec<String> = volume
        .iter()
        .filter(|key| !known.contains(key.as_str()))
        .cloned()
        .collect();

    Ok(DriveSnapshot {
        theme,
        themes,
        total_isos: volume.len(),
        new_isos,
        entry_count: entries.len(),
        known_systems: store.len(),
    })
}

/// Classify every ISO that has no menu entry yet, then reconcile and write
/// the configuration.
pub fn classify_new_isos(layout: &DriveLayout, interact: &dyn Interact) -> Result<RunReport> {
    let store_path = layout.store_path();
    let mut store = MappingStore::load(&store_path)?;
    let config_path = BootConfig::locate(layout.config_dir())?;
    let mut config = BootConfig::load(&config_path)?;
    let theme = active_theme(&config)?;

    let existing = config.entries()?;
    let volume = layout.iso_keys()?;
    let known: HashSet<&str> = existing.iter().map(|e| e.key.as_str()).collect();
    let pending: Vec<String> = volume
        .iter()
        .filter(|key| !known.contains(key.as_str()))
        .cloned()
        .collect();

    info!(count = pending.len(), %theme, "classifying new ISOs");
    let mut warnings = Vec::new();
    let mut fresh = Vec::new();
    for key in &pending {
        let (detected, synonyms) =
            resolve_or_ask(key, &mut store, &store_path, interact, &mut warnings);
        let class = assign_icon(
            layout,
            &theme,
            key,
            detected.as_deref(),
            &synonyms,
            interact,
            &mut warnings,
        )?;
        info!(%key, %class, "classified");
        fresh.push(MenuEntry::new(key.as_str(), class));
    }

    let total_entries = write_reconciled(&mut config, &config_path, &existing, &volume, &fresh)?;
    Ok(RunReport {
        processed: fresh.len(),
        total_entries,
        warnings,
    })
}

/// Re-run icon resolution for every ISO on the drive against the active
/// theme, reusing known identities instead of prompting for them.
pub fn rescan_icons(layout: &DriveLayout, interact: &dyn Interact) -> Result<RunReport> {
    let store = MappingStore::load(&layout.store_path())?;
    let config_path = BootConfig::locate(layout.config_dir())?;
    let mut config = BootConfig::load(&config_path)?;
    let theme = active_theme(&config)?;

    let existing = config.entries()?;
    let volume = layout.iso_keys()?;

    info!(count = volume.len(), %theme, "rescanning icons");
    let mut warnings = Vec::new();
    let mut fresh = Vec::new();
    for key in &volume {
        // No identity prompt during a rescan: fall back to the class
        // already on record when the store cannot place the filename.
        let (detected, synonyms) = match identity::resolve(key, &store) {
            Some(identity) => (Some(display_token(&identity)), identity.synonyms),
            None => {
                let recorded = existing
                    .iter()
                    .find(|entry| &entry.key == key)
                    .map(|entry| entry.class.clone())
                    .filter(|class| !class.is_empty());
                (None, recorded.map(|class| vec![class]).unwrap_or_default())
            }
        };
        let class = assign_icon(
            layout,
            &theme,
            key,
            detected.as_deref(),
            &synonyms,
            interact,
            &mut warnings,
        )?;
        info!(%key, %class, "rescanned");
        fresh.push(MenuEntry::new(key.as_str(), class));
    }

    let total_entries = write_reconciled(&mut config, &config_path, &existing, &volume, &fresh)?;
    Ok(RunReport {
        processed: fresh.len(),
        total_entries,
        warnings,
    })
}

/// Point the configuration at another installed theme.
pub fn change_theme(layout: &DriveLayout, theme: &str) -> Result<()> {
    let config_path = BootConfig::locate(layout.config_dir())?;
    let mut config = BootConfig::load(&config_path)?;
    config.set_theme(theme);
    config.save(&config_path)?;
    info!(%theme, "theme switched");
    Ok(())
}

fn active_theme(config: &BootConfig) -> Result<String> {
    config.theme_name().map(str::to_string).ok_or_else(|| {
        anyhow!(
            "Active theme could not be read from theme.file {:?}",
            config.theme_file().unwrap_or("<absent>")
        )
    })
}

fn display_token(identity: &identity::Identity) -> String {
    identity
        .synonyms
        .first()
        .cloned()
        .unwrap_or_else(|| identity.key.clone())
}

/// Resolve the identity automatically or ask the operator, committing the
/// answer to the mapping store. A failed store write is a warning, never
/// an abort: the in-memory resolution already succeeded.
fn resolve_or_ask(
    key: &str,
    store: &mut MappingStore,
    store_path: &Path,
    interact: &dyn Interact,
    warnings: &mut Vec<String>,
) -> (Option<String>, Vec<String>) {
    if let Some(identity) = identity::resolve(key, store) {
        let display = display_token(&identity);
        return (Some(display), identity.synonyms);
    }

    match interact.classify_os(key) {
        OsAnswer::Named(name) => {
            let synonym = name.to_lowercase();
            store.learn(key, &name);
            if let Err(err) = store.save(store_path) {
                warn!(%key, error = %err, "mapping store write failed");
                warnings.push(format!(
                    "Learned mapping for '{}' was not saved and will not survive this run: {:#}",
                    key, err
                ));
            }
            (Some(synonym.clone()), vec![synonym])
        }
        OsAnswer::Unknown => (None, Vec::new()),
    }
}

/// Pick an icon class for one ISO, walking the match → disambiguation →
/// missing-icon ladder. Always returns a class: a real basename, the
/// `"unknown"` sentinel, or `""` when the theme lacks `unknown.png`.
fn assign_icon(
    layout: &DriveLayout,
    theme: &str,
    key: &str,
    detected: Option<&str>,
    synonyms: &[String],
    interact: &dyn Interact,
    warnings: &mut Vec<String>,
) -> Result<String> {
    // Fresh inventory on every call: a manual install for the previous ISO
    // must be visible to this one.
    let inventory = layout.icon_inventory(theme)?;
    let chosen = match resolve_icon(key, synonyms, &inventory) {
        IconMatch::Unique(name) => Some(name),
        IconMatch::Ambiguous(candidates) => interact.choose_icon(key, &candidates),
        IconMatch::NotFound => None,
    };
    if let Some(name) = chosen {
        return Ok(name);
    }

    if interact.missing_icon_action(key, detected) == FallbackAction::PickManually {
        if let Some(source) = interact.pick_icon_file() {
            match layout.install_icon(theme, key, &source) {
                Ok(()) => {
                    info!(%key, source = %source.display(), "manual icon installed");
                    return Ok(key.to_string());
                }
                Err(err) => {
                    warn!(%key, error = %err, "manual icon install failed");
                    warnings.push(format!("Could not install an icon for '{}': {:#}", key, err));
                }
            }
        }
    }

    if layout.has_unknown_icon(theme) {
        Ok("unknown".to_string())
    } else {
        warnings.push(format!(
            "Theme '{}' has no unknown.png; '{}' keeps an empty icon class",
            theme, key
        ));
        Ok(String::new())
    }
}

/// Merge, prune, and persist in one step, returning the entry count. The
/// configuration on disk is only touched after the full merge succeeded.
fn write_reconciled(
    config: &mut BootConfig,
    config_path: &Path,
    existing: &[MenuEntry],
    volume: &[String],
    fresh: &[MenuEntry],
) -> Result<usize> {
    let merged = reconcile(existing, volume, fresh);
    config.set_entries(&merged)?;
    config.save(config_path)?;
    info!(entries = merged.len(), "menu configuration written");
    Ok(merged.len())
}

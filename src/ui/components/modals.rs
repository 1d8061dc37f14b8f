// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Simple centered modal windows: errors, warnings, confirmations, the
//! theme picker, and the post-switch rescan offer.

use eframe::egui;

use crate::mvu::{AppModel, Msg};

fn modal<'a>(title: &'a str) -> egui::Window<'a> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
}

/// Render a modal window for the latest error message.
pub fn error_modal(ctx: &egui::Context, model: &AppModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    if let Some(message) = &model.error {
        modal("Error").show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                msgs.push(Msg::DismissError);
            }
        });
    }
    msgs
}

/// Render non-fatal warnings from the last run.
pub fn warnings_modal(ctx: &egui::Context, model: &AppModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    if !model.warnings.is_empty() && model.error.is_none() {
        modal("Warnings").show(ctx, |ui| {
            for warning in &model.warnings {
                ui.label(format!("• {}", warning));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                msgs.push(Msg::DismissWarnings);
            }
        });
    }
    msgs
}

/// Confirmation step before classifying a batch of new ISOs.
pub fn confirm_classify_modal(ctx: &egui::Context, model: &AppModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    let Some(snapshot) = &model.snapshot else {
        return msgs;
    };
    if model.confirm_classify {
        modal("Classify new ISOs").show(ctx, |ui| {
            ui.label(format!(
                "Found {} new ISO image(s):",
                snapshot.new_isos.len()
            ));
            ui.add_space(4.0);
            for name in snapshot.new_isos.iter().take(10) {
                ui.label(format!("• {}", name));
            }
            if snapshot.new_isos.len() > 10 {
                ui.label(format!("… and {} more", snapshot.new_isos.len() - 10));
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Classify").clicked() {
                    msgs.push(Msg::ClassifyConfirmed);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(Msg::ClassifyDeclined);
                }
            });
        });
    }
    msgs
}

/// Theme chooser listing installed themes, the active one highlighted.
pub fn theme_picker_modal(ctx: &egui::Context, model: &AppModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    let Some(snapshot) = &model.snapshot else {
        return msgs;
    };
    if model.theme_picker_open {
        modal("Select theme").show(ctx, |ui| {
            ui.label(format!("Current theme: {}", snapshot.theme));
            ui.add_space(6.0);
            egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                for theme in &snapshot.themes {
                    let active = *theme == snapshot.theme;
                    let label = if active {
                        format!("{} (active)", theme)
                    } else {
                        theme.clone()
                    };
                    let button = egui::Button::new(label).selected(active);
                    if ui.add(button).clicked() {
                        if active {
                            // Nothing to switch; just close.
                            msgs.push(Msg::ThemePickerClosed);
                        } else {
                            msgs.push(Msg::ThemeChosen(theme.clone()));
                        }
                    }
                }
            });
            ui.add_space(8.0);
            if ui.button("Cancel").clicked() {
                msgs.push(Msg::ThemePickerClosed);
            }
        });
    }
    msgs
}

/// Offer to re-resolve all icons after a theme switch. Declining keeps the
/// old classes on record even when the new theme lacks them.
pub fn rescan_offer_modal(ctx: &egui::Context, model: &AppModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    if let Some(theme) = &model.rescan_offer {
        modal("Rescan icons?").show(ctx, |ui| {
            ui.label(format!(
                "Re-resolve the icons of all existing ISOs for '{}'?",
                theme
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Rescan").clicked() {
                    msgs.push(Msg::RescanOfferAnswered(true));
                }
                if ui.button("Not now").clicked() {
                    msgs.push(Msg::RescanOfferAnswered(false));
                }
            });
        });
    }
    msgs
}

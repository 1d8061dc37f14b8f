// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Central drive overview: current state plus the action buttons.

use eframe::egui;

use crate::mvu::{AppModel, Msg};

/// How many new ISO names to list before collapsing into a count.
const NEW_ISO_PREVIEW: usize = 10;

/// Render the drive overview and return messages for clicked actions.
pub fn view(ui: &mut egui::Ui, model: &AppModel) -> Vec<Msg> {
    let mut msgs = Vec::new();

    let Some(snapshot) = &model.snapshot else {
        ui.label(
            "Drive state could not be read. Start the tool from the Ventoy \
             configuration directory of a prepared USB drive.",
        );
        ui.add_space(8.0);
        if ui
            .button(format!("{} Retry", egui_phosphor::regular::ARROW_CLOCKWISE))
            .clicked()
        {
            msgs.push(Msg::RequestRefresh);
        }
        return msgs;
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("drive_grid")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 10.0))
            .min_col_width(140.0)
            .show(ui, |ui| {
                ui.label("Active theme");
                ui.label(egui::RichText::new(&snapshot.theme).strong());
                ui.end_row();

                ui.label("Installed themes");
                ui.label(snapshot.themes.len().to_string());
                ui.end_row();

                ui.label("ISO images");
                ui.label(snapshot.total_isos.to_string());
                ui.end_row();

                ui.label("Menu entries");
                ui.label(snapshot.entry_count.to_string());
                ui.end_row();

                ui.label("Known systems");
                ui.label(snapshot.known_systems.to_string());
                ui.end_row();
            });
    });

    ui.add_space(12.0);

    if snapshot.new_isos.is_empty() {
        ui.label(
            egui::RichText::new("No new ISO images on the drive.")
                .color(egui::Color32::from_gray(120)),
        );
    } else {
        ui.label(
            egui::RichText::new(format!(
                "{} new ISO image(s) waiting for classification:",
                snapshot.new_isos.len()
            ))
            .strong(),
        );
        for name in snapshot.new_isos.iter().take(NEW_ISO_PREVIEW) {
            ui.label(format!("• {}", name));
        }
        if snapshot.new_isos.len() > NEW_ISO_PREVIEW {
            ui.label(format!(
                "… and {} more",
                snapshot.new_isos.len() - NEW_ISO_PREVIEW
            ));
        }
    }

    ui.add_space(16.0);

    let busy = model.pending_commands > 0;
    ui.horizontal(|ui| {
        let classify = egui::Button::new(format!(
            "{} Classify new ISOs",
            egui_phosphor::regular::PLUS
        ));
        if ui
            .add_enabled(!busy && !snapshot.new_isos.is_empty(), classify)
            .on_disabled_hover_text("No new ISO images to classify")
            .clicked()
        {
            msgs.push(Msg::RequestClassify);
        }

        let theme = egui::Button::new(format!(
            "{} Change theme",
            egui_phosphor::regular::PAINT_BRUSH
        ));
        if ui.add_enabled(!busy, theme).clicked() {
            msgs.push(Msg::RequestThemePicker);
        }

        let rescan = egui::Button::new(format!(
            "{} Rescan icons",
            egui_phosphor::regular::ARROWS_CLOCKWISE
        ));
        if ui
            .add_enabled(!busy, rescan)
            .on_hover_text("Re-resolve every menu icon against the active theme")
            .clicked()
        {
            msgs.push(Msg::RequestRescan);
        }
    });

    msgs
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Modal prompts answering the engine's blocking `Interact` calls.
//!
//! While one of these windows is open the engine worker is parked on its
//! reply channel; sending the answer (via `Msg::PromptAnswered`) resumes
//! classification exactly where it stopped.

use eframe::egui;

use crate::logic::interact::{COMMON_SYSTEMS, FallbackAction, OsAnswer};
use crate::logic::layout::DriveLayout;
use crate::mvu::{AppModel, Msg, PromptAnswer, PromptRequest};

/// Render the active prompt, if any, and return the operator's messages.
pub fn view(ctx: &egui::Context, model: &AppModel, layout: &DriveLayout) -> Vec<Msg> {
    let mut msgs = Vec::new();
    let Some(request) = &model.prompt else {
        return msgs;
    };

    match request {
        PromptRequest::ChooseIcon {
            filename,
            candidates,
            ..
        } => choose_icon(ctx, model, layout, filename, candidates, &mut msgs),
        PromptRequest::MissingIcon {
            filename, detected, ..
        } => missing_icon(ctx, filename, detected.as_deref(), &mut msgs),
        PromptRequest::ClassifyOs { filename, .. } => {
            classify_os(ctx, model, filename, &mut msgs)
        }
    }

    msgs
}

fn modal<'a>(title: &'a str) -> egui::Window<'a> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
}

fn choose_icon(
    ctx: &egui::Context,
    model: &AppModel,
    layout: &DriveLayout,
    filename: &str,
    candidates: &[String],
    msgs: &mut Vec<Msg>,
) {
    let theme = model.snapshot.as_ref().map(|snapshot| snapshot.theme.as_str());

    modal("Choose an icon").show(ctx, |ui| {
        ui.label(format!("Several icons match '{}'. Pick one:", filename));
        ui.add_space(6.0);
        egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
            for candidate in candidates {
                ui.horizontal(|ui| {
                    if let Some(theme) = theme {
                        let uri =
                            format!("file://{}", layout.icon_path(theme, candidate).display());
                        ui.add(
                            egui::Image::new(uri).fit_to_exact_size(egui::vec2(24.0, 24.0)),
                        );
                    }
                    if ui.button(candidate).clicked() {
                        msgs.push(Msg::PromptAnswered(PromptAnswer::Icon(Some(
                            candidate.clone(),
                        ))));
                    }
                });
            }
        });
        ui.add_space(8.0);
        if ui.button("None of these").clicked() {
            msgs.push(Msg::PromptAnswered(PromptAnswer::Icon(None)));
        }
    });
}

fn missing_icon(
    ctx: &egui::Context,
    filename: &str,
    detected: Option<&str>,
    msgs: &mut Vec<Msg>,
) {
    modal("Icon not found").show(ctx, |ui| {
        ui.label(format!("No icon matches '{}'.", filename));
        if let Some(detected) = detected {
            ui.label(format!("(detected as: {})", detected));
        }
        ui.add_space(8.0);
        if ui
            .button(format!(
                "{} Select an icon manually",
                egui_phosphor::regular::IMAGE
            ))
            .clicked()
        {
            msgs.push(Msg::PromptAnswered(PromptAnswer::Fallback(
                FallbackAction::PickManually,
            )));
        }
        if ui.button("Use the 'unknown' icon").clicked() {
            msgs.push(Msg::PromptAnswered(PromptAnswer::Fallback(
                FallbackAction::UseUnknown,
            )));
        }
    });
}

fn classify_os(ctx: &egui::Context, model: &AppModel, filename: &str, msgs: &mut Vec<Msg>) {
    modal("Unrecognized system").show(ctx, |ui| {
        ui.label(format!(
            "'{}' could not be recognized. Which operating system is it?",
            filename
        ));
        ui.label(
            egui::RichText::new("The answer is added to the mapping store for future runs.")
                .small()
                .color(egui::Color32::from_gray(120)),
        );
        ui.add_space(8.0);

        egui::Grid::new("common_systems").num_columns(2).show(ui, |ui| {
            for (index, system) in COMMON_SYSTEMS.iter().enumerate() {
                if ui
                    .add_sized(egui::vec2(140.0, 22.0), egui::Button::new(*system))
                    .clicked()
                {
                    msgs.push(Msg::PromptAnswered(PromptAnswer::Os(OsAnswer::Named(
                        system.to_string(),
                    ))));
                }
                if index % 2 == 1 {
                    ui.end_row();
                }
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let mut input = model.os_input.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut input).hint_text("other system…"))
                .changed()
            {
                msgs.push(Msg::OsInputChanged(input.clone()));
            }
            let learn = egui::Button::new("Learn");
            if ui
                .add_enabled(!model.os_input.trim().is_empty(), learn)
                .clicked()
            {
                msgs.push(Msg::PromptAnswered(PromptAnswer::Os(OsAnswer::Named(
                    model.os_input.trim().to_string(),
                ))));
            }
        });

        ui.add_space(4.0);
        if ui.button("Skip (use unknown)").clicked() {
            msgs.push(Msg::PromptAnswered(PromptAnswer::Os(OsAnswer::Unknown)));
        }
    });
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Top-level egui application shell for the boot-menu configurator.
//! Handles layout, the drive overview, and wiring to the engine worker.

pub mod components;

use std::time::Duration;

use eframe::egui;

use crate::logic::layout::DriveLayout;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::{modals, overview, prompts};

/// Stateful egui application around the MVU model and the engine worker.
pub struct IsodeckApp {
    model: AppModel,
    inbox: Vec<Msg>,
    layout: DriveLayout,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl IsodeckApp {
    pub fn new(layout: DriveLayout) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // Exactly one engine worker: classification is strictly sequential
        // and a pending prompt blocks the whole batch.
        let worker_layout = layout.clone();
        std::thread::spawn(move || {
            for cmd in cmd_rx.iter() {
                let msg = mvu::run_command(cmd, &worker_layout, &msg_tx);
                let _ = msg_tx.send(msg);
            }
        });

        let mut app = Self {
            model: AppModel::default(),
            inbox: Vec::new(),
            layout,
            cmd_tx,
            msg_rx,
        };
        app.dispatch(Command::LoadSnapshot);
        app
    }

    fn dispatch(&mut self, cmd: Command) {
        if self.cmd_tx.send(cmd).is_ok() {
            self.model.pending_commands += 1;
        }
    }
}

impl eframe::App for IsodeckApp {
    // eframe 0.34.3 made `ui` the required trait method while still invoking
    // the (now deprecated) `update` each frame. All rendering lives in
    // `update`, so satisfy the trait with an empty `ui`; the runtime calls
    // both, so behavior is unchanged.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    #[allow(deprecated)]
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull messages produced by the engine worker. Prompt messages are
        // mid-command and keep the busy counter held.
        while let Ok(msg) = self.msg_rx.try_recv() {
            if msg.completes_command() {
                self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            }
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
        self.inbox = msgs;

        // A blocked worker raises prompts without any input event, so keep
        // repainting while it runs.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Boot Menu");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    if ui
                        .button(format!(
                            "{} Themes folder",
                            egui_phosphor::regular::FOLDER_OPEN
                        ))
                        .on_hover_text("Open the Themes directory in the file manager")
                        .clicked()
                    {
                        self.dispatch(Command::OpenThemesFolder);
                    }
                });
            });
            ui.add_space(4.0);
        });

        let mut msgs = Vec::new();
        msgs.extend(modals::error_modal(ctx, &self.model));
        msgs.extend(modals::warnings_modal(ctx, &self.model));
        msgs.extend(modals::confirm_classify_modal(ctx, &self.model));
        msgs.extend(modals::theme_picker_modal(ctx, &self.model));
        msgs.extend(modals::rescan_offer_modal(ctx, &self.model));
        msgs.extend(prompts::view(ctx, &self.model, &self.layout));

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                msgs.extend(overview::view(ui, &self.model));
            });
        });

        self.inbox.extend(msgs);
    }
}

impl IsodeckApp {
    /// Render latest status message and a spinner while the worker runs.
    fn render_status(&self, ui: &mut egui::Ui) {
        let text = self.model.status.as_deref().unwrap_or("Ready.");
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(120)));
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text("Working. Answer any open prompt to continue.");
            }
        });
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 isodeck contributors

//! Application entry point wiring egui/eframe to launch the isodeck UI.

use anyhow::{Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;

use crate::logic::layout::DriveLayout;
use crate::ui::IsodeckApp;

/// Bootstrap the desktop application and run the main egui event loop.
///
/// The tool is meant to be launched from the Ventoy configuration
/// directory on the USB drive; the drive layout is derived from the
/// working directory.
pub fn run() -> Result<()> {
    let layout = DriveLayout::from_current_dir()?;

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 560.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "isodeck",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            // PNG previews in the icon chooser load through the image
            // loader registry.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(IsodeckApp::new(layout)))
        }),
    )
    .map_err(|err| anyhow!("Failed to start the UI: {}", err))
}

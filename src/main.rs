// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! dualcrop - square and 3:4 photo cropper
//!
//! A cross-platform desktop application that crops one photo into a square
//! and a 3:4 region and keeps a gallery of the saved crop pairs.

mod app;
mod config;
mod crop;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::DualCropApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = config::load();
    log::info!("Photo library at {}", config.library_path.display());

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("dualcrop"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "dualcrop",
        options,
        Box::new(move |_cc| Ok(Box::new(DualCropApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

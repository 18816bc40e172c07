#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use eframe::egui;
use log::LevelFilter;

mod app;
mod handlers;
mod logger;
mod ui_components;
mod viewer;
mod views;
mod worker;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(500, LevelFilter::Info)
        .init()
        .context("Failed to install logger")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let tokio_handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Label Split"),
        ..Default::default()
    };

    eframe::run_native(
        "Label Split",
        options,
        Box::new(move |cc| Ok(Box::new(app::LabelSplitApp::new(cc, tokio_handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

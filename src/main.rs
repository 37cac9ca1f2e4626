mod app;
mod config;
mod engine;
mod error;
mod image;

use app::RetouchApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let initial_image_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Retouch",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(RetouchApp::new_with_initial_path(
                &cc.egui_ctx,
                initial_image_path.as_deref(),
            )))
        }),
    )
}

//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::engine::{FilterEngine, Intent, Outcome, PreviewStyle};
use egui::{Context, Key};
use std::path::Path;
use tracing::warn;

mod export_job;
mod export_state;
mod image_loader;
mod image_state;
mod preview;
mod ui;
mod ui_state;

use export_state::ExportState;
use image_state::ImageState;
use ui_state::UiState;

/// Top-level application state for the Retouch UI.
pub struct RetouchApp {
    engine: FilterEngine,
    image: ImageState,
    export: ExportState,
    ui: UiState,
    config: AppConfig,
}

impl Default for RetouchApp {
    fn default() -> Self {
        Self {
            engine: FilterEngine::new(),
            image: ImageState::default(),
            export: ExportState::default(),
            ui: UiState::default(),
            config: AppConfig::load(),
        }
    }
}

impl RetouchApp {
    /// Create a new app and optionally queue an initial image load.
    pub fn new_with_initial_path(ctx: &Context, initial_path: Option<&Path>) -> Self {
        let mut app = Self::default();
        if let Some(p) = initial_path {
            app.start_loading_image_from_path(p.to_owned());
            // Start polling the loader before any input arrives.
            ctx.request_repaint();
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.ui.last_status = Some(msg.into());
    }

    /// Route a control-panel intent through the engine and refresh whatever
    /// the outcome names.
    pub(crate) fn dispatch(&mut self, intent: Intent) {
        match self.engine.handle(intent) {
            Outcome::Unchanged => {}
            Outcome::Restyled(style) => {
                self.ui.slider = self.engine.slider();
                self.apply_style(&style);
            }
            Outcome::SliderReconfigured(slider, style) => {
                self.ui.slider = Some(slider);
                self.apply_style(&style);
            }
        }
    }

    fn apply_style(&mut self, style: &PreviewStyle) {
        match self.image.preview.as_mut() {
            Some(preview) => preview.apply_style(style),
            None => warn!(%style, "style computed without a preview"),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        // Ignored while typing in text fields or a dialog is open.
        if ctx.wants_keyboard_input() || self.ui.active_dialog.is_some() {
            return;
        }
        // Ctrl/Cmd + O: choose image
        if ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command) {
            self.open_image_dialog();
            return;
        }
        if !self.engine.is_loaded() {
            return;
        }
        // Ctrl/Cmd + S: save image
        if !self.export_in_progress() && ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command)
        {
            self.save_export_dialog();
            return;
        }
        // Ctrl/Cmd + R: reset filters
        if ctx.input(|i| i.key_pressed(Key::R) && i.modifiers.command) {
            self.dispatch(Intent::Reset);
        }
        let plain = [
            (Key::OpenBracket, Intent::RotateLeft),
            (Key::CloseBracket, Intent::RotateRight),
            (Key::H, Intent::FlipHorizontal),
            (Key::V, Intent::FlipVertical),
        ];
        for (key, intent) in plain {
            if ctx.input(|i| i.key_pressed(key) && i.modifiers.is_none()) {
                self.dispatch(intent);
            }
        }
    }
}

impl eframe::App for RetouchApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.poll_export_job(ctx);
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.ui_controls(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central_image(ui));

        self.update_active_dialog(ctx);
    }

    // Required by eframe 0.34; all drawing happens in `update`, which eframe still calls.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}

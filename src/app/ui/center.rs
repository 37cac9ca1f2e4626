use super::super::RetouchApp;
use egui::{Align2, Color32, FontId, RichText};
use tracing::debug;

impl RetouchApp {
    pub(crate) fn ui_central_image(&mut self, ui: &mut egui::Ui) {
        self.handle_dropped_files(ui);

        if let Some(preview) = self.image.preview.as_ref() {
            preview.paint(ui);
            return;
        }

        let rect = ui.available_rect_before_wrap();
        let hovering = ui.input(|i| !i.raw.hovered_files.is_empty());
        let stroke_color = if hovering {
            ui.visuals().selection.stroke.color
        } else {
            Color32::from_gray(120)
        };
        ui.painter().rect_stroke(
            rect.shrink(12.0),
            8.0,
            egui::Stroke::new(1.5, stroke_color),
            egui::StrokeKind::Inside,
        );
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image here or choose one (Ctrl+O)",
            FontId::proportional(16.0),
            ui.visuals().weak_text_color(),
        );
        if self.image.pending.is_some() {
            ui.put(
                egui::Rect::from_center_size(rect.center() + egui::vec2(0.0, 32.0), rect.size()),
                egui::Label::new(RichText::new("Loading…").small()),
            );
        }
    }

    /// Load the first dropped file that carries a path or bytes.
    fn handle_dropped_files(&mut self, ui: &egui::Ui) {
        let dropped_files = ui.input(|i| i.raw.dropped_files.clone());
        if dropped_files.is_empty() {
            return;
        }
        for f in &dropped_files {
            if let Some(path) = &f.path {
                debug!(path = %path.display(), "loading dropped path");
                self.start_loading_image_from_path(path.clone());
                return;
            }
            if let Some(bytes) = &f.bytes {
                debug!(name = %f.name, len = bytes.len(), "loading dropped bytes");
                self.start_loading_image_from_bytes(
                    Some(f.name.as_str()),
                    bytes.to_vec(),
                    f.last_modified,
                );
                return;
            }
        }
        self.set_status("Drop failed: no readable bytes/path");
    }
}

use super::super::RetouchApp;
use egui::{Color32, RichText};

impl RetouchApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let (Some(meta), Some(source)) = (self.image.meta.as_ref(), self.engine.source()) {
                ui.label(
                    RichText::new(meta.summary(source.dimensions()))
                        .small()
                        .color(Color32::from_gray(180)),
                );
                let orientation = self.engine.state().orientation;
                if !orientation.is_identity() {
                    ui.separator();
                    ui.label(
                        RichText::new(self.engine.compute_preview_style().transform_css)
                            .small()
                            .monospace()
                            .color(Color32::from_gray(180)),
                    );
                }
            }
            if let Some(msg) = &self.ui.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }
}

use super::super::RetouchApp;
use super::icons;
use crate::engine::{AdjustmentKind, Intent};
use egui::RichText;

impl RetouchApp {
    /// Side panel: adjustment picker, slider, orientation buttons and reset.
    pub(crate) fn ui_controls(&mut self, ui: &mut egui::Ui) {
        let has_image = self.engine.is_loaded();
        ui.add_space(4.0);
        ui.heading(format!("{} Filters", icons::ICON_ADJUST));
        ui.add_enabled_ui(has_image, |ui| {
            self.ui_adjustment_picker(ui);
            ui.add_space(6.0);
            self.ui_adjustment_slider(ui);
        });

        ui.separator();
        ui.heading("Rotate & Flip");
        ui.add_enabled_ui(has_image, |ui| self.ui_orientation_buttons(ui));

        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    has_image,
                    egui::Button::new(format!("{} Reset filters", icons::ICON_RESET))
                        .shortcut_text("Ctrl+R"),
                )
                .on_hover_text("Restore every adjustment and the orientation (Ctrl+R)")
                .clicked()
            {
                self.dispatch(Intent::Reset);
            }
        });

        if !has_image {
            ui.add_space(8.0);
            ui.label(RichText::new("Choose an image to start editing.").small());
        }
    }

    fn ui_adjustment_picker(&mut self, ui: &mut egui::Ui) {
        let active = self.engine.state().active;
        ui.horizontal_wrapped(|ui| {
            for kind in AdjustmentKind::ALL {
                if ui.selectable_label(kind == active, kind.label()).clicked() && kind != active {
                    self.dispatch(Intent::SelectAdjustment(kind));
                }
            }
        });
    }

    fn ui_adjustment_slider(&mut self, ui: &mut egui::Ui) {
        let Some(slider) = self.ui.slider else {
            // Placeholder until an image has configured the slider.
            let mut placeholder = 100.0_f64;
            ui.add(egui::Slider::new(&mut placeholder, 0.0..=200.0).show_value(false));
            return;
        };
        ui.horizontal(|ui| {
            ui.label(slider.kind.label());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(slider.value_label()).monospace());
            });
        });
        let mut value = f64::from(slider.value);
        ui.spacing_mut().slider_width = ui.available_width();
        let response = ui.add(
            egui::Slider::new(&mut value, f64::from(slider.min)..=f64::from(slider.max))
                .step_by(1.0)
                .show_value(false),
        );
        if response.changed() {
            self.dispatch(Intent::SliderChanged(value));
        }
    }

    fn ui_orientation_buttons(&mut self, ui: &mut egui::Ui) {
        let buttons = [
            (icons::ICON_ROTATE_CCW, "Rotate left ([)", Intent::RotateLeft),
            (icons::ICON_ROTATE_CW, "Rotate right (])", Intent::RotateRight),
            (icons::ICON_FLIP_H, "Flip horizontally (H)", Intent::FlipHorizontal),
            (icons::ICON_FLIP_V, "Flip vertically (V)", Intent::FlipVertical),
        ];
        ui.horizontal(|ui| {
            for (icon, hint, intent) in buttons {
                if ui
                    .add(egui::Button::new(RichText::new(icon).size(18.0)))
                    .on_hover_text(hint)
                    .clicked()
                {
                    self.dispatch(intent);
                }
            }
        });
    }
}

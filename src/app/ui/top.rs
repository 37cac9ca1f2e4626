use super::super::RetouchApp;
use super::icons;

impl RetouchApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Use egui's built-in theme toggle so icon matches current mode.
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();
            self.ui_file_menu(ui);
            ui.separator();

            if ui
                .button(format!("{} Choose image", icons::ICON_OPEN))
                .on_hover_text("Open an image (Ctrl+O). You can also drag & drop into the preview.")
                .clicked()
            {
                self.open_image_dialog();
            }
            let can_save = self.engine.is_loaded() && !self.export_in_progress();
            if ui
                .add_enabled(
                    can_save,
                    egui::Button::new(format!("{} Save image", icons::ICON_SAVE)),
                )
                .on_hover_text("Save the edited image at full resolution (Ctrl+S)")
                .clicked()
            {
                self.save_export_dialog();
            }
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui) {
        let can_save = self.engine.is_loaded() && !self.export_in_progress();
        ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Choose image…").shortcut_text("Ctrl+O"))
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }
            if ui
                .add_enabled(
                    can_save,
                    egui::Button::new("Save image…").shortcut_text("Ctrl+S"),
                )
                .clicked()
            {
                self.save_export_dialog();
                ui.close();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }
}

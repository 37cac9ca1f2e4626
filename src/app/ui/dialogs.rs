use super::super::RetouchApp;
use super::super::ui_state::NativeDialog;
use egui_file_dialog::{DialogState, FileDialog};
use std::path::{Path, PathBuf};

impl RetouchApp {
    pub(crate) fn open_image_dialog(&mut self) {
        let mut dialog = Self::make_open_dialog(self.image.last_image_dir.as_deref());
        dialog.pick_file();
        self.ui.active_dialog = Some(NativeDialog::Open(dialog));
    }

    pub(crate) fn save_export_dialog(&mut self) {
        if !self.engine.is_loaded() {
            self.set_status("Load an image before saving.");
            return;
        }
        let settings = self.config.effective_export();
        let initial_dir = self
            .export
            .last_export_dir
            .as_deref()
            .or_else(|| self.image.meta.as_ref().and_then(|m| m.parent_dir()));
        let mut dialog = Self::make_save_dialog(
            "Save image",
            &settings.file_name,
            &["jpg", "png"],
            initial_dir,
        );
        dialog.save_file();
        self.ui.active_dialog = Some(NativeDialog::SaveExport(dialog));
    }

    pub(crate) fn make_open_dialog(initial_dir: Option<&Path>) -> FileDialog {
        // Keep in sync with enabled `image` crate features.
        let mut dialog = FileDialog::new()
            .title("Choose image")
            .add_file_filter_extensions(
                "All images",
                vec![
                    "png", "jpg", "jpeg", "gif", "bmp", "webp", "ico", "tga", "tiff", "tif", "pnm",
                    "pbm", "pgm", "ppm",
                ],
            )
            .add_file_filter_extensions("PNG", vec!["png"])
            .add_file_filter_extensions("JPEG/JPG", vec!["jpg", "jpeg"])
            .add_file_filter_extensions("WebP", vec!["webp"])
            .default_file_filter("All images");
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    pub(crate) fn make_save_dialog(
        title: &str,
        default_name: &str,
        extensions: &[&str],
        initial_dir: Option<&Path>,
    ) -> FileDialog {
        let mut dialog = FileDialog::new()
            .title(title)
            .default_file_name(default_name);
        for ext in extensions {
            dialog = dialog.add_save_extension(&format!("*.{ext}"), ext);
        }
        if let Some(first) = extensions.first() {
            dialog = dialog.default_save_extension(&format!("*.{first}"));
        }
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    /// Drive the active file dialog and act on its result.
    pub(crate) fn update_active_dialog(&mut self, ctx: &egui::Context) {
        let mut close_dialog = false;
        let mut picked_open: Option<PathBuf> = None;
        let mut picked_save: Option<PathBuf> = None;

        if let Some(dialog_state) = self.ui.active_dialog.as_mut() {
            let (dialog, target, cancel_msg) = match dialog_state {
                NativeDialog::Open(dialog) => (dialog, &mut picked_open, "Open canceled."),
                NativeDialog::SaveExport(dialog) => (dialog, &mut picked_save, "Save canceled."),
            };
            dialog.update(ctx);
            if let Some(path) = dialog.take_picked() {
                *target = Some(path);
                close_dialog = true;
            } else {
                match dialog.state() {
                    DialogState::Cancelled => {
                        self.ui.last_status = Some(cancel_msg.to_string());
                        close_dialog = true;
                    }
                    DialogState::Closed => close_dialog = true,
                    _ => {}
                }
            }
        }

        if close_dialog {
            self.ui.active_dialog = None;
        }
        if let Some(path) = picked_open {
            self.start_loading_image_from_path(path);
        }
        if let Some(path) = picked_save {
            self.start_export(path);
        }
    }
}

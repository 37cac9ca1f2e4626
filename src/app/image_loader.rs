use super::RetouchApp;
use super::image_state::{ImageSource, PendingImageTask};
use super::preview::PreviewTexture;
use crate::error::EditorError;
use crate::image::{ImageMeta, decode_image_from_bytes, decode_image_from_path};
use egui::Context;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::SystemTime;
use tracing::{info, warn};

impl RetouchApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: PathBuf) {
        if let Some(dir) = path.parent() {
            self.image.last_image_dir = Some(dir.to_path_buf());
        }
        let meta = ImageMeta::for_file(&path);
        self.start_image_load(ImageSource::Path(path), meta);
    }

    pub(crate) fn start_loading_image_from_bytes(
        &mut self,
        name: Option<&str>,
        bytes: Vec<u8>,
        last_modified: Option<SystemTime>,
    ) {
        let meta = ImageMeta::for_drop(name, bytes.len(), last_modified);
        self.start_image_load(ImageSource::Bytes(bytes), meta);
    }

    /// Decode off the UI thread. A newer request replaces the pending one;
    /// the superseded worker's result is dropped with its channel.
    fn start_image_load(&mut self, source: ImageSource, meta: ImageMeta) {
        let cfg = self.config.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let decoded = match source {
                ImageSource::Path(path) => decode_image_from_path(&cfg, &path),
                ImageSource::Bytes(bytes) => decode_image_from_bytes(&cfg, bytes),
            };
            let result = decoded.map_err(|err| EditorError::UnsupportedFile(format!("{err:#}")));
            let _ = tx.send(result);
        });
        self.set_status(format!("Loading {}…", meta.display_name()));
        self.image.pending = Some(PendingImageTask { rx, meta });
    }

    pub(crate) fn poll_image_loader(&mut self, ctx: &Context) {
        let Some(task) = self.image.pending.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(Ok(rgba)) => self.finish_loaded_image(ctx, rgba, task.meta),
            Ok(Err(err)) => {
                // The previous image and its adjustments stay in place.
                warn!(%err, file = task.meta.display_name(), "image load failed");
                self.set_status(format!("Failed to load {}: {err}", task.meta.display_name()));
            }
            Err(TryRecvError::Empty) => {
                self.image.pending = Some(task);
                ctx.request_repaint();
            }
            Err(TryRecvError::Disconnected) => {
                let name = task.meta.display_name();
                self.set_status(format!("Loading {name} failed: worker disconnected."));
            }
        }
    }

    fn finish_loaded_image(&mut self, ctx: &Context, rgba: RgbaImage, meta: ImageMeta) {
        let source = self.engine.load_new_image(rgba);
        let mut preview = PreviewTexture::new(ctx, &source, self.config.preview_max_edge());
        preview.apply_style(&self.engine.compute_preview_style());
        info!(
            name = meta.display_name(),
            width = source.width(),
            height = source.height(),
            "image loaded"
        );
        self.set_status(format!("Loaded {}", meta.display_name()));
        self.image.preview = Some(preview);
        self.image.meta = Some(meta);
        self.ui.slider = self.engine.slider();
    }
}

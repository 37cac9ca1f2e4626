use super::RetouchApp;
use super::export_state::{ExportOutput, PendingExport};
use crate::engine::{ExportFormat, encode_export};
use anyhow::Context as _;
use egui::Context;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use tracing::{debug, info, warn};

impl RetouchApp {
    /// Render and encode the current image on a worker thread. The file is
    /// written once the result comes back for the same image generation.
    pub(crate) fn start_export(&mut self, path: PathBuf) {
        self.remember_export_dir_from_path(&path);
        let Some(source) = self.engine.source().cloned() else {
            self.set_status("Load an image before saving.");
            return;
        };
        let snapshot = self.engine.clone();
        let settings = self.config.effective_export();
        let format = ExportFormat::from_path(&path);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = snapshot
                .render_export(&source, source.width(), source.height())
                .and_then(|raster| encode_export(&raster, format, &settings))
                .map(|bytes| ExportOutput { path, bytes });
            let _ = tx.send(result);
        });
        self.export.pending = Some(PendingExport {
            rx,
            generation: self.engine.generation(),
        });
        self.set_status("Saving…");
    }

    pub(crate) fn poll_export_job(&mut self, ctx: &Context) {
        let Some(job) = self.export.pending.take() else {
            return;
        };
        match job.rx.try_recv() {
            Ok(_) if job.generation != self.engine.generation() => {
                debug!(
                    started = job.generation,
                    current = self.engine.generation(),
                    "discarding export of a replaced image"
                );
                self.set_status("Save discarded: a different image was loaded.");
            }
            Ok(Ok(output)) => self.write_export(&output),
            Ok(Err(err)) => {
                warn!(%err, "export failed");
                self.set_status(format!("Save failed: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.export.pending = Some(job);
                ctx.request_repaint();
            }
            Err(TryRecvError::Disconnected) => {
                self.set_status("Save failed: worker disconnected.");
            }
        }
    }

    fn write_export(&mut self, output: &ExportOutput) {
        let written = std::fs::write(&output.path, &output.bytes)
            .with_context(|| format!("Failed to write {}", output.path.display()));
        match written {
            Ok(()) => {
                info!(path = %output.path.display(), bytes = output.bytes.len(), "image saved");
                self.set_status(format!("Saved {}", output.path.display()));
            }
            Err(err) => {
                warn!("{err:#}");
                self.set_status(format!("Save failed: {err:#}"));
            }
        }
    }

    pub(crate) const fn export_in_progress(&self) -> bool {
        self.export.pending.is_some()
    }

    pub(crate) fn remember_export_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.export.last_export_dir = Some(dir);
    }
}

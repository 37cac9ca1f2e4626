use crate::error::EditorResult;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// Encoded export produced by the worker, not yet written.
pub struct ExportOutput {
    pub(super) path: PathBuf,
    pub(super) bytes: Vec<u8>,
}

pub struct PendingExport {
    pub(super) rx: Receiver<EditorResult<ExportOutput>>,
    /// Engine generation the export was rendered from.
    pub(super) generation: u64,
}

#[derive(Default)]
pub struct ExportState {
    pub(super) pending: Option<PendingExport>,
    pub(super) last_export_dir: Option<PathBuf>,
}

use crate::engine::SliderConfig;
use egui_file_dialog::FileDialog;

#[derive(Default)]
pub struct UiState {
    /// Slider as last configured by the engine; `None` until an image loads.
    pub(super) slider: Option<SliderConfig>,
    pub(super) active_dialog: Option<NativeDialog>,
    pub(super) last_status: Option<String>,
}

#[derive(Debug)]
pub enum NativeDialog {
    Open(FileDialog),
    SaveExport(FileDialog),
}

use super::preview::PreviewTexture;
use crate::error::EditorError;
use crate::image::ImageMeta;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Decode running on a worker; `meta` describes the file being decoded.
pub struct PendingImageTask {
    pub(super) rx: Receiver<Result<RgbaImage, EditorError>>,
    pub(super) meta: ImageMeta,
}

/// Display-side state of the loaded image. The authoritative bitmap lives in
/// the engine; this holds the texture shown in the preview pane.
#[derive(Default)]
pub struct ImageState {
    pub(super) preview: Option<PreviewTexture>,
    pub(super) meta: Option<ImageMeta>,
    pub(super) pending: Option<PendingImageTask>,
    pub(super) last_image_dir: Option<PathBuf>,
}

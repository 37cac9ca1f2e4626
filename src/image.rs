mod filters;
mod load;
mod meta;
mod transform;

pub use filters::{ColorFilter, PARALLEL_PIXEL_THRESHOLD};
pub use load::{decode_image_from_bytes, decode_image_from_path};
pub use meta::ImageMeta;
pub use transform::{Affine2, Orientation, TransformOp, fit_within};

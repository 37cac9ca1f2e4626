use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
use rayon::prelude::*;
use tracing::debug;

use super::state::AdjustmentState;
use super::style::{filter_css, parse_filter_css};
use crate::config::ExportSettings;
use crate::error::{EditorError, EditorResult};
use crate::image::{Affine2, ColorFilter, PARALLEL_PIXEL_THRESHOLD};

/// Encoded file format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    /// Pick the format from the file extension; anything unknown is JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => Self::Png,
            _ => Self::Jpeg,
        }
    }
}

/// Offscreen drawing surface with 2D-canvas semantics: a current transform,
/// a current filter, and `draw_image` that honors both.
pub struct Canvas {
    surface: RgbaImage,
    transform: Affine2,
    filter: ColorFilter,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: RgbaImage::new(width, height),
            transform: Affine2::IDENTITY,
            filter: ColorFilter::default(),
        }
    }

    /// Set the filter from CSS notation. Invalid strings leave the current
    /// filter in place.
    pub fn set_filter(&mut self, css: &str) {
        match parse_filter_css(css) {
            Some(filter) => self.filter = filter,
            None => debug!(css, "ignoring unparsable canvas filter"),
        }
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.transform.translate(tx, ty);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform.scale(sx, sy);
    }

    /// Draw `src` into the box `(dx, dy, dw, dh)` of user space. Each surface
    /// pixel center is mapped back through the current transform and sampled
    /// nearest; covered pixels replace what was there.
    pub fn draw_image(&mut self, src: &RgbaImage, dx: f64, dy: f64, dw: f64, dh: f64) {
        let (src_w, src_h) = src.dimensions();
        if src_w == 0 || src_h == 0 || dw <= 0.0 || dh <= 0.0 {
            return;
        }
        let Some(inverse) = self.transform.inverse() else {
            return;
        };
        let (width, height) = self.surface.dimensions();
        if width == 0 {
            return;
        }
        let sx_scale = f64::from(src_w) / dw;
        let sy_scale = f64::from(src_h) / dh;
        let filter = self.filter;
        let row_len = width as usize * 4;
        let draw_row = |(y, row): (usize, &mut [u8])| {
            #[allow(clippy::cast_precision_loss)]
            let cy = y as f64 + 0.5;
            for (x, px) in (0..width).zip(row.chunks_exact_mut(4)) {
                let (ux, uy) = inverse.apply(f64::from(x) + 0.5, cy);
                let u = (ux - dx) * sx_scale;
                let v = (uy - dy) * sy_scale;
                if u < 0.0 || v < 0.0 {
                    continue;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let (sx, sy) = (u.floor() as u32, v.floor() as u32);
                if sx >= src_w || sy >= src_h {
                    continue;
                }
                px.copy_from_slice(&filter.apply_pixel(src.get_pixel(sx, sy).0));
            }
        };
        let total_pixels = width as usize * height as usize;
        if total_pixels >= PARALLEL_PIXEL_THRESHOLD {
            self.surface
                .par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(draw_row);
        } else {
            self.surface
                .chunks_exact_mut(row_len)
                .enumerate()
                .for_each(draw_row);
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.surface
    }
}

/// Rasterize `source` exactly as the live preview shows it.
///
/// The surface keeps the natural size even for quarter turns; uncovered
/// corners stay transparent. The transform is built translate, rotate, scale
/// so that the pivot is the image center, matching `rotate(..) scale(..)`
/// applied to a laid-out element.
pub fn render_export(
    state: &AdjustmentState,
    source: &RgbaImage,
    natural_width: u32,
    natural_height: u32,
) -> EditorResult<RgbaImage> {
    if natural_width == 0 || natural_height == 0 {
        return Err(EditorError::InvalidSource {
            width: natural_width,
            height: natural_height,
        });
    }
    let (src_w, src_h) = source.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(EditorError::InvalidSource {
            width: src_w,
            height: src_h,
        });
    }

    let (w, h) = (f64::from(natural_width), f64::from(natural_height));
    let orientation = state.orientation;
    let mut canvas = Canvas::new(natural_width, natural_height);
    canvas.set_filter(&filter_css(state));
    canvas.translate(w / 2.0, h / 2.0);
    if orientation.quarter_turns() != 0 {
        #[allow(clippy::cast_precision_loss)]
        let radians = (orientation.rotation_degrees as f64).to_radians();
        canvas.rotate(radians);
    }
    canvas.scale(
        f64::from(orientation.flip_horizontal.value()),
        f64::from(orientation.flip_vertical.value()),
    );
    canvas.draw_image(source, -w / 2.0, -h / 2.0, w, h);
    Ok(canvas.into_image())
}

/// Encode a rendered surface. JPEG has no alpha, so pixels are composited
/// over the configured matte first.
pub fn encode_export(
    image: &RgbaImage,
    format: ExportFormat,
    settings: &ExportSettings,
) -> EditorResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => image.write_to(&mut out, ImageFormat::Png)?,
        ExportFormat::Jpeg => {
            let flat = flatten_onto(image, settings.matte);
            let encoder = JpegEncoder::new_with_quality(&mut out, settings.jpeg_quality);
            flat.write_with_encoder(encoder)?;
        }
    }
    Ok(out.into_inner())
}

fn flatten_onto(image: &RgbaImage, matte: [u8; 3]) -> RgbImage {
    let mut flat = RgbImage::new(image.width(), image.height());
    for (dst, src) in flat.pixels_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        let alpha = u16::from(a);
        let blend = |c: u8, m: u8| {
            let mixed = (u16::from(c) * alpha + u16::from(m) * (255 - alpha) + 127) / 255;
            u8::try_from(mixed).unwrap_or(u8::MAX)
        };
        *dst = Rgb([blend(r, matte[0]), blend(g, matte[1]), blend(b, matte[2])]);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, imageops};

    #[test]
    fn format_follows_extension() {
        let format = |p: &str| ExportFormat::from_path(Path::new(p));
        assert_eq!(format("out/photo.PNG"), ExportFormat::Png);
        assert_eq!(format("image.jpg"), ExportFormat::Jpeg);
        assert_eq!(format("no_extension"), ExportFormat::Jpeg);
    }

    #[test]
    fn canvas_ignores_invalid_filter() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set_filter("invert(100%)");
        canvas.set_filter("sepia(1)");
        let src = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        canvas.draw_image(&src, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(canvas.into_image().get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn draw_image_scales_into_box() {
        let src = RgbaImage::from_fn(2, 1, |x, _| {
            Rgba([u8::try_from(x).unwrap_or(0) * 100, 0, 0, 255])
        });
        let mut canvas = Canvas::new(4, 1);
        canvas.draw_image(&src, 0.0, 0.0, 4.0, 1.0);
        let reds: Vec<u8> = canvas.into_image().pixels().map(|p| p.0[0]).collect();
        assert_eq!(reds, vec![0, 0, 100, 100]);
    }

    #[test]
    fn jpeg_encoding_flattens_alpha() {
        let mut image = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
        image.put_pixel(0, 0, Rgba([255, 255, 255, 0]));
        let bytes = encode_export(&image, ExportFormat::Jpeg, &ExportSettings::default())
            .expect("encode jpeg");
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let flat = flatten_onto(&image, [0, 0, 0]);
        assert_eq!(flat.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(flat.get_pixel(1, 1).0, [255, 255, 255]);
    }

    #[test]
    fn png_encoding_keeps_alpha() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([9, 8, 7, 0]));
        let bytes = encode_export(&image, ExportFormat::Png, &ExportSettings::default())
            .expect("encode png");
        let decoded = image::load_from_memory(&bytes).expect("decode").to_rgba8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn zero_sized_export_is_rejected() {
        let state = AdjustmentState::default();
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        assert_eq!(
            render_export(&state, &src, 0, 2),
            Err(EditorError::InvalidSource { width: 0, height: 2 })
        );
        let empty = RgbaImage::new(0, 0);
        assert!(matches!(
            render_export(&state, &empty, 2, 2),
            Err(EditorError::InvalidSource { .. })
        ));
    }

    #[test]
    fn identity_export_copies_source() {
        let src = RgbaImage::from_fn(5, 3, |x, y| {
            Rgba([u8::try_from(x * 10 + y).unwrap_or(0), 1, 2, 255])
        });
        let out = render_export(&AdjustmentState::default(), &src, 5, 3).expect("render");
        assert_eq!(out, src);
        let mirrored = {
            let mut state = AdjustmentState::default();
            state.orientation.apply(crate::image::TransformOp::FlipHorizontal);
            render_export(&state, &src, 5, 3).expect("render")
        };
        assert_eq!(mirrored, imageops::flip_horizontal(&src));
    }
}

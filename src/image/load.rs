use crate::config::{AppConfig, ImageLimits};
use anyhow::{Context as _, ensure};
use image::{GenericImageView, ImageReader, Limits, RgbaImage};
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

fn decoder_limits(limits: &ImageLimits) -> Limits {
    let mut out = Limits::default();
    out.max_image_width = Some(limits.image_dim);
    out.max_image_height = Some(limits.image_dim);
    out.max_alloc = Some(limits.alloc_bytes);
    out
}

/// Sniff the format, decode under the configured limits and convert to RGBA8.
fn decode_with_limits<R: BufRead + Seek>(
    cfg: &AppConfig,
    reader: ImageReader<R>,
) -> anyhow::Result<RgbaImage> {
    let limits = cfg.effective_image_limits();
    let mut reader = reader
        .with_guessed_format()
        .context("Failed to detect image format")?;
    reader.limits(decoder_limits(&limits));
    let decoded = reader.decode().context("Failed to decode image data")?;

    let (w, h) = decoded.dimensions();
    ensure!(w > 0 && h > 0, "Image has no pixels ({w}x{h})");
    let pixels = u64::from(w) * u64::from(h);
    ensure!(
        pixels <= limits.total_pixels,
        "Image too large: {w}x{h} exceeds the {} MP limit",
        limits.total_pixels / 1_000_000
    );
    Ok(decoded.into_rgba8())
}

pub fn decode_image_from_path(cfg: &AppConfig, path: &Path) -> anyhow::Result<RgbaImage> {
    let reader =
        ImageReader::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode_with_limits(cfg, reader)
}

pub fn decode_image_from_bytes(cfg: &AppConfig, bytes: Vec<u8>) -> anyhow::Result<RgbaImage> {
    decode_with_limits(cfg, ImageReader::new(Cursor::new(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png_bytes() {
        let cfg = AppConfig::default();
        let img = decode_image_from_bytes(&cfg, png_bytes(5, 3)).expect("decode");
        assert_eq!(img.dimensions(), (5, 3));
        assert_eq!(img.get_pixel(4, 2).0, [10, 20, 30, 255]);
    }

    #[test]
    fn rejects_non_image_bytes() {
        let cfg = AppConfig::default();
        let err = decode_image_from_bytes(&cfg, b"definitely not an image".to_vec())
            .expect_err("garbage must not decode");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn missing_path_reports_file_name() {
        let cfg = AppConfig::default();
        let err = decode_image_from_path(&cfg, Path::new("/nonexistent/retouch/missing.png"))
            .expect_err("missing file");
        assert!(err.to_string().contains("missing.png"));
    }
}

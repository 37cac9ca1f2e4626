use image::RgbaImage;
use rayon::prelude::*;

/// Minimum pixel count before parallelizing per-pixel work.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 262_144; // 512x512

const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Color filter chain with CSS `filter` shorthand semantics.
///
/// Amounts are fractions (`1.0` == `100%`). Stages run in the fixed order
/// brightness, saturate, invert, grayscale on unpremultiplied sRGB values and
/// leave alpha untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorFilter {
    pub brightness: f32,
    pub saturate: f32,
    pub invert: f32,
    pub grayscale: f32,
}

impl Default for ColorFilter {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            saturate: 1.0,
            invert: 0.0,
            grayscale: 0.0,
        }
    }
}

impl ColorFilter {
    /// Build from percentage amounts, as written in `brightness(150%)`.
    pub fn from_percentages(brightness: f32, saturate: f32, invert: f32, grayscale: f32) -> Self {
        Self {
            brightness: brightness / 100.0,
            saturate: saturate / 100.0,
            invert: invert / 100.0,
            grayscale: grayscale / 100.0,
        }
        .sanitized()
    }

    pub fn sanitized(self) -> Self {
        Self {
            brightness: self.brightness.max(0.0),
            saturate: self.saturate.max(0.0),
            invert: self.invert.clamp(0.0, 1.0),
            grayscale: self.grayscale.clamp(0.0, 1.0),
        }
    }

    pub fn is_identity(self) -> bool {
        let f = self.sanitized();
        (f.brightness - 1.0).abs() <= f32::EPSILON
            && (f.saturate - 1.0).abs() <= f32::EPSILON
            && f.invert <= f32::EPSILON
            && f.grayscale <= f32::EPSILON
    }

    /// Filter one RGBA pixel.
    pub fn apply_pixel(self, pixel: [u8; 4]) -> [u8; 4] {
        let [r, g, b, a] = pixel;
        let mut rgb = [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        ];

        if (self.brightness - 1.0).abs() > f32::EPSILON {
            for c in &mut rgb {
                *c = (*c * self.brightness).clamp(0.0, 1.0);
            }
        }
        if (self.saturate - 1.0).abs() > f32::EPSILON {
            rgb = saturate_matrix(rgb, self.saturate);
        }
        if self.invert > f32::EPSILON {
            for c in &mut rgb {
                *c = (1.0 - *c)
                    .mul_add(self.invert, *c * (1.0 - self.invert))
                    .clamp(0.0, 1.0);
            }
        }
        if self.grayscale > f32::EPSILON {
            rgb = saturate_matrix(rgb, 1.0 - self.grayscale);
        }

        [
            float_to_u8(rgb[0]),
            float_to_u8(rgb[1]),
            float_to_u8(rgb[2]),
            a,
        ]
    }

    /// Filter every pixel of `image` in place.
    pub fn apply_in_place(self, image: &mut RgbaImage) {
        let filter = self.sanitized();
        if filter.is_identity() {
            return;
        }
        let total_pixels = image.width() as usize * image.height() as usize;
        let apply = |px: &mut [u8]| {
            let out = filter.apply_pixel([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        };
        if total_pixels >= PARALLEL_PIXEL_THRESHOLD {
            image.par_chunks_exact_mut(4).for_each(apply);
        } else {
            image.chunks_exact_mut(4).for_each(apply);
        }
    }
}

/// `feColorMatrix type="saturate"`; grayscale(g) is saturate(1 - g).
fn saturate_matrix([r, g, b]: [f32; 3], s: f32) -> [f32; 3] {
    let rr = (1.0 - LUMA_R).mul_add(s, LUMA_R);
    let rg = LUMA_G - LUMA_G * s;
    let rb = LUMA_B - LUMA_B * s;
    let gr = LUMA_R - LUMA_R * s;
    let gg = (1.0 - LUMA_G).mul_add(s, LUMA_G);
    let gb = LUMA_B - LUMA_B * s;
    let br = LUMA_R - LUMA_R * s;
    let bg = LUMA_G - LUMA_G * s;
    let bb = (1.0 - LUMA_B).mul_add(s, LUMA_B);
    [
        rb.mul_add(b, rr.mul_add(r, rg * g)).clamp(0.0, 1.0),
        gb.mul_add(b, gr.mul_add(r, gg * g)).clamp(0.0, 1.0),
        bb.mul_add(b, br.mul_add(r, bg * g)).clamp(0.0, 1.0),
    ]
}

fn float_to_u8(value: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

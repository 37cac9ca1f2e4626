//! Live preview: a downscaled copy of the source with the color filter baked
//! in, drawn with the geometry of the current transform string.

use crate::engine::{PreviewGeometry, PreviewStyle};
use crate::image::{ColorFilter, fit_within};
use egui::{ColorImage, Context, Rect, TextureHandle, TextureOptions, Vec2, pos2};
use image::RgbaImage;
use tracing::warn;

/// Texture mirroring the filtered preview pixels.
pub struct PreviewTexture {
    base: RgbaImage,
    texture: TextureHandle,
    filter: ColorFilter,
    geometry: PreviewGeometry,
}

const NEUTRAL_GEOMETRY: PreviewGeometry = PreviewGeometry {
    rotation_degrees: 0.0,
    scale_x: 1.0,
    scale_y: 1.0,
};

fn to_color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

impl PreviewTexture {
    /// Downscale `source` so its longest edge is at most `max_edge` and
    /// upload it unfiltered.
    pub fn new(ctx: &Context, source: &RgbaImage, max_edge: u32) -> Self {
        let base = fit_within(source, max_edge);
        let texture =
            ctx.load_texture("preview_image", to_color_image(&base), TextureOptions::LINEAR);
        Self {
            base,
            texture,
            filter: ColorFilter::default(),
            geometry: NEUTRAL_GEOMETRY,
        }
    }

    /// Re-apply a preview style. Strings that fail to parse leave the
    /// corresponding part of the preview unchanged.
    pub fn apply_style(&mut self, style: &PreviewStyle) {
        match style.color_filter() {
            Some(filter) if filter != self.filter => {
                let mut pixels = self.base.clone();
                filter.apply_in_place(&mut pixels);
                self.texture
                    .set(to_color_image(&pixels), TextureOptions::LINEAR);
                self.filter = filter;
            }
            Some(_) => {}
            None => warn!(css = %style.filter_css, "preview filter not understood"),
        }
        match style.geometry() {
            Some(geometry) => self.geometry = geometry,
            None => warn!(css = %style.transform_css, "preview transform not understood"),
        }
    }

    /// Paint centered in `ui`'s remaining space. Mirroring is done by
    /// swapping UV corners and rotation about the frame center, which
    /// applies the scale before the rotation. Whatever the rotation pushes
    /// outside the natural-aspect frame is clipped, as on export.
    pub fn paint(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let layout = PreviewLayout::fit(self.base.dimensions(), rect);
        let (u0, u1) = if self.geometry.scale_x < 0.0 { (1.0, 0.0) } else { (0.0, 1.0) };
        let (v0, v1) = if self.geometry.scale_y < 0.0 { (1.0, 0.0) } else { (0.0, 1.0) };
        let previous_clip = ui.clip_rect();
        ui.shrink_clip_rect(layout.frame);
        egui::Image::new((self.texture.id(), layout.frame.size()))
            .uv(Rect::from_min_max(pos2(u0, v0), pos2(u1, v1)))
            .rotate(self.geometry.radians(), Vec2::splat(0.5))
            .paint_at(ui, layout.frame);
        ui.set_clip_rect(previous_clip);
        if layout.visible(&self.geometry) != layout.frame {
            // Outline the saved area where the turn leaves it transparent.
            ui.painter().rect_stroke(
                layout.frame,
                0.0,
                egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
                egui::StrokeKind::Outside,
            );
        }
    }
}

/// Placement of the preview inside the central pane.
///
/// `frame` keeps the source's natural aspect whatever the rotation, since
/// the exported file has the source's dimensions. The image quad is drawn
/// into `frame` and rotated about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PreviewLayout {
    frame: Rect,
}

impl PreviewLayout {
    /// Fit `base` into `available` without upscaling.
    #[allow(clippy::cast_precision_loss)]
    fn fit((width, height): (u32, u32), available: Rect) -> Self {
        let base = Vec2::new(width as f32, height as f32);
        let scale = (available.width() / base.x)
            .min(available.height() / base.y)
            .clamp(0.0, 1.0);
        Self {
            frame: Rect::from_center_size(available.center(), base * scale),
        }
    }

    /// Axis-aligned area covered by the rotated quad, before clipping.
    fn footprint(&self, geometry: &PreviewGeometry) -> Rect {
        let quarter_turned = (geometry.rotation_degrees / 90.0).round().rem_euclid(2.0) > 0.5;
        let size = self.frame.size();
        let size = if quarter_turned { size.yx() } else { size };
        Rect::from_center_size(self.frame.center(), size)
    }

    /// Part of the frame the image actually covers; the rest is transparent.
    fn visible(&self, geometry: &PreviewGeometry) -> Rect {
        self.frame.intersect(self.footprint(geometry))
    }
}

//! Filter state engine: owns the adjustment state for the loaded image,
//! turns control-panel intents into state changes, and derives both the live
//! preview style and the export raster from that single state.

mod export;
mod state;
mod style;

use std::sync::Arc;

use image::RgbaImage;
use tracing::debug;

use crate::error::{EditorError, EditorResult};
use crate::image::TransformOp;

pub use export::{ExportFormat, encode_export, render_export};
pub use state::{AdjustmentKind, AdjustmentState, SliderConfig};
pub use style::{PreviewGeometry, PreviewStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// Discrete user intents emitted by the control panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    SelectAdjustment(AdjustmentKind),
    SliderChanged(f64),
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
    Reset,
}

/// What the control panel must refresh after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (no image loaded, or the value was already set).
    Unchanged,
    /// The preview style must be re-applied.
    Restyled(PreviewStyle),
    /// The slider must be reconfigured, and the preview re-applied.
    SliderReconfigured(SliderConfig, PreviewStyle),
}

/// Adjustment state plus the image it applies to.
///
/// Every mutation is a silent no-op until [`FilterEngine::load_new_image`]
/// has been called once.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    state: AdjustmentState,
    source: Option<Arc<RgbaImage>>,
    generation: u64,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub const fn state(&self) -> &AdjustmentState {
        &self.state
    }

    pub fn source(&self) -> Option<&Arc<RgbaImage>> {
        self.source.as_ref()
    }

    /// Incremented on every load; work started under an older generation is
    /// stale.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Slider configuration for the active adjustment.
    pub fn slider(&self) -> Option<SliderConfig> {
        self.is_loaded().then(|| self.state.slider())
    }

    /// Replace the current image, resetting all adjustments.
    pub fn load_new_image(&mut self, bitmap: RgbaImage) -> Arc<RgbaImage> {
        let bitmap = Arc::new(bitmap);
        self.source = Some(Arc::clone(&bitmap));
        self.generation = self.generation.wrapping_add(1);
        self.state = AdjustmentState::default();
        debug!(
            generation = self.generation,
            width = bitmap.width(),
            height = bitmap.height(),
            "image loaded, adjustments reset"
        );
        bitmap
    }

    pub fn select_adjustment(&mut self, kind: AdjustmentKind) -> Option<SliderConfig> {
        if !self.is_loaded() {
            debug!(?kind, "select ignored: no image loaded");
            return None;
        }
        self.state.active = kind;
        Some(self.state.slider())
    }

    /// Store a slider reading for the active adjustment, clamped to its
    /// bounds. Returns whether the stored value changed.
    pub fn set_active_adjustment_value(&mut self, value: f64) -> bool {
        if !self.is_loaded() {
            debug!(value, "slider change ignored: no image loaded");
            return false;
        }
        let kind = self.state.active;
        let Some(clamped) = kind.clamp(value) else {
            debug!(value, "slider change ignored: not a number");
            return false;
        };
        if self.state.value(kind) == clamped {
            return false;
        }
        self.state.set_value(kind, clamped);
        true
    }

    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let op = match direction {
            RotateDirection::Left => TransformOp::RotateLeft,
            RotateDirection::Right => TransformOp::RotateRight,
        };
        self.apply_transform(op)
    }

    pub fn flip(&mut self, axis: FlipAxis) -> bool {
        let op = match axis {
            FlipAxis::Horizontal => TransformOp::FlipHorizontal,
            FlipAxis::Vertical => TransformOp::FlipVertical,
        };
        self.apply_transform(op)
    }

    fn apply_transform(&mut self, op: TransformOp) -> bool {
        if !self.is_loaded() {
            debug!(?op, "transform ignored: no image loaded");
            return false;
        }
        self.state.orientation.apply(op);
        true
    }

    /// Restore defaults and select brightness.
    pub fn reset(&mut self) -> bool {
        if !self.is_loaded() {
            return false;
        }
        self.state = AdjustmentState::default();
        true
    }

    pub fn compute_preview_style(&self) -> PreviewStyle {
        let style = PreviewStyle::from_state(&self.state);
        debug_assert_eq!(style.color_filter(), Some(self.state.color_filter()));
        style
    }

    /// Rasterize the loaded state onto a `natural_width × natural_height`
    /// surface.
    pub fn render_export(
        &self,
        source: &RgbaImage,
        natural_width: u32,
        natural_height: u32,
    ) -> EditorResult<RgbaImage> {
        if !self.is_loaded() {
            return Err(EditorError::NoImageLoaded);
        }
        render_export(&self.state, source, natural_width, natural_height)
    }

    /// Apply one control-panel intent.
    pub fn handle(&mut self, intent: Intent) -> Outcome {
        let changed = match intent {
            Intent::SelectAdjustment(kind) => {
                return self.select_adjustment(kind).map_or(Outcome::Unchanged, |slider| {
                    Outcome::SliderReconfigured(slider, self.compute_preview_style())
                });
            }
            Intent::Reset => {
                if !self.reset() {
                    return Outcome::Unchanged;
                }
                return Outcome::SliderReconfigured(
                    self.state.slider(),
                    self.compute_preview_style(),
                );
            }
            Intent::SliderChanged(value) => self.set_active_adjustment_value(value),
            Intent::RotateLeft => self.rotate(RotateDirection::Left),
            Intent::RotateRight => self.rotate(RotateDirection::Right),
            Intent::FlipHorizontal => self.flip(FlipAxis::Horizontal),
            Intent::FlipVertical => self.flip(FlipAxis::Vertical),
        };
        if changed {
            Outcome::Restyled(self.compute_preview_style())
        } else {
            Outcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests;

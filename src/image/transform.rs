use image::{RgbaImage, imageops::FilterType};

/// Snap tolerance for trigonometric results of quarter-turn angles.
const SNAP_EPS: f64 = 1e-9;

/// Geometric operation that can be applied to an [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
}

/// Scale factor of one axis: `1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipSign {
    #[default]
    Positive,
    Negative,
}

impl FlipSign {
    pub const fn value(self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// Accumulated rotation and flip state, pivoting on the image center.
///
/// The rotation is not normalized: repeated quarter turns keep accumulating
/// so that a visual rotation never "snaps back" through zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientation {
    pub rotation_degrees: i64,
    pub flip_horizontal: FlipSign,
    pub flip_vertical: FlipSign,
}

impl Orientation {
    pub const QUARTER_TURN: i64 = 90;

    /// Identity transform (no rotation or reflection).
    pub const fn identity() -> Self {
        Self {
            rotation_degrees: 0,
            flip_horizontal: FlipSign::Positive,
            flip_vertical: FlipSign::Positive,
        }
    }

    /// Apply a single transform operation to the accumulated state.
    pub const fn apply(&mut self, op: TransformOp) {
        match op {
            TransformOp::RotateLeft => {
                self.rotation_degrees = self.rotation_degrees.saturating_sub(Self::QUARTER_TURN);
            }
            TransformOp::RotateRight => {
                self.rotation_degrees = self.rotation_degrees.saturating_add(Self::QUARTER_TURN);
            }
            TransformOp::FlipHorizontal => {
                self.flip_horizontal = self.flip_horizontal.toggled();
            }
            TransformOp::FlipVertical => {
                self.flip_vertical = self.flip_vertical.toggled();
            }
        }
    }

    /// Clockwise quarter turns in `0..4`.
    pub const fn quarter_turns(self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (self.rotation_degrees.rem_euclid(360) / Self::QUARTER_TURN) as u8
        }
    }

    pub fn is_identity(self) -> bool {
        self.quarter_turns() == 0
            && self.flip_horizontal == FlipSign::Positive
            && self.flip_vertical == FlipSign::Positive
    }
}

/// 2D affine matrix with canvas conventions: `x' = a*x + c*y + e`,
/// `y' = b*x + d*y + f`, y axis pointing down. Operations post-multiply, so
/// the last one issued is the first applied to drawn geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2 {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.e += self.a.mul_add(tx, self.c * ty);
        self.f += self.b.mul_add(tx, self.d * ty);
    }

    /// Rotate clockwise (in y-down space) by `radians`.
    pub fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let (sin, cos) = (snap_unit(sin), snap_unit(cos));
        let Self { a, b, c, d, .. } = *self;
        self.a = a.mul_add(cos, c * sin);
        self.b = b.mul_add(cos, d * sin);
        self.c = c.mul_add(cos, -a * sin);
        self.d = d.mul_add(cos, -b * sin);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.a *= sx;
        self.b *= sx;
        self.c *= sy;
        self.d *= sy;
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a.mul_add(x, self.c.mul_add(y, self.e)),
            self.b.mul_add(x, self.d.mul_add(y, self.f)),
        )
    }

    /// Inverse matrix, `None` when the transform collapses the plane.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a.mul_add(self.d, -self.b * self.c);
        if det.abs() <= f64::EPSILON {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Self {
            a,
            b,
            c,
            d,
            e: -a.mul_add(self.e, c * self.f),
            f: -b.mul_add(self.e, d * self.f),
        })
    }
}

/// Round values within `SNAP_EPS` of -1, 0 or 1 so quarter turns stay exact.
fn snap_unit(value: f64) -> f64 {
    let rounded = value.round();
    if (value - rounded).abs() < SNAP_EPS {
        rounded
    } else {
        value
    }
}

/// Downscale so the longest edge fits `max_edge`; smaller images are cloned.
pub fn fit_within(src: &RgbaImage, max_edge: u32) -> RgbaImage {
    let (width, height) = src.dimensions();
    let longest = width.max(height);
    if longest <= max_edge || longest == 0 {
        return src.clone();
    }
    let scale = f64::from(max_edge) / f64::from(longest);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (new_w, new_h) = (
        ((f64::from(width) * scale).round() as u32).max(1),
        ((f64::from(height) * scale).round() as u32).max(1),
    );
    image::imageops::resize(src, new_w, new_h, FilterType::Triangle)
}

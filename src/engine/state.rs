use crate::image::{ColorFilter, Orientation};

/// Slider-bound color parameter currently being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdjustmentKind {
    #[default]
    Brightness,
    Saturation,
    Inversion,
    Grayscale,
}

/// Bounds plus accessors for one adjustment; indexed by [`AdjustmentKind`].
pub struct AdjustmentInfo {
    pub label: &'static str,
    pub max: u16,
    pub default: u16,
    get: fn(&AdjustmentState) -> u16,
    set: fn(&mut AdjustmentState, u16),
}

static ADJUSTMENTS: [AdjustmentInfo; 4] = [
    AdjustmentInfo {
        label: "Brightness",
        max: 200,
        default: 100,
        get: |s| s.brightness,
        set: |s, v| s.brightness = v,
    },
    AdjustmentInfo {
        label: "Saturation",
        max: 200,
        default: 100,
        get: |s| s.saturation,
        set: |s, v| s.saturation = v,
    },
    AdjustmentInfo {
        label: "Inversion",
        max: 100,
        default: 0,
        get: |s| s.inversion,
        set: |s, v| s.inversion = v,
    },
    AdjustmentInfo {
        label: "Grayscale",
        max: 100,
        default: 0,
        get: |s| s.grayscale,
        set: |s, v| s.grayscale = v,
    },
];

impl AdjustmentKind {
    pub const ALL: [Self; 4] = [
        Self::Brightness,
        Self::Saturation,
        Self::Inversion,
        Self::Grayscale,
    ];

    pub const MIN: u16 = 0;

    pub fn info(self) -> &'static AdjustmentInfo {
        &ADJUSTMENTS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn max(self) -> u16 {
        self.info().max
    }

    /// Clamp an arbitrary slider reading into `[MIN, max]`, rounding to whole
    /// percent. Non-finite readings have no meaningful position and yield `None`.
    pub fn clamp(self, value: f64) -> Option<u16> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.round().clamp(f64::from(Self::MIN), f64::from(self.max()));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            Some(clamped as u16)
        }
    }
}

/// Everything the slider needs to present the active adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderConfig {
    pub kind: AdjustmentKind,
    pub min: u16,
    pub max: u16,
    pub value: u16,
    pub unit: &'static str,
}

impl SliderConfig {
    /// Display string for the value label, e.g. `150%`.
    pub fn value_label(&self) -> String {
        format!("{}{}", self.value, self.unit)
    }
}

/// Full adjustment record for the loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentState {
    pub brightness: u16,
    pub saturation: u16,
    pub inversion: u16,
    pub grayscale: u16,
    pub orientation: Orientation,
    pub active: AdjustmentKind,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            brightness: AdjustmentKind::Brightness.info().default,
            saturation: AdjustmentKind::Saturation.info().default,
            inversion: AdjustmentKind::Inversion.info().default,
            grayscale: AdjustmentKind::Grayscale.info().default,
            orientation: Orientation::identity(),
            active: AdjustmentKind::Brightness,
        }
    }
}

impl AdjustmentState {
    pub fn value(&self, kind: AdjustmentKind) -> u16 {
        (kind.info().get)(self)
    }

    /// Store `value` for `kind`, clamped to the kind's bounds.
    pub fn set_value(&mut self, kind: AdjustmentKind, value: u16) {
        (kind.info().set)(self, value.min(kind.max()));
    }

    pub fn slider(&self) -> SliderConfig {
        let kind = self.active;
        SliderConfig {
            kind,
            min: AdjustmentKind::MIN,
            max: kind.max(),
            value: self.value(kind),
            unit: "%",
        }
    }

    pub fn color_filter(&self) -> ColorFilter {
        ColorFilter::from_percentages(
            f32::from(self.brightness),
            f32::from(self.saturation),
            f32::from(self.inversion),
            f32::from(self.grayscale),
        )
    }
}

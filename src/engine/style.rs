//! Preview descriptors in CSS `filter` / `transform` notation.
//!
//! Both render paths consume these strings: the live preview parses them back
//! into a [`ColorFilter`] and a [`PreviewGeometry`], and the exporter hands
//! the filter string to its drawing surface. Term order is fixed.

use std::fmt;

use super::state::AdjustmentState;
use crate::image::ColorFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewStyle {
    pub filter_css: String,
    pub transform_css: String,
}

impl PreviewStyle {
    pub fn from_state(state: &AdjustmentState) -> Self {
        Self {
            filter_css: filter_css(state),
            transform_css: transform_css(state),
        }
    }

    pub fn color_filter(&self) -> Option<ColorFilter> {
        parse_filter_css(&self.filter_css)
    }

    pub fn geometry(&self) -> Option<PreviewGeometry> {
        parse_transform_css(&self.transform_css)
    }
}

impl fmt::Display for PreviewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "filter: {}; transform: {};",
            self.filter_css, self.transform_css
        )
    }
}

/// Numeric form of `rotate(Rdeg) scale(H, V)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewGeometry {
    pub rotation_degrees: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl PreviewGeometry {
    #[allow(clippy::cast_possible_truncation)]
    pub fn radians(&self) -> f32 {
        self.rotation_degrees.to_radians() as f32
    }
}

pub fn filter_css(state: &AdjustmentState) -> String {
    format!(
        "brightness({}%) saturate({}%) invert({}%) grayscale({}%)",
        state.brightness, state.saturation, state.inversion, state.grayscale
    )
}

pub fn transform_css(state: &AdjustmentState) -> String {
    let orientation = state.orientation;
    format!(
        "rotate({}deg) scale({}, {})",
        orientation.rotation_degrees,
        orientation.flip_horizontal.value(),
        orientation.flip_vertical.value()
    )
}

/// Split `name(args) name(args)` into `(name, [args])` pairs.
fn css_functions(input: &str) -> Option<Vec<(&str, Vec<&str>)>> {
    let mut out = Vec::new();
    let mut rest = input.trim();
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest[open..].find(')')? + open;
        let name = rest[..open].trim();
        if name.is_empty() {
            return None;
        }
        let args = rest[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect();
        out.push((name, args));
        rest = rest[close + 1..].trim_start();
    }
    Some(out)
}

/// `150%` → `1.5`, `0.3` → `0.3`.
fn parse_amount(arg: &str) -> Option<f32> {
    let value = match arg.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => arg.parse::<f32>().ok()?,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parse a CSS filter list restricted to the four supported functions.
/// Missing functions keep their neutral value; anything else rejects the
/// whole list, as canvas contexts ignore invalid filter strings.
pub fn parse_filter_css(input: &str) -> Option<ColorFilter> {
    if input.trim() == "none" {
        return Some(ColorFilter::default());
    }
    let mut filter = ColorFilter::default();
    for (name, args) in css_functions(input)? {
        let [arg] = args.as_slice() else {
            return None;
        };
        let amount = parse_amount(arg)?;
        match name {
            "brightness" => filter.brightness = amount,
            "saturate" => filter.saturate = amount,
            "invert" => filter.invert = amount,
            "grayscale" => filter.grayscale = amount,
            _ => return None,
        }
    }
    Some(filter.sanitized())
}

/// Parse `rotate(Ndeg) scale(x, y)`; either function may be absent.
pub fn parse_transform_css(input: &str) -> Option<PreviewGeometry> {
    let mut geometry = PreviewGeometry {
        rotation_degrees: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };
    for (name, args) in css_functions(input)? {
        match (name, args.as_slice()) {
            ("rotate", [angle]) => {
                geometry.rotation_degrees = angle.strip_suffix("deg")?.trim().parse().ok()?;
            }
            ("scale", [s]) => {
                let s: f64 = s.parse().ok()?;
                geometry.scale_x = s;
                geometry.scale_y = s;
            }
            ("scale", [x, y]) => {
                geometry.scale_x = x.parse().ok()?;
                geometry.scale_y = y.parse().ok()?;
            }
            _ => return None,
        }
    }
    Some(geometry)
}

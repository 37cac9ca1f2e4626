use super::*;
use image::Rgba;

fn sample_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let id = u8::try_from(y * width + x).unwrap_or(u8::MAX);
        Rgba([id.wrapping_mul(37), 255 - id.wrapping_mul(11), id.wrapping_mul(5), 255])
    })
}

fn loaded_engine(width: u32, height: u32) -> FilterEngine {
    let mut engine = FilterEngine::new();
    engine.load_new_image(sample_image(width, height));
    engine
}

/// Rasterize what the live preview shows: the parsed filter applied to the
/// source, then each pixel center carried forward through
/// `rotate(R) scale(H, V)` about the box center.
fn preview_raster(style: &PreviewStyle, src: &RgbaImage) -> RgbaImage {
    let filter = style.color_filter().expect("valid filter css");
    let geometry = style.geometry().expect("valid transform css");
    let mut filtered = src.clone();
    filter.apply_in_place(&mut filtered);

    let (w, h) = src.dimensions();
    let (sin, cos) = geometry.rotation_degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.round(), cos.round());
    let (cx, cy) = (f64::from(w) / 2.0, f64::from(h) / 2.0);
    let mut out = RgbaImage::new(w, h);
    for (x, y, px) in filtered.enumerate_pixels() {
        let lx = (f64::from(x) + 0.5 - cx) * geometry.scale_x;
        let ly = (f64::from(y) + 0.5 - cy) * geometry.scale_y;
        let dx = cos.mul_add(lx, -sin * ly) + cx;
        let dy = sin.mul_add(lx, cos * ly) + cy;
        if dx < 0.0 || dy < 0.0 || dx >= f64::from(w) || dy >= f64::from(h) {
            continue;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        out.put_pixel(dx.floor() as u32, dy.floor() as u32, *px);
    }
    out
}

#[test]
fn operations_before_load_are_silent_no_ops() {
    let mut engine = FilterEngine::new();
    let before = *engine.state();
    assert!(!engine.set_active_adjustment_value(50.0));
    assert!(engine.select_adjustment(AdjustmentKind::Grayscale).is_none());
    assert!(!engine.rotate(RotateDirection::Right));
    assert!(!engine.flip(FlipAxis::Vertical));
    assert!(!engine.reset());
    assert_eq!(engine.handle(Intent::SliderChanged(50.0)), Outcome::Unchanged);
    assert_eq!(engine.handle(Intent::RotateLeft), Outcome::Unchanged);
    assert_eq!(*engine.state(), before);
    assert!(engine.slider().is_none());
}

#[test]
fn export_before_load_reports_no_image() {
    let engine = FilterEngine::new();
    let src = sample_image(2, 2);
    assert_eq!(
        engine.render_export(&src, 2, 2),
        Err(EditorError::NoImageLoaded)
    );
}

#[test]
fn loading_resets_state_and_bumps_generation() {
    let mut engine = loaded_engine(2, 2);
    let first_generation = engine.generation();
    engine.select_adjustment(AdjustmentKind::Inversion);
    engine.set_active_adjustment_value(80.0);
    engine.rotate(RotateDirection::Left);

    let shown = engine.load_new_image(sample_image(3, 1));
    assert_eq!(shown.dimensions(), (3, 1));
    assert_eq!(*engine.state(), AdjustmentState::default());
    assert_eq!(engine.generation(), first_generation + 1);
    assert!(Arc::ptr_eq(&shown, engine.source().expect("loaded")));
}

#[test]
fn reset_is_idempotent_and_selects_brightness() {
    let mut engine = loaded_engine(2, 2);
    engine.select_adjustment(AdjustmentKind::Saturation);
    engine.set_active_adjustment_value(10.0);
    engine.flip(FlipAxis::Horizontal);

    engine.reset();
    let once = *engine.state();
    engine.reset();
    assert_eq!(*engine.state(), once);
    let slider = engine.slider().expect("loaded");
    assert_eq!(slider.kind, AdjustmentKind::Brightness);
    assert_eq!(slider.value, 100);
    assert_eq!(slider.max, 200);
}

#[test]
fn rotate_left_then_right_restores_angle() {
    let mut engine = loaded_engine(2, 2);
    engine.rotate(RotateDirection::Right);
    let prior = engine.state().orientation.rotation_degrees;
    engine.rotate(RotateDirection::Left);
    engine.rotate(RotateDirection::Right);
    assert_eq!(engine.state().orientation.rotation_degrees, prior);
}

#[test]
fn flip_twice_restores_sign() {
    let mut engine = loaded_engine(2, 2);
    engine.flip(FlipAxis::Horizontal);
    assert_eq!(engine.state().orientation.flip_horizontal.value(), -1);
    engine.flip(FlipAxis::Horizontal);
    assert_eq!(engine.state().orientation.flip_horizontal.value(), 1);
}

#[test]
fn slider_values_are_clamped_to_active_bounds() {
    let mut engine = loaded_engine(2, 2);
    assert!(engine.set_active_adjustment_value(250.0));
    assert_eq!(engine.state().brightness, 200);
    assert!(engine.set_active_adjustment_value(-10.0));
    assert_eq!(engine.state().brightness, 0);
    assert!(!engine.set_active_adjustment_value(-3.0));
    assert!(!engine.set_active_adjustment_value(f64::INFINITY));
    assert_eq!(engine.state().brightness, 0);

    engine.select_adjustment(AdjustmentKind::Grayscale);
    engine.set_active_adjustment_value(150.0);
    assert_eq!(engine.state().grayscale, 100);
}

#[test]
fn select_reports_bounds_and_current_value() {
    let mut engine = loaded_engine(2, 2);
    engine.select_adjustment(AdjustmentKind::Inversion);
    engine.set_active_adjustment_value(35.0);
    engine.select_adjustment(AdjustmentKind::Brightness);
    let slider = engine
        .select_adjustment(AdjustmentKind::Inversion)
        .expect("loaded");
    assert_eq!((slider.min, slider.max, slider.value), (0, 100, 35));
    assert_eq!(slider.unit, "%");
}

#[test]
fn saturation_scenario_updates_only_saturate_term() {
    let mut engine = loaded_engine(2, 2);
    engine.handle(Intent::SelectAdjustment(AdjustmentKind::Saturation));
    let outcome = engine.handle(Intent::SliderChanged(150.0));
    let Outcome::Restyled(style) = outcome else {
        panic!("expected restyle, got {outcome:?}");
    };
    assert!(style.filter_css.contains("saturate(150%)"));
    assert!(style.filter_css.contains("brightness(100%)"));
    assert!(style.filter_css.contains("invert(0%)"));
    assert!(style.filter_css.contains("grayscale(0%)"));
}

#[test]
fn rotating_right_twice_yields_half_turn() {
    let mut engine = loaded_engine(2, 2);
    engine.handle(Intent::RotateRight);
    engine.handle(Intent::RotateRight);
    assert!(
        engine
            .compute_preview_style()
            .transform_css
            .contains("rotate(180deg)")
    );
}

#[test]
fn reset_intent_reconfigures_slider() {
    let mut engine = loaded_engine(2, 2);
    engine.handle(Intent::SelectAdjustment(AdjustmentKind::Grayscale));
    engine.handle(Intent::SliderChanged(40.0));
    match engine.handle(Intent::Reset) {
        Outcome::SliderReconfigured(slider, style) => {
            assert_eq!(slider.kind, AdjustmentKind::Brightness);
            assert_eq!(slider.value, 100);
            assert_eq!(style, PreviewStyle::from_state(&AdjustmentState::default()));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn unchanged_slider_value_does_not_restyle() {
    let mut engine = loaded_engine(2, 2);
    assert_eq!(engine.handle(Intent::SliderChanged(100.0)), Outcome::Unchanged);
}

#[test]
fn export_matches_preview_for_every_orientation() {
    let color_states: [(u16, u16, u16, u16); 4] = [
        (100, 100, 0, 0),
        (150, 40, 0, 0),
        (70, 180, 30, 0),
        (120, 100, 100, 60),
    ];
    let op_sequences: &[&[Intent]] = &[
        &[],
        &[Intent::RotateRight],
        &[Intent::RotateLeft],
        &[Intent::RotateRight, Intent::RotateRight],
        &[Intent::FlipHorizontal],
        &[Intent::FlipVertical],
        &[Intent::RotateRight, Intent::FlipHorizontal],
        &[Intent::RotateLeft, Intent::FlipVertical, Intent::FlipHorizontal],
        &[Intent::RotateRight; 5],
    ];

    for (width, height) in [(3, 3), (4, 2), (5, 3), (6, 4)] {
        for (b, s, i, g) in color_states {
            for ops in op_sequences {
                let mut engine = loaded_engine(width, height);
                for (kind, value) in [
                    (AdjustmentKind::Brightness, b),
                    (AdjustmentKind::Saturation, s),
                    (AdjustmentKind::Inversion, i),
                    (AdjustmentKind::Grayscale, g),
                ] {
                    engine.handle(Intent::SelectAdjustment(kind));
                    engine.handle(Intent::SliderChanged(f64::from(value)));
                }
                for op in *ops {
                    engine.handle(*op);
                }

                let source = Arc::clone(engine.source().expect("loaded"));
                let exported = engine
                    .render_export(&source, width, height)
                    .expect("export");
                let previewed = preview_raster(&engine.compute_preview_style(), &source);
                assert_eq!(
                    exported,
                    previewed,
                    "{width}x{height} {:?}",
                    engine.compute_preview_style()
                );
            }
        }
    }
}

#[test]
fn quarter_turn_of_wide_image_leaves_transparent_sides() {
    let mut engine = loaded_engine(6, 2);
    engine.rotate(RotateDirection::Left);
    let source = Arc::clone(engine.source().expect("loaded"));
    let out = engine.render_export(&source, 6, 2).expect("export");
    assert_eq!(out.dimensions(), (6, 2));
    for y in 0..2 {
        for x in [0, 1, 4, 5] {
            assert_eq!(out.get_pixel(x, y).0[3], 0, "({x}, {y}) should be empty");
        }
        for x in [2, 3] {
            assert_eq!(out.get_pixel(x, y).0[3], 255, "({x}, {y}) should be drawn");
        }
    }
}

#[test]
fn export_encodes_to_default_jpeg() {
    let engine = loaded_engine(4, 4);
    let source = Arc::clone(engine.source().expect("loaded"));
    let raster = engine.render_export(&source, 4, 4).expect("export");
    let settings = crate::config::ExportSettings::default();
    let format = ExportFormat::from_path(std::path::Path::new(&settings.file_name));
    assert_eq!(format, ExportFormat::Jpeg);
    let bytes = encode_export(&raster, format, &settings).expect("encode");
    let decoded = image::load_from_memory(&bytes).expect("decode jpeg");
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

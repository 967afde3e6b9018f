use gardenkit_core::{Point, Rect};
use gardenkit_designer::viewport::{CameraClamp, Viewport};
use gardenkit_settings::EditorConfig;
use proptest::prelude::*;

#[test]
fn test_screen_world_roundtrip() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.zoom_to(2.0, Point::new(400.0, 300.0));
    vp.pan_by(35.0, -12.0);
    let world = Point::new(123.0, -45.0);
    let back = vp.screen_to_world(vp.world_to_screen(world));
    assert!((back.x - world.x).abs() < 1e-9);
    assert!((back.y - world.y).abs() < 1e-9);
}

#[test]
fn test_fit_centers_content() {
    let mut vp = Viewport::new(1200.0, 800.0);
    vp.fit_to_content(Rect::new(0.0, 0.0, 1600.0, 1000.0), 40.0);
    let center = vp.world_center();
    assert!((center.x - 800.0).abs() < 1e-6);
    assert!((center.y - 500.0).abs() < 1e-6);
}

#[test]
fn test_viewer_cannot_zoom_out_past_fit() {
    let content = Rect::new(0.0, 0.0, 1600.0, 1000.0);
    let mut vp = Viewport::viewer(800.0, 500.0, content);
    let fit = vp.scale();
    vp.zoom_to(fit / 4.0, Point::new(400.0, 250.0));
    assert_eq!(vp.scale(), fit);
    vp.zoom_to(100.0, Point::new(400.0, 250.0));
    assert_eq!(vp.scale(), 6.0);
}

#[test]
fn test_camera_clamp_keeps_plot_visible() {
    let mut vp = Viewport::from_config(800.0, 600.0, &EditorConfig::default());
    vp.set_camera_clamp(Some(CameraClamp {
        plot: Rect::new(0.0, 0.0, 1600.0, 1000.0),
        margin: 120.0,
    }));
    vp.pan_by(100_000.0, 100_000.0);
    let top_left = vp.world_to_screen(Point::ZERO);
    assert!(top_left.x <= 800.0 - 120.0 + 1e-6);
    assert!(top_left.y <= 600.0 - 120.0 + 1e-6);
}

#[test]
fn test_invalid_inputs_ignored() {
    let mut vp = Viewport::new(800.0, 600.0);
    let before = vp.clone();
    vp.zoom_to(f64::NAN, Point::ZERO);
    vp.pan_by(f64::INFINITY, 0.0);
    vp.set_size(0.0, -5.0);
    assert_eq!(vp, before);
}

proptest! {
    #[test]
    fn prop_zoom_stays_within_limits(ticks in prop::collection::vec(-1.0f64..1.0, 1..200),
                                     ax in 0.0f64..800.0, ay in 0.0f64..600.0) {
        let mut vp = Viewport::new(800.0, 600.0);
        let (min, max) = vp.limits();
        for t in ticks {
            vp.wheel_zoom(t, Point::new(ax, ay));
            prop_assert!(vp.scale() >= min && vp.scale() <= max);
        }
    }

    #[test]
    fn prop_zoom_keeps_anchor_fixed(scale in 0.35f64..2.6, ax in 0.0f64..800.0, ay in 0.0f64..600.0) {
        let mut vp = Viewport::new(800.0, 600.0);
        let anchor = Point::new(ax, ay);
        let world = vp.screen_to_world(anchor);
        vp.zoom_to(scale, anchor);
        let after = vp.world_to_screen(world);
        prop_assert!((after.x - anchor.x).abs() < 1e-6);
        prop_assert!((after.y - anchor.y).abs() < 1e-6);
    }
}

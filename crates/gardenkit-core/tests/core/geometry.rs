use gardenkit_core::{normalize_degrees, rotate_about, rotated_rect_bounds, snap_to_step, Point, Rect};
use proptest::prelude::*;

#[test]
fn test_snap_rounds_to_nearest() {
    assert_eq!(snap_to_step(107.0, 20.0), 100.0);
    assert_eq!(snap_to_step(193.0, 20.0), 200.0);
    assert_eq!(snap_to_step(193.0, 0.0), 193.0);
}

#[test]
fn test_quarter_turn_swaps_bounds() {
    let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
    let bounds = rotated_rect_bounds(&rect, 90.0);
    assert!((bounds.w - 100.0).abs() < 1e-9);
    assert!((bounds.h - 200.0).abs() < 1e-9);
    assert!(bounds.center().distance_to(&rect.center()) < 1e-9);
}

proptest! {
    #[test]
    fn prop_rotation_roundtrip(x in -1e4f64..1e4, y in -1e4f64..1e4, deg in -1080.0f64..1080.0) {
        let p = Point::new(x, y);
        let center = Point::new(12.5, -40.0);
        let back = rotate_about(rotate_about(p, center, deg), center, -deg);
        prop_assert!(back.distance_to(&p) < 1e-6);
    }

    #[test]
    fn prop_normalized_angle_in_range(deg in proptest::num::f64::ANY) {
        let n = normalize_degrees(deg);
        prop_assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn prop_rotated_bounds_contain_corners(w in 1.0f64..500.0, h in 1.0f64..500.0, deg in 0.0f64..360.0) {
        let rect = Rect::new(-20.0, 35.0, w, h);
        let bounds = rotated_rect_bounds(&rect, deg);
        for corner in rect.corners() {
            let p = rotate_about(corner, rect.center(), deg);
            prop_assert!(p.x >= bounds.x - 1e-9 && p.x <= bounds.x + bounds.w + 1e-9);
            prop_assert!(p.y >= bounds.y - 1e-9 && p.y <= bounds.y + bounds.h + 1e-9);
        }
    }
}

use glam::{Vec2, Vec3};
use melee_core::vector_math::{centroid, horizontal_direction, lift, rotate_about_up};

#[test]
fn horizontal_direction_ignores_height() {
    let result = horizontal_direction(Vec3::new(0.0, -5.0, 400.0));
    assert_eq!(result, Some(Vec2::NEG_Y));
}

#[test]
fn horizontal_direction_rejects_infinity() {
    assert!(horizontal_direction(Vec3::new(f32::INFINITY, 0.0, 0.0)).is_none());
}

#[test]
fn quarter_turn_maps_forward_to_left() {
    let left = lift(rotate_about_up(Vec2::X, 90.0));
    assert!(left.abs_diff_eq(Vec3::Y, 1e-6));
}

#[test]
fn centroid_of_single_point_is_that_point() {
    let point = Vec3::new(3.0, -2.0, 7.5);
    assert_eq!(centroid(&[point]), Some(point));
}

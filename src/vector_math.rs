//! Basic vector math helper functions.
//! Horizontal projections, cone thresholds and centroids used by targeting and
//! group pulls. The world is Z-up, so "horizontal" means the XY plane.
use glam::{Quat, Vec2, Vec3};

/// Returns the unit vector of `vector` projected onto the horizontal plane.
///
/// Returns `None` when the projection has no length (the vector points
/// straight up or down) or any component is not finite.
///
/// # Examples
/// ```
/// use glam::{Vec2, Vec3};
/// use melee_core::vector_math::horizontal_direction;
/// let dir = horizontal_direction(Vec3::new(3.0, 4.0, 100.0)).unwrap();
/// assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
/// assert!(horizontal_direction(Vec3::Z).is_none());
/// ```
#[must_use]
pub fn horizontal_direction(vector: Vec3) -> Option<Vec2> {
    if !vector.is_finite() {
        return None;
    }
    vector.truncate().try_normalize()
}

/// World-space forward direction for an orientation.
///
/// Entities face along their local +X axis.
#[must_use]
pub fn forward_of(rotation: Quat) -> Vec3 {
    rotation * Vec3::X
}

/// Cosine threshold for a cone with the given half-angle in degrees.
#[must_use]
pub fn cone_cosine(half_angle_degrees: f32) -> f32 {
    half_angle_degrees.to_radians().cos()
}

/// Rotates a horizontal direction about the up axis.
#[must_use]
pub fn rotate_about_up(direction: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(direction)
}

/// Lifts a horizontal direction back into world space with zero height.
#[must_use]
pub const fn lift(direction: Vec2) -> Vec3 {
    Vec3::new(direction.x, direction.y, 0.0)
}

/// Arithmetic mean of the supplied points, or `None` for an empty slice.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use melee_core::vector_math::centroid;
/// let c = centroid(&[Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0)]).unwrap();
/// assert_eq!(c, Vec3::new(1.0, 2.0, 3.0));
/// assert!(centroid(&[]).is_none());
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "Group sizes stay far below the f32 mantissa limit."
)]
pub fn centroid(points: &[Vec3]) -> Option<Vec3> {
    if points.is_empty() {
        return None;
    }
    let sum: Vec3 = points.iter().copied().sum();
    Some(sum / points.len() as f32)
}

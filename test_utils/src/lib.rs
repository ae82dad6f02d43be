//! Utility helpers for tests.
//!
//! Builds combat-ready worlds and captures the events combat operations
//! trigger so integration tests can assert on them.
pub mod arena;
pub mod events;

use bevy::prelude::Vec3;

pub use arena::{
    combat_world, spawn_fighter, spawn_fighter_facing, spawn_pullable, standard_attacks, Fighter,
};
pub use events::{install_event_capture, CapturedHits, CapturedPlacements};

/// Assert that `actual` is within `epsilon` of `expected` on every axis.
///
/// # Panics
/// Panics with both vectors in the message if any axis differs by more than
/// `epsilon`.
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, epsilon: f32) {
    assert!(
        actual.abs_diff_eq(expected, epsilon),
        "{actual} not within {epsilon} of {expected}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_vectors_pass() {
        assert_vec3_near(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.000_01), 1e-3);
    }

    #[test]
    #[should_panic(expected = "not within")]
    fn distant_vectors_panic() {
        assert_vec3_near(Vec3::ZERO, Vec3::X, 1e-3);
    }
}

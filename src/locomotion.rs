//! Locomotion queries used to gate attacks.

use bevy::prelude::*;

/// Movement-component service answering grounded/airborne questions.
#[cfg_attr(test, mockall::automock)]
pub trait LocomotionState {
    /// Whether the entity is in free fall.
    fn is_falling(&self) -> bool;
    /// Whether the entity is in a ground movement mode.
    fn is_moving_on_ground(&self) -> bool;
}

/// Component holding an entity's locomotion service.
#[derive(Component)]
pub struct Locomotion(Box<dyn LocomotionState + Send + Sync>);

impl Locomotion {
    /// Wraps a locomotion service.
    #[must_use]
    pub fn new(state: impl LocomotionState + Send + Sync + 'static) -> Self {
        Self(Box::new(state))
    }

    /// The wrapped locomotion service.
    #[must_use]
    pub fn state(&self) -> &(dyn LocomotionState + Send + Sync) {
        self.0.as_ref()
    }
}

/// Coarse movement mode, enough to answer [`LocomotionState`] queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// On the ground.
    #[default]
    Walking,
    /// In free fall.
    Falling,
    /// Airborne under control.
    Flying,
    /// In water.
    Swimming,
}

impl LocomotionState for MovementMode {
    fn is_falling(&self) -> bool {
        matches!(self, Self::Falling)
    }

    fn is_moving_on_ground(&self) -> bool {
        matches!(self, Self::Walking)
    }
}

//! Attack sequencing for combatants.
//!
//! A combatant is idle until [`perform_attack`] picks a target and starts the
//! attack animation. It returns to idle when that animation ends, whether it
//! finished or was interrupted ([`on_montage_ended`]). While attacking,
//! [`process_attack_hit`] notifies the target and [`warp_victim`] aligns it
//! with the attacker's choreography.

mod attack;
mod hit;
mod montage;
mod warp;

use bevy::prelude::*;
use thiserror::Error;

use crate::attack_table::AttackCode;

pub use attack::perform_attack;
pub use hit::{on_hit_received, process_attack_hit, HitLanded};
pub use montage::{dispatch_ended_montages, on_montage_ended, reset_attack_on_montage_end};
pub use warp::{apply_pending_placement, warp_victim, PlacementApplied};

/// Reasons an attack request is turned down. State is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttackError {
    /// The attacker lacks a combatant, transform, animator or locomotion.
    #[error("{0} is not a fully equipped combatant")]
    NotACombatant(Entity),
    /// Another animation is already playing.
    #[error("another animation is already playing")]
    AnimationBusy,
    /// The attacker is falling.
    #[error("attacker is airborne")]
    Airborne,
    /// The attacker is not in a ground movement mode.
    #[error("attacker is not moving on the ground")]
    NotGrounded,
    /// The code is unknown or has no attacker animation.
    #[error("attack '{0}' is unknown or has no attacker animation")]
    UnknownAttack(AttackCode),
    /// No combatant was found inside the detection cone.
    #[error("no target inside the detection cone")]
    NoTarget,
}

/// Reasons a hit could not be delivered to a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HitError {
    /// The attacker has no active attack.
    #[error("{0} is not attacking")]
    NotAttacking(Entity),
    /// The active code was removed from the attack table.
    #[error("attack '{0}' is no longer registered")]
    MissingDefinition(AttackCode),
    /// The target no longer exists.
    #[error("target {0} no longer exists")]
    TargetGone(Entity),
}

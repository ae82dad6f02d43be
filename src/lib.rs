#![cfg_attr(docsrs, feature(doc_cfg))]
//! Melee targeting and interaction core for character controllers.
//! Selects who an attack hits, sequences the attack against animation
//! playback, aligns victims with the attacker and pulls groups of entities
//! towards a point. Re-exports the common types for applications and tests.
pub mod animation;
pub mod attack_table;
pub mod collision;
pub mod combat;
pub mod components;
pub mod constants;
pub mod debug_draw;
pub mod group_pull;
pub mod locomotion;
pub mod logging;
pub mod plugin;
pub mod targeting;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use animation::{AnimationPlayback, AnimationRef, Animator, ClipPlayer, MontageEnded};
pub use attack_table::{AttackCode, AttackDefinition, AttackTable, AttackTableError};
pub use collision::{release_attack_collision, CollisionPairs};
pub use combat::{
    apply_pending_placement, on_hit_received, on_montage_ended, perform_attack,
    process_attack_hit, warp_victim, AttackError, HitError, HitLanded, PlacementApplied,
};
pub use components::{ActiveAttack, Capability, Combatant, DetectionSettings, Pullable, ReceivesHits};
pub use debug_draw::{DebugColor, DebugDraw, DebugRenderer, LogRenderer};
pub use group_pull::{
    find_pull_candidates, finish_group_pull, prepare_group_pull, update_group_pull, GroupPull,
    GroupPullSession, PullError,
};
pub use locomotion::{Locomotion, LocomotionState, MovementMode};
pub use logging::init as init_logging;
pub use plugin::CombatPlugin;
pub use targeting::{find_combatants_in_cone, select_best_target};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use melee_core::prelude::*;
    //! ```

    pub use crate::perform_attack;
    pub use crate::AnimationRef;
    pub use crate::AttackDefinition;
    pub use crate::AttackTable;
    pub use crate::Combatant;
    pub use crate::CombatPlugin;
    pub use crate::GroupPull;
    pub use crate::Locomotion;
    pub use crate::ReceivesHits;
}

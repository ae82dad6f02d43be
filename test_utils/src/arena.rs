//! World builders for combat scenarios.
use std::sync::Arc;

use bevy::prelude::*;
use melee_core::attack_table::{AttackDefinition, AttackTable, PlacementConfig};
use melee_core::combat::reset_attack_on_montage_end;
use melee_core::{
    Animator, ClipPlayer, CollisionPairs, Combatant, DebugDraw, Locomotion, MovementMode, Pullable,
    ReceivesHits,
};

/// Attack table shared by the integration tests.
///
/// - `jab`: plain attack with a `flinch` reaction.
/// - `grab`: places the victim 80 units ahead, turned to face the attacker.
/// - `feint`: registered without an attacker animation.
#[must_use]
pub fn standard_attacks() -> Arc<AttackTable> {
    let grab_placement = PlacementConfig {
        translation: [80.0, 0.0, 0.0],
        yaw_degrees: 180.0,
        ..PlacementConfig::default()
    };
    AttackTable::new()
        .with(
            "jab",
            AttackDefinition::new("jab_montage").with_reaction("flinch"),
        )
        .with(
            "grab",
            AttackDefinition::new("grab_montage")
                .with_reaction("grabbed")
                .with_placement(grab_placement.to_transform()),
        )
        .with(
            "feint",
            AttackDefinition {
                attacker_animation: None,
                ..AttackDefinition::new("unused")
            },
        )
        .shared()
}

/// World with the combat resources and the montage-ended observer installed.
#[must_use]
pub fn combat_world() -> World {
    let mut world = World::new();
    world.init_resource::<CollisionPairs>();
    world.init_resource::<DebugDraw>();
    world.add_observer(reset_attack_on_montage_end);
    world
}

/// A spawned combatant and a handle on its animation player.
#[derive(Debug, Clone)]
pub struct Fighter {
    pub entity: Entity,
    /// Handle sharing the fighter's animation slot.
    pub player: ClipPlayer,
}

/// Spawns a grounded combatant at `at` facing +X.
pub fn spawn_fighter(world: &mut World, attacks: &Arc<AttackTable>, at: Vec3) -> Fighter {
    spawn_fighter_facing(world, attacks, at, 0.0)
}

/// Spawns a grounded combatant at `at` turned `yaw_degrees` about +Z.
pub fn spawn_fighter_facing(
    world: &mut World,
    attacks: &Arc<AttackTable>,
    at: Vec3,
    yaw_degrees: f32,
) -> Fighter {
    let player = ClipPlayer::new();
    let entity = world
        .spawn((
            Combatant::new(Arc::clone(attacks)),
            Transform::from_translation(at)
                .with_rotation(Quat::from_rotation_z(yaw_degrees.to_radians())),
            Animator::new(player.clone()),
            Locomotion::new(MovementMode::Walking),
            ReceivesHits,
        ))
        .id();
    Fighter { entity, player }
}

/// Spawns a non-combatant entity that group pulls may move.
pub fn spawn_pullable(world: &mut World, at: Vec3) -> Entity {
    world.spawn((Transform::from_translation(at), Pullable)).id()
}

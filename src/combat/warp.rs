//! Victim placement relative to the attacker.

use bevy::prelude::*;
use log::{debug, info};

use crate::components::Combatant;
use crate::targeting::pose;

/// Event raised once a target has been moved to its pending placement.
///
/// A group pull around the target may begin from here.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementApplied {
    /// Entity performing the attack.
    pub attacker: Entity,
    /// Entity that was teleported.
    pub target: Entity,
}

/// Stores on `victim` where it must stand for `attacker`'s choreography.
///
/// `relative` is expressed in the attacker's frame: the attacker is the
/// origin and faces +X. The resulting world translation and rotation are kept
/// as the victim's pending placement with a zero scale. Neither entity moves.
/// Does nothing for a missing victim, a self-warp, or a victim that is gone or
/// not a combatant.
pub fn warp_victim(world: &mut World, attacker: Entity, victim: Option<Entity>, relative: Transform) {
    let Some(victim) = victim.filter(|&v| v != attacker) else {
        debug!("warp by {attacker} skipped: no distinct victim");
        return;
    };
    let Some(attacker_pose) = pose(world, attacker) else {
        debug!("warp by {attacker} skipped: attacker has no transform");
        return;
    };
    let world_pose = attacker_pose.mul_transform(relative);
    let Some(mut combatant) = world.get_mut::<Combatant>(victim) else {
        debug!("warp by {attacker} skipped: {victim} is not a combatant");
        return;
    };
    combatant.set_pending_placement(Transform {
        translation: world_pose.translation,
        rotation: world_pose.rotation,
        scale: Vec3::ZERO,
    });
    debug!(
        "{victim} placement pending at {} for {attacker}",
        world_pose.translation
    );
}

/// Moves `attacker`'s active target onto its pending placement.
///
/// The target keeps its own scale. Triggers [`PlacementApplied`] and returns
/// `true` on success; returns `false` when there is no active target, the
/// target is gone, or no placement is pending.
pub fn apply_pending_placement(world: &mut World, attacker: Entity) -> bool {
    let Some(target) = world.get::<Combatant>(attacker).and_then(Combatant::target) else {
        return false;
    };
    let Some(placement) = world
        .get::<Combatant>(target)
        .and_then(|victim| victim.pending_placement().copied())
    else {
        return false;
    };
    {
        let Some(mut transform) = world.get_mut::<Transform>(target) else {
            return false;
        };
        transform.translation = placement.translation;
        transform.rotation = placement.rotation;
    }
    info!("{target} placed at {} for {attacker}", placement.translation);
    world.trigger(PlacementApplied { attacker, target });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack_table::{AttackCode, AttackDefinition, AttackTable};
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f32::consts::FRAC_PI_2;

    fn combatant() -> Combatant {
        Combatant::new(
            AttackTable::new()
                .with("grab", AttackDefinition::new("grab_montage"))
                .shared(),
        )
    }

    #[rstest]
    fn warp_composes_in_attacker_frame() {
        let mut world = World::new();
        let attacker_pose = Transform::from_xyz(10.0, 20.0, 0.0)
            .with_rotation(Quat::from_rotation_z(FRAC_PI_2));
        let attacker = world.spawn((combatant(), attacker_pose)).id();
        let victim = world
            .spawn((combatant(), Transform::from_xyz(500.0, 0.0, 0.0)))
            .id();

        warp_victim(
            &mut world,
            attacker,
            Some(victim),
            Transform::from_xyz(100.0, 0.0, 0.0),
        );

        let placement = world
            .get::<Combatant>(victim)
            .and_then(|c| c.pending_placement().copied())
            .expect("placement stored");
        assert_relative_eq!(placement.translation.x, 10.0, epsilon = 1e-3);
        assert_relative_eq!(placement.translation.y, 120.0, epsilon = 1e-3);
        assert_eq!(placement.scale, Vec3::ZERO);
        assert_eq!(world.get::<Transform>(attacker), Some(&attacker_pose));
        assert_eq!(
            world.get::<Transform>(victim).map(|t| t.translation),
            Some(Vec3::new(500.0, 0.0, 0.0))
        );
    }

    #[rstest]
    fn self_and_missing_victims_are_ignored() {
        let mut world = World::new();
        let attacker = world.spawn(combatant()).id();
        let relative = Transform::from_xyz(100.0, 0.0, 0.0);
        warp_victim(&mut world, attacker, None, relative);
        warp_victim(&mut world, attacker, Some(attacker), relative);
        assert!(world
            .get::<Combatant>(attacker)
            .and_then(Combatant::pending_placement)
            .is_none());
    }

    #[rstest]
    fn applying_moves_target_and_keeps_scale() {
        let mut world = World::new();
        let attacker = world.spawn(combatant()).id();
        let victim = world
            .spawn((combatant(), Transform::from_scale(Vec3::splat(2.0))))
            .id();
        assert!(!apply_pending_placement(&mut world, attacker));

        if let Some(mut c) = world.get_mut::<Combatant>(attacker) {
            c.begin_attack(AttackCode::from("grab"), victim);
        }
        assert!(!apply_pending_placement(&mut world, attacker));

        warp_victim(
            &mut world,
            attacker,
            Some(victim),
            Transform::from_xyz(60.0, 0.0, 0.0),
        );
        assert!(apply_pending_placement(&mut world, attacker));
        let transform = world.get::<Transform>(victim).expect("victim placed");
        assert_eq!(transform.translation, Vec3::new(60.0, 0.0, 0.0));
        assert_eq!(transform.scale, Vec3::splat(2.0));
    }
}

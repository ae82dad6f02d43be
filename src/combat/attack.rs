//! Starting an attack.

use bevy::prelude::*;
use log::{info, warn};

use super::{warp_victim, AttackError};
use crate::animation::{AnimationRef, Animator};
use crate::attack_table::AttackCode;
use crate::collision::CollisionPairs;
use crate::components::{Combatant, DetectionSettings};
use crate::locomotion::Locomotion;
use crate::targeting::{find_combatants_in_cone, select_best_target};

/// Everything an accepted attack request needs once the world is mutable.
struct AttackPlan {
    code: AttackCode,
    animation: AnimationRef,
    placement: Option<Transform>,
    detection: DetectionSettings,
}

fn plan_attack(world: &World, attacker: Entity, code: &str) -> Result<AttackPlan, AttackError> {
    let Ok(entity) = world.get_entity(attacker) else {
        return Err(AttackError::NotACombatant(attacker));
    };
    let (Some(combatant), Some(animator), Some(locomotion), true) = (
        entity.get::<Combatant>(),
        entity.get::<Animator>(),
        entity.get::<Locomotion>(),
        entity.contains::<Transform>(),
    ) else {
        return Err(AttackError::NotACombatant(attacker));
    };

    if animator.playback().is_any_playing() {
        return Err(AttackError::AnimationBusy);
    }
    if locomotion.state().is_falling() {
        return Err(AttackError::Airborne);
    }
    if !locomotion.state().is_moving_on_ground() {
        return Err(AttackError::NotGrounded);
    }

    let definition = combatant.attacks().get(code);
    let Some(animation) = definition.and_then(|d| d.attacker_animation.clone()) else {
        return Err(AttackError::UnknownAttack(AttackCode::from(code)));
    };
    Ok(AttackPlan {
        code: AttackCode::from(code),
        animation,
        placement: definition
            .filter(|d| d.has_placement())
            .map(|d| d.victim_placement),
        detection: combatant.detection,
    })
}

/// Starts attack `code` on `attacker` against the best target in its cone.
///
/// On success the attack and target are recorded, the pair stops colliding,
/// the attacker animation starts and the victim is warped when the attack
/// defines a placement. Returns the chosen target.
///
/// # Errors
/// Returns an [`AttackError`] without touching any state when a precondition
/// fails or no target is found.
pub fn perform_attack(
    world: &mut World,
    attacker: Entity,
    code: &str,
) -> Result<Entity, AttackError> {
    let plan = plan_attack(world, attacker, code).inspect_err(|err| {
        warn!("attack '{code}' by {attacker} rejected: {err}");
    })?;

    let DetectionSettings {
        range,
        angle_degrees,
        draw_debug,
        ..
    } = plan.detection;
    let candidates = find_combatants_in_cone(world, attacker, angle_degrees, range, draw_debug);
    let Some(target) = select_best_target(world, attacker, &candidates, draw_debug) else {
        warn!("attack '{code}' by {attacker} rejected: {}", AttackError::NoTarget);
        return Err(AttackError::NoTarget);
    };

    if let Some(mut combatant) = world.get_mut::<Combatant>(attacker) {
        combatant.begin_attack(plan.code, target);
    }
    if let Some(mut pairs) = world.get_resource_mut::<CollisionPairs>() {
        pairs.set_ignore_pair(attacker, target, true);
    } else {
        warn!("no CollisionPairs resource; {attacker} and {target} keep colliding");
    }
    if let Some(mut animator) = world.get_mut::<Animator>(attacker) {
        animator.playback_mut().play(&plan.animation);
    }
    if let Some(placement) = plan.placement {
        warp_victim(world, attacker, Some(target), placement);
    }
    info!("{attacker} started attack '{code}' against {target}");
    Ok(target)
}

//! Delivering a landed attack to its target.

use bevy::prelude::*;
use log::{debug, info, warn};

use super::HitError;
use crate::animation::{AnimationRef, Animator};
use crate::attack_table::AttackCode;
use crate::components::{Capability, Combatant};
use crate::HIT_REACTION_BLEND_OUT_SECONDS;

/// Event raised after a hit reached its target, whether or not the target
/// reacts to hits.
///
/// Damage and other numeric effects hang off this event.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct HitLanded {
    /// Entity performing the attack.
    pub attacker: Entity,
    /// Entity the attack was aimed at.
    pub target: Entity,
    /// Attack that landed.
    pub code: AttackCode,
}

struct ResolvedHit {
    target: Entity,
    code: AttackCode,
    reaction: Option<AnimationRef>,
    reacts: bool,
}

fn resolve_hit(world: &World, attacker: Entity) -> Result<ResolvedHit, HitError> {
    let Some(combatant) = world.get::<Combatant>(attacker) else {
        return Err(HitError::NotAttacking(attacker));
    };
    let Some(active) = combatant.active() else {
        return Err(HitError::NotAttacking(attacker));
    };
    let Some(definition) = combatant.attacks().get(active.code.as_str()) else {
        return Err(HitError::MissingDefinition(active.code.clone()));
    };
    let Ok(target) = world.get_entity(active.target) else {
        return Err(HitError::TargetGone(active.target));
    };
    Ok(ResolvedHit {
        target: active.target,
        code: active.code.clone(),
        reaction: definition.victim_reaction.clone(),
        reacts: Capability::ReceivesHits.is_met_by(&target),
    })
}

/// Notifies the target of `attacker`'s active attack that it was hit.
///
/// The target plays the attack's reaction animation (see [`on_hit_received`])
/// and a [`HitLanded`] event is triggered. Targets without [`ReceivesHits`]
/// skip the reaction but are still hit. Returns the target.
///
/// [`ReceivesHits`]: crate::components::ReceivesHits
///
/// # Errors
/// Returns a [`HitError`] when there is no active attack, the attack is no
/// longer registered, or the target is gone.
pub fn process_attack_hit(world: &mut World, attacker: Entity) -> Result<Entity, HitError> {
    let hit = resolve_hit(world, attacker).inspect_err(|err| {
        warn!("hit by {attacker} not delivered: {err}");
    })?;
    if !hit.reacts {
        debug!("{} does not react to hits; skipping reaction", hit.target);
    } else if hit.reaction.is_none() {
        warn!(
            "attack '{}' has no victim reaction; {} will not react",
            hit.code, hit.target
        );
    } else {
        on_hit_received(world, hit.target, attacker, hit.reaction.as_ref());
    }
    info!("{attacker} landed '{}' on {}", hit.code, hit.target);
    world.trigger(HitLanded {
        attacker,
        target: hit.target,
        code: hit.code,
    });
    Ok(hit.target)
}

/// Plays `reaction` on `victim` after being hit by `attacker`.
///
/// If the victim's own attack animation is playing, only that animation is
/// stopped. Otherwise any other playing animation is stopped, unless it is
/// already the reaction. Returns whether the reaction was started.
pub fn on_hit_received(
    world: &mut World,
    victim: Entity,
    attacker: Entity,
    reaction: Option<&AnimationRef>,
) -> bool {
    let Some(reaction) = reaction else {
        debug!("{victim} hit by {attacker} without a reaction animation");
        return false;
    };
    let own_attack = world
        .get::<Combatant>(victim)
        .and_then(Combatant::active_definition)
        .and_then(|definition| definition.attacker_animation.clone());
    let Some(mut animator) = world.get_mut::<Animator>(victim) else {
        debug!("{victim} hit by {attacker} has no animator");
        return false;
    };

    let playback = animator.playback_mut();
    match own_attack {
        Some(own) if playback.is_playing(&own) => {
            playback.stop(HIT_REACTION_BLEND_OUT_SECONDS, Some(own));
        }
        _ => {
            if playback.is_any_playing() && playback.current_active().as_ref() != Some(reaction) {
                playback.stop(HIT_REACTION_BLEND_OUT_SECONDS, None);
            }
        }
    }
    playback.play(reaction);
    debug!("{victim} reacting to {attacker} with {reaction}");
    true
}

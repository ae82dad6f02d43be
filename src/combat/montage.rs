//! Returning to idle when the attack animation ends.

use bevy::prelude::*;
use log::{debug, info};

use crate::animation::{AnimationRef, Animator, MontageEnded};
use crate::components::{ActiveAttack, Combatant};

/// Clears `combatant`'s attack if `animation` is the active attack's animation.
///
/// Any other animation ending is ignored. Interrupted and completed
/// animations are handled alike; `interrupted` is only logged. Returns the
/// attack that ended.
pub fn on_montage_ended(
    combatant: &mut Combatant,
    animation: &AnimationRef,
    interrupted: bool,
) -> Option<ActiveAttack> {
    let matches = combatant
        .active_definition()
        .and_then(|definition| definition.attacker_animation.as_ref())
        .is_some_and(|attack_animation| attack_animation == animation);
    if !matches {
        debug!("animation {animation} ended; not the active attack");
        return None;
    }
    let ended = combatant.end_attack()?;
    info!(
        "attack '{}' against {} ended ({})",
        ended.code,
        ended.target,
        if interrupted { "interrupted" } else { "completed" }
    );
    Some(ended)
}

/// Observer clearing a combatant's attack when its attack animation ends.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub fn reset_attack_on_montage_end(event: On<MontageEnded>, mut combatants: Query<&mut Combatant>) {
    let MontageEnded {
        entity,
        animation,
        interrupted,
    } = event.event();
    if let Ok(mut combatant) = combatants.get_mut(*entity) {
        on_montage_ended(&mut combatant, animation, *interrupted);
    }
}

/// Drains ended clips from every [`Animator`] and triggers [`MontageEnded`].
pub fn dispatch_ended_montages(mut animators: Query<(Entity, &mut Animator)>, mut commands: Commands) {
    for (entity, mut animator) in &mut animators {
        for end in animator.playback_mut().drain_ended() {
            commands.trigger(MontageEnded {
                entity,
                animation: end.animation,
                interrupted: end.interrupted,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack_table::{AttackCode, AttackDefinition, AttackTable};
    use rstest::{fixture, rstest};

    #[fixture]
    fn attacking() -> (World, Combatant) {
        let mut world = World::new();
        let target = world.spawn_empty().id();
        let table = AttackTable::new()
            .with("jab", AttackDefinition::new("jab_montage"))
            .shared();
        let mut combatant = Combatant::new(table);
        combatant.begin_attack(AttackCode::from("jab"), target);
        (world, combatant)
    }

    #[rstest]
    fn unrelated_animation_is_ignored(attacking: (World, Combatant)) {
        let (_world, mut combatant) = attacking;
        assert!(on_montage_ended(&mut combatant, &AnimationRef::from("flinch"), false).is_none());
        assert!(combatant.is_attacking());
    }

    #[rstest]
    #[case::completed(false)]
    #[case::interrupted(true)]
    fn attack_animation_ending_returns_to_idle(
        attacking: (World, Combatant),
        #[case] interrupted: bool,
    ) {
        let (_world, mut combatant) = attacking;
        let ended = on_montage_ended(&mut combatant, &AnimationRef::from("jab_montage"), interrupted);
        assert_eq!(ended.map(|attack| attack.code), Some(AttackCode::from("jab")));
        assert!(!combatant.is_attacking());
    }

    #[rstest]
    fn observer_resets_combatant(attacking: (World, Combatant)) {
        let (mut world, combatant) = attacking;
        world.add_observer(reset_attack_on_montage_end);
        let entity = world.spawn(combatant).id();
        world.trigger(MontageEnded {
            entity,
            animation: AnimationRef::from("jab_montage"),
            interrupted: true,
        });
        world.flush();
        assert!(!world
            .get::<Combatant>(entity)
            .is_some_and(Combatant::is_attacking));
    }
}

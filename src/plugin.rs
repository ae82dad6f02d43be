//! Bevy plugin wiring the combat core into an app.
//!
//! [`CombatPlugin`] installs the collision and debug-draw resources, forwards
//! ended animations as [`MontageEnded`](crate::animation::MontageEnded)
//! events every frame and returns combatants to idle when their attack
//! animation ends. Debug shapes nobody consumed are logged and discarded in
//! [`Last`].

use bevy::prelude::*;
use log::debug;

use crate::collision::CollisionPairs;
use crate::combat::{dispatch_ended_montages, reset_attack_on_montage_end};
use crate::debug_draw::{flush_debug_draw_system, DebugDraw};

/// Bevy plugin installing the combat systems and observers.
#[derive(Default)]
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollisionPairs>()
            .init_resource::<DebugDraw>()
            .add_observer(reset_attack_on_montage_end)
            .add_systems(Update, dispatch_ended_montages)
            .add_systems(Last, flush_debug_draw_system);
        debug!("combat plugin installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationPlayback, AnimationRef, Animator, ClipPlayer};
    use crate::attack_table::{AttackCode, AttackDefinition, AttackTable};
    use crate::components::Combatant;
    use crate::debug_draw::{DebugColor, DebugRenderer};
    use rstest::rstest;

    #[rstest]
    fn completed_attack_animation_returns_combatant_to_idle() {
        let mut app = App::new();
        app.add_plugins(CombatPlugin);
        let target = app.world_mut().spawn_empty().id();
        let table = AttackTable::new()
            .with("jab", AttackDefinition::new("jab_montage"))
            .shared();
        let mut combatant = Combatant::new(table);
        combatant.begin_attack(AttackCode::from("jab"), target);

        let mut player = ClipPlayer::new();
        let handle = player.clone();
        let jab = AnimationRef::from("jab_montage");
        player.play(&jab);
        let attacker = app
            .world_mut()
            .spawn((combatant, Animator::new(player)))
            .id();

        app.update();
        assert!(app
            .world()
            .get::<Combatant>(attacker)
            .is_some_and(Combatant::is_attacking));

        assert!(handle.complete(&jab));
        app.update();
        assert!(!app
            .world()
            .get::<Combatant>(attacker)
            .is_some_and(Combatant::is_attacking));
    }

    #[rstest]
    fn debug_shapes_are_flushed_each_frame() {
        let mut app = App::new();
        app.add_plugins(CombatPlugin);
        app.world_mut()
            .resource_mut::<DebugDraw>()
            .draw_line(Vec3::ZERO, Vec3::X, DebugColor::Red, 1.0);
        app.update();
        assert!(app.world().resource::<DebugDraw>().shapes().is_empty());
    }
}

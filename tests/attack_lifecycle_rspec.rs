//! Behavioural tests for a full attack: start, placement, hit and reset.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use melee_core::combat::dispatch_ended_montages;
use melee_core::{
    apply_pending_placement, perform_attack, process_attack_hit, release_attack_collision,
    AnimationRef, AttackError, CollisionPairs, Combatant, HitError,
};
use rspec_runner::run_serial;
use test_utils::{
    assert_vec3_near, combat_world, install_event_capture, spawn_fighter, spawn_fighter_facing,
    standard_attacks, CapturedHits, CapturedPlacements, Fighter,
};

#[derive(Clone, Debug)]
struct LifecycleEnv {
    world: Arc<Mutex<World>>,
    attacker: Fighter,
    victim: Fighter,
}

impl LifecycleEnv {
    fn new() -> Self {
        let mut world = combat_world();
        install_event_capture(&mut world);
        let attacks = standard_attacks();
        let attacker = spawn_fighter(&mut world, &attacks, Vec3::ZERO);
        let victim = spawn_fighter_facing(&mut world, &attacks, Vec3::new(100.0, 0.0, 0.0), 180.0);
        spawn_fighter(&mut world, &attacks, Vec3::new(100.0, 5.0, 0.0));
        Self {
            world: Arc::new(Mutex::new(world)),
            attacker,
            victim,
        }
    }

    fn world(&self) -> MutexGuard<'_, World> {
        self.world.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch_montages(&self) {
        self.world()
            .run_system_once(dispatch_ended_montages)
            .expect("dispatch system runs");
    }

    fn attacker_state(&self) -> Option<Entity> {
        self.world()
            .get::<Combatant>(self.attacker.entity)
            .and_then(Combatant::target)
    }
}

impl Default for LifecycleEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn grab_attack_lifecycle() {
    run_serial(&rspec::given(
        "an attacker facing two nearly equidistant combatants",
        LifecycleEnv::default(),
        |ctx| {
            ctx.then("the attack targets the better aligned combatant", |env| {
                let target = perform_attack(&mut env.world(), env.attacker.entity, "grab");
                assert_eq!(target, Ok(env.victim.entity));
                assert_eq!(env.attacker_state(), Some(env.victim.entity));
                assert_eq!(
                    env.attacker.player.started(),
                    vec![AnimationRef::from("grab_montage")]
                );
                assert!(env
                    .world()
                    .resource::<CollisionPairs>()
                    .is_ignored(env.attacker.entity, env.victim.entity));
            });

            ctx.then("the warp stores a placement without moving anyone", |env| {
                let world = env.world();
                let victim = world
                    .get::<Combatant>(env.victim.entity)
                    .expect("victim exists");
                let placement = victim.pending_placement().expect("placement pending");
                assert_vec3_near(placement.translation, Vec3::new(80.0, 0.0, 0.0), 1e-3);
                assert_eq!(placement.scale, Vec3::ZERO);
                let position = world
                    .get::<Transform>(env.victim.entity)
                    .map(|t| t.translation);
                assert_eq!(position, Some(Vec3::new(100.0, 0.0, 0.0)));
            });

            ctx.then("applying the placement teleports the victim", |env| {
                let mut world = env.world();
                assert!(apply_pending_placement(&mut world, env.attacker.entity));
                let transform = world
                    .get::<Transform>(env.victim.entity)
                    .copied()
                    .expect("victim exists");
                assert_vec3_near(transform.translation, Vec3::new(80.0, 0.0, 0.0), 1e-3);
                assert_vec3_near(transform.scale, Vec3::ONE, 1e-6);
                assert_eq!(world.resource::<CapturedPlacements>().0.len(), 1);
            });

            ctx.then("a second attack is refused while the first plays", |env| {
                let result = perform_attack(&mut env.world(), env.attacker.entity, "jab");
                assert_eq!(result, Err(AttackError::AnimationBusy));
                assert_eq!(env.attacker.player.started().len(), 1);
            });

            ctx.then("landing the hit plays the victim reaction", |env| {
                let hit = process_attack_hit(&mut env.world(), env.attacker.entity);
                assert_eq!(hit, Ok(env.victim.entity));
                assert_eq!(
                    env.victim.player.started(),
                    vec![AnimationRef::from("grabbed")]
                );
                let world = env.world();
                let hits = &world.resource::<CapturedHits>().0;
                assert_eq!(hits.len(), 1);
                assert!(hits.iter().all(|h| h.code.as_str() == "grab"));
            });

            ctx.then("the victim's animation ending leaves the attack running", |env| {
                assert!(env.victim.player.complete(&AnimationRef::from("grabbed")));
                env.dispatch_montages();
                assert_eq!(env.attacker_state(), Some(env.victim.entity));
            });

            ctx.then("the attack animation ending returns the attacker to idle", |env| {
                assert!(env
                    .attacker
                    .player
                    .complete(&AnimationRef::from("grab_montage")));
                env.dispatch_montages();
                assert_eq!(env.attacker_state(), None);
                let hit = process_attack_hit(&mut env.world(), env.attacker.entity);
                assert_eq!(hit, Err(HitError::NotAttacking(env.attacker.entity)));
            });

            ctx.then("collision stays ignored until explicitly released", |env| {
                let mut world = env.world();
                let (attacker, victim) = (env.attacker.entity, env.victim.entity);
                assert!(world.resource::<CollisionPairs>().is_ignored(attacker, victim));
                release_attack_collision(&mut world, attacker, victim);
                assert!(!world.resource::<CollisionPairs>().is_ignored(attacker, victim));
            });
        },
    ));
}

//! Helpers for observing combat events in tests.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use melee_core::{HitLanded, PlacementApplied};

/// Hits delivered while the capture observer was installed.
#[derive(Resource, Default, Debug)]
pub struct CapturedHits(pub Vec<HitLanded>);

/// Placements applied while the capture observer was installed.
#[derive(Resource, Default, Debug)]
pub struct CapturedPlacements(pub Vec<PlacementApplied>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_hit(event: On<HitLanded>, mut hits: ResMut<CapturedHits>) {
    hits.0.push(event.event().clone());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_placement(event: On<PlacementApplied>, mut placements: ResMut<CapturedPlacements>) {
    placements.0.push(*event.event());
}

/// Installs the capturing observers and their resources on `world`.
pub fn install_event_capture(world: &mut World) {
    world.init_resource::<CapturedHits>();
    world.init_resource::<CapturedPlacements>();
    world.add_observer(record_hit);
    world.add_observer(record_placement);
}

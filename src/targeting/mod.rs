//! Target acquisition: a forward-cone scan followed by a best-target choice.
//!
//! Both stages come in two forms. The pure functions ([`scan_cone`],
//! [`select_best`]) work on positions and are what the tests exercise in
//! depth. The world-facing wrappers resolve entities against the ECS
//! [`World`] and route debug shapes to the [`DebugDraw`](crate::debug_draw::DebugDraw)
//! resource when one is installed.

mod scan;
mod select;

use bevy::prelude::*;

use crate::components::Combatant;

pub use scan::{find_combatants_in_cone, scan_cone};
pub use select::{select_best, select_best_target};

/// World transform of `entity`, or `None` when it is gone or unplaced.
#[must_use]
pub fn pose(world: &World, entity: Entity) -> Option<Transform> {
    world.get::<Transform>(entity).copied()
}

/// Every combatant in the world with its position, in enumeration order.
pub fn combatant_positions(world: &mut World) -> Vec<(Entity, Vec3)> {
    let mut query = world.query_filtered::<(Entity, &Transform), With<Combatant>>();
    query
        .iter(world)
        .map(|(entity, transform)| (entity, transform.translation))
        .collect()
}

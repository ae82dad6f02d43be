//! Sphere overlap queries around the active target.

use bevy::prelude::*;
use log::debug;

use crate::components::{Capability, Combatant};
use crate::targeting::pose;

/// One entity found by [`overlap_sphere`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Pulled entity.
    pub entity: Entity,
    /// Point of the entity touching the sphere. Entities are treated as
    /// points, so this is the entity's position.
    pub contact_point: Vec3,
}

/// Every placed entity within `radius` of `center` (boundary included),
/// restricted to those with `filter` when given.
pub fn overlap_sphere(
    world: &mut World,
    center: Vec3,
    radius: f32,
    filter: Option<Capability>,
) -> Vec<Overlap> {
    let radius_sq = radius * radius;
    let mut query = world.query::<(Entity, &Transform)>();
    let inside: Vec<Overlap> = query
        .iter(world)
        .filter(|(_, transform)| transform.translation.distance_squared(center) <= radius_sq)
        .map(|(entity, transform)| Overlap {
            entity,
            contact_point: transform.translation,
        })
        .collect();
    let Some(capability) = filter else {
        return inside;
    };
    inside
        .into_iter()
        .filter(|overlap| {
            world
                .get_entity(overlap.entity)
                .is_ok_and(|entity| capability.is_met_by(&entity))
        })
        .collect()
}

/// Entities within `radius` of `owner`'s active target, excluding both.
///
/// Returns nothing when `owner` has no active target or the target is gone.
pub fn find_pull_candidates(
    world: &mut World,
    owner: Entity,
    radius: f32,
    required: Option<Capability>,
) -> Vec<Entity> {
    let Some(target) = world.get::<Combatant>(owner).and_then(Combatant::target) else {
        debug!("{owner} has no active target to pull around");
        return Vec::new();
    };
    let Some(center) = pose(world, target).map(|t| t.translation) else {
        debug!("{owner}'s target {target} is gone");
        return Vec::new();
    };
    let found: Vec<Entity> = overlap_sphere(world, center, radius, required)
        .into_iter()
        .map(|overlap| overlap.entity)
        .filter(|&entity| entity != owner && entity != target)
        .collect();
    debug!("{} pull candidates around {target}", found.len());
    found
}

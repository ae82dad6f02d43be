//! Pulling a group of nearby entities towards a point over time.
//!
//! [`find_pull_candidates`] gathers entities around a combatant's target.
//! [`prepare_group_pull`] freezes their layout around its centroid, repeated
//! [`update_group_pull`] calls slide that centroid towards the goal while
//! keeping the layout, and [`finish_group_pull`] ends the session. Pulled
//! entities are never owned: any that disappear are dropped on the next
//! update.

mod session;
mod sphere;

use bevy::prelude::*;
use log::{debug, info, warn};
use thiserror::Error;

use crate::targeting::pose;

pub use session::{GroupPullSession, PulledEntity};
pub use sphere::{find_pull_candidates, overlap_sphere, Overlap};

/// Reasons a group pull cannot start. The session is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PullError {
    /// A pull is already running.
    #[error("a group pull is already active")]
    AlreadyActive,
    /// The entity list was empty.
    #[error("no entities were given")]
    NoEntities,
    /// Every entity was gone or was the owner.
    #[error("none of the given entities can be pulled")]
    NoValidEntities,
    /// The owner lacks a [`GroupPull`] or a transform.
    #[error("{0} cannot own a group pull")]
    NotAPuller(Entity),
}

/// Component holding an entity's group-pull session.
#[derive(Component, Debug, Default, Clone, Deref, DerefMut)]
pub struct GroupPull(pub GroupPullSession);

/// Starts pulling `entities` towards `owner`'s position plus `target_offset`.
///
/// Entities that are gone or equal to `owner` are skipped, and repeated
/// entities join once. Returns how many entities joined the pull.
///
/// # Errors
/// Returns a [`PullError`] when the owner lacks a session or a transform, a
/// pull is already active, `entities` is empty, or none of them is valid.
pub fn prepare_group_pull(
    world: &mut World,
    owner: Entity,
    entities: &[Entity],
    target_offset: Vec3,
) -> Result<usize, PullError> {
    let result = try_prepare(world, owner, entities, target_offset);
    match &result {
        Ok(count) => info!("{owner} started pulling {count} entities"),
        Err(err) => warn!("group pull by {owner} not started: {err}"),
    }
    result
}

fn try_prepare(
    world: &mut World,
    owner: Entity,
    entities: &[Entity],
    target_offset: Vec3,
) -> Result<usize, PullError> {
    let (Some(active), Some(owner_pose)) = (
        world.get::<GroupPull>(owner).map(|pull| pull.is_active()),
        pose(world, owner),
    ) else {
        return Err(PullError::NotAPuller(owner));
    };
    if active {
        return Err(PullError::AlreadyActive);
    }
    if entities.is_empty() {
        return Err(PullError::NoEntities);
    }
    let members: Vec<(Entity, Vec3)> = entities
        .iter()
        .filter(|&&entity| entity != owner)
        .filter_map(|&entity| pose(world, entity).map(|t| (entity, t.translation)))
        .collect();
    let mut pull = world
        .get_mut::<GroupPull>(owner)
        .ok_or(PullError::NotAPuller(owner))?;
    pull.prepare(&members, owner_pose.translation + target_offset)
}

/// Advances `owner`'s pull to `alpha` and teleports every pulled entity.
///
/// Only translations change. Returns how many entities were moved; zero when
/// no pull is active.
pub fn update_group_pull(world: &mut World, owner: Entity, alpha: f32) -> usize {
    let mut session = match world.get_mut::<GroupPull>(owner) {
        Some(mut pull) if pull.is_active() => std::mem::take(&mut pull.0),
        _ => return 0,
    };
    let moved = session.update(alpha, |entity, position| {
        world.get_mut::<Transform>(entity).is_some_and(|mut transform| {
            transform.translation = position;
            true
        })
    });
    if let Some(mut pull) = world.get_mut::<GroupPull>(owner) {
        pull.0 = session;
    }
    debug!("{owner} pulled {moved} entities at alpha {alpha}");
    moved
}

/// Ends `owner`'s pull. Safe to call repeatedly.
pub fn finish_group_pull(world: &mut World, owner: Entity) {
    if let Some(mut pull) = world.get_mut::<GroupPull>(owner) {
        if pull.is_active() {
            info!("{owner} finished its group pull");
        }
        pull.finish();
    }
}

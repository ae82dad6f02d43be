//! Best-target choice: nearest first, facing angle breaks ties.

use bevy::prelude::*;
use log::{debug, warn};

use super::pose;
use crate::components::Combatant;
use crate::debug_draw::{DebugColor, DebugDraw, DebugRenderer};
use crate::vector_math::{forward_of, horizontal_direction};
use crate::{DEFAULT_TIE_TOLERANCE, SELECTION_DEBUG_SECONDS, SELECTION_DEBUG_SPHERE_RADIUS};

/// Chooses the best candidate as seen from `origin` facing `forward`.
///
/// Candidates with no position are invalid and ignored. Among valid ones, the
/// nearest wins; every candidate whose squared distance is within
/// `tolerance_sq` of the nearest counts as tied, and the tied candidate most
/// aligned with the horizontal `forward` wins. Earlier candidates win exact
/// ties. When the alignment cannot be measured, the first tied candidate is
/// returned.
///
/// Returns `None` only when no candidate is valid.
///
/// # Examples
/// ```
/// use bevy::prelude::*;
/// use melee_core::targeting::select_best;
/// let mut world = World::new();
/// let straight = world.spawn_empty().id();
/// let skewed = world.spawn_empty().id();
/// let candidates = [
///     (skewed, Some(Vec3::new(100.0, 5.0, 0.0))),
///     (straight, Some(Vec3::new(100.0, 0.0, 0.0))),
/// ];
/// assert_eq!(select_best(Vec3::ZERO, Vec3::X, &candidates, 2500.0), Some(straight));
/// ```
#[must_use]
pub fn select_best(
    origin: Vec3,
    forward: Vec3,
    candidates: &[(Entity, Option<Vec3>)],
    tolerance_sq: f32,
) -> Option<Entity> {
    let valid: Vec<(Entity, Vec3, f32)> = candidates
        .iter()
        .filter_map(|&(entity, position)| {
            position.map(|p| (entity, p, origin.distance_squared(p)))
        })
        .collect();
    let nearest = valid.iter().map(|&(_, _, d)| d).reduce(f32::min)?;
    let ties: Vec<(Entity, Vec3)> = valid
        .iter()
        .filter(|&&(_, _, d)| (d - nearest).abs() <= tolerance_sq)
        .map(|&(entity, position, _)| (entity, position))
        .collect();
    let &(first, _) = ties.first()?;
    if ties.len() == 1 {
        return Some(first);
    }

    let Some(facing) = horizontal_direction(forward) else {
        debug!("tie between {} candidates; no horizontal forward, taking first", ties.len());
        return Some(first);
    };
    let mut best: Option<(Entity, f32)> = None;
    for &(entity, position) in &ties {
        let Some(direction) = horizontal_direction(position - origin) else {
            continue;
        };
        let alignment = facing.dot(direction);
        if best.is_none_or(|(_, top)| alignment > top) {
            best = Some((entity, alignment));
        }
    }
    debug!(
        "tie between {} candidates broken by facing: {best:?}",
        ties.len()
    );
    Some(best.map_or(first, |(entity, _)| entity))
}

/// Chooses the best of `candidates` for `selector`.
///
/// Despawned candidates and candidates without a transform are ignored. The
/// selector's own tie tolerance applies when it is a combatant. With
/// `draw_debug` set, the choice is marked in the [`DebugDraw`] resource.
pub fn select_best_target(
    world: &mut World,
    selector: Entity,
    candidates: &[Entity],
    draw_debug: bool,
) -> Option<Entity> {
    let Some(transform) = pose(world, selector) else {
        warn!("target selection skipped: selector {selector} has no transform");
        return None;
    };
    let tolerance = world
        .get::<Combatant>(selector)
        .map_or(DEFAULT_TIE_TOLERANCE, |combatant| {
            combatant.detection.tie_tolerance
        });
    let resolved: Vec<(Entity, Option<Vec3>)> = candidates
        .iter()
        .map(|&entity| (entity, pose(world, entity).map(|t| t.translation)))
        .collect();

    let origin = transform.translation;
    let chosen = select_best(
        origin,
        forward_of(transform.rotation),
        &resolved,
        tolerance * tolerance,
    )?;

    if draw_debug {
        if let (Some(mut draw), Some(target)) = (
            world.get_resource_mut::<DebugDraw>(),
            resolved
                .iter()
                .find_map(|&(entity, position)| (entity == chosen).then_some(position).flatten()),
        ) {
            draw.draw_line(origin, target, DebugColor::Magenta, SELECTION_DEBUG_SECONDS);
            draw.draw_sphere(
                target,
                SELECTION_DEBUG_SPHERE_RADIUS,
                DebugColor::Magenta,
                SELECTION_DEBUG_SECONDS,
            );
        }
    }
    debug!("{selector} selected target {chosen}");
    Some(chosen)
}

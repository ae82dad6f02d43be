//! Forward-cone scan over combatants.

use bevy::prelude::*;
use log::{info, warn};

use super::{combatant_positions, pose};
use crate::debug_draw::{DebugColor, DebugDraw, DebugRenderer};
use crate::vector_math::{cone_cosine, forward_of, horizontal_direction, lift, rotate_about_up};
use crate::{SCAN_DEBUG_SECONDS, SCAN_DEBUG_SPHERE_RADIUS};

/// Filters `candidates` down to those inside the horizontal cone in front of
/// `origin`.
///
/// A candidate is kept when it is no further than `max_range` and the
/// horizontal direction to it lies strictly within `half_angle_degrees` of the
/// horizontal projection of `forward`. Candidates directly above or below the
/// origin have no horizontal direction and are rejected. A vertical `forward`
/// yields no targets. Input order is preserved.
///
/// When `renderer` is supplied the cone and every verdict are drawn; drawing
/// never changes the result.
///
/// # Examples
/// ```
/// use bevy::prelude::*;
/// use melee_core::targeting::scan_cone;
/// let mut world = World::new();
/// let ahead = world.spawn_empty().id();
/// let behind = world.spawn_empty().id();
/// let candidates = [(ahead, Vec3::new(100.0, 10.0, 0.0)), (behind, Vec3::new(-100.0, 0.0, 0.0))];
/// let found = scan_cone(Vec3::ZERO, Vec3::X, &candidates, 45.0, 5000.0, None);
/// assert_eq!(found, vec![ahead]);
/// ```
pub fn scan_cone(
    origin: Vec3,
    forward: Vec3,
    candidates: &[(Entity, Vec3)],
    half_angle_degrees: f32,
    max_range: f32,
    mut renderer: Option<&mut dyn DebugRenderer>,
) -> Vec<Entity> {
    let Some(facing) = horizontal_direction(forward) else {
        warn!("cone scan skipped: forward {forward} has no horizontal component");
        return Vec::new();
    };
    let threshold = cone_cosine(half_angle_degrees);
    let range_sq = max_range * max_range;

    if let Some(draw) = renderer.as_mut() {
        draw_cone(&mut **draw, origin, facing, half_angle_degrees, max_range);
    }

    let mut found = Vec::new();
    for &(entity, position) in candidates {
        let offset = position - origin;
        let verdict = if offset.length_squared() > range_sq {
            DebugColor::Blue
        } else if let Some(direction) = horizontal_direction(offset) {
            if facing.dot(direction) > threshold {
                found.push(entity);
                DebugColor::Green
            } else {
                DebugColor::Red
            }
        } else {
            DebugColor::White
        };

        if let Some(draw) = renderer.as_mut() {
            draw.draw_line(origin, position, verdict, SCAN_DEBUG_SECONDS);
            if verdict == DebugColor::Green {
                draw.draw_sphere(
                    position,
                    SCAN_DEBUG_SPHERE_RADIUS,
                    DebugColor::Green,
                    SCAN_DEBUG_SECONDS,
                );
            }
        }
    }
    found
}

fn draw_cone(
    draw: &mut dyn DebugRenderer,
    origin: Vec3,
    facing: Vec2,
    half_angle_degrees: f32,
    max_range: f32,
) {
    for degrees in [half_angle_degrees, -half_angle_degrees] {
        let edge = lift(rotate_about_up(facing, degrees)) * max_range;
        draw.draw_line(origin, origin + edge, DebugColor::Yellow, SCAN_DEBUG_SECONDS);
    }
    draw.draw_line(
        origin,
        origin + lift(facing) * max_range,
        DebugColor::Orange,
        SCAN_DEBUG_SECONDS,
    );
}

/// Returns every other combatant inside `scanner`'s detection cone.
///
/// Debug shapes go to the [`DebugDraw`] resource when `draw_debug` is set and
/// the resource exists. A scanner without a transform finds nothing.
pub fn find_combatants_in_cone(
    world: &mut World,
    scanner: Entity,
    half_angle_degrees: f32,
    max_range: f32,
    draw_debug: bool,
) -> Vec<Entity> {
    let Some(transform) = pose(world, scanner) else {
        warn!("cone scan skipped: scanner {scanner} has no transform");
        return Vec::new();
    };
    let candidates: Vec<(Entity, Vec3)> = combatant_positions(world)
        .into_iter()
        .filter(|(entity, _)| *entity != scanner)
        .collect();

    let origin = transform.translation;
    let forward = forward_of(transform.rotation);
    let found = match world.get_resource_mut::<DebugDraw>() {
        Some(mut draw) if draw_debug => scan_cone(
            origin,
            forward,
            &candidates,
            half_angle_degrees,
            max_range,
            Some(&mut *draw),
        ),
        _ => scan_cone(
            origin,
            forward,
            &candidates,
            half_angle_degrees,
            max_range,
            None,
        ),
    };
    info!(
        "{scanner} found {} of {} combatants in its detection cone",
        found.len(),
        candidates.len()
    );
    found
}

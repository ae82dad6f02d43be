//! Debug visualisation requests.
//!
//! Targeting code describes what it examined as lines and spheres. Drawing is
//! purely observational: nothing here feeds back into combat decisions.

use bevy::prelude::*;
use log::trace;

/// Colours used by the targeting overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugColor {
    /// Cone edges.
    Yellow,
    /// Forward ray.
    Orange,
    /// Candidate beyond range.
    Blue,
    /// Candidate directly above or below.
    White,
    /// Candidate accepted.
    Green,
    /// Candidate outside the cone.
    Red,
    /// Final selection.
    Magenta,
}

/// A single requested shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    /// A line segment.
    Line {
        /// First end point.
        start: Vec3,
        /// Second end point.
        end: Vec3,
        /// Colour of the shape.
        color: DebugColor,
        /// How long the shape stays visible.
        seconds: f32,
    },
    /// A wireframe sphere.
    Sphere {
        /// Centre of the sphere.
        center: Vec3,
        /// Sphere radius.
        radius: f32,
        /// Colour of the shape.
        color: DebugColor,
        /// How long the shape stays visible.
        seconds: f32,
    },
}

/// Rendering collaborator accepting debug shapes.
pub trait DebugRenderer {
    /// Draws a line from `start` to `end`.
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: DebugColor, seconds: f32);
    /// Draws a sphere around `center`.
    fn draw_sphere(&mut self, center: Vec3, radius: f32, color: DebugColor, seconds: f32);
}

/// Resource buffering shapes requested during a frame.
///
/// An external renderer drains it; without one, the plugin logs and discards
/// the buffer at the end of every frame.
#[derive(Resource, Debug, Default)]
pub struct DebugDraw {
    shapes: Vec<DebugShape>,
}

impl DebugDraw {
    /// Shapes buffered so far, oldest first.
    #[must_use]
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    /// Removes and yields every buffered shape.
    pub fn drain(&mut self) -> std::vec::Drain<'_, DebugShape> {
        self.shapes.drain(..)
    }

    /// Number of buffered shapes drawn in `color`.
    #[must_use]
    pub fn count(&self, color: DebugColor) -> usize {
        self.shapes
            .iter()
            .filter(|shape| match shape {
                DebugShape::Line { color: c, .. } | DebugShape::Sphere { color: c, .. } => {
                    *c == color
                }
            })
            .count()
    }
}

impl DebugRenderer for DebugDraw {
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: DebugColor, seconds: f32) {
        self.shapes.push(DebugShape::Line {
            start,
            end,
            color,
            seconds,
        });
    }

    fn draw_sphere(&mut self, center: Vec3, radius: f32, color: DebugColor, seconds: f32) {
        self.shapes.push(DebugShape::Sphere {
            center,
            radius,
            color,
            seconds,
        });
    }
}

/// Renderer that writes every shape to the log at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderer;

impl DebugRenderer for LogRenderer {
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: DebugColor, seconds: f32) {
        trace!("debug line {color:?} {start} -> {end} for {seconds}s");
    }

    fn draw_sphere(&mut self, center: Vec3, radius: f32, color: DebugColor, seconds: f32) {
        trace!("debug sphere {color:?} at {center} r={radius} for {seconds}s");
    }
}

/// Logs and clears the shapes buffered this frame.
pub fn flush_debug_draw_system(mut draw: ResMut<DebugDraw>) {
    let mut renderer = LogRenderer;
    for shape in draw.drain() {
        match shape {
            DebugShape::Line {
                start,
                end,
                color,
                seconds,
            } => renderer.draw_line(start, end, color, seconds),
            DebugShape::Sphere {
                center,
                radius,
                color,
                seconds,
            } => renderer.draw_sphere(center, radius, color, seconds),
        }
    }
}

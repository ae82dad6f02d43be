//! Combat tuning constants shared across targeting and attack systems.
//!
//! World space is Z-up and an entity faces along its local +X axis.

/// Default maximum distance at which a combatant detects targets.
pub const DEFAULT_DETECTION_RANGE: f32 = 5000.0;
/// Default half-angle of the horizontal detection cone, in degrees.
pub const DEFAULT_DETECTION_ANGLE_DEGREES: f32 = 45.0;
/// Linear distance within which two candidates count as equally close.
///
/// Selection compares squared distances, so the window applied is the square
/// of this value.
pub const DEFAULT_TIE_TOLERANCE: f32 = 50.0;
/// Blend-out used when a hit reaction interrupts a running animation.
pub const HIT_REACTION_BLEND_OUT_SECONDS: f32 = 0.15;

/// How long cone-scan debug shapes stay visible.
pub const SCAN_DEBUG_SECONDS: f32 = 10.0;
/// Radius of the sphere marking each accepted scan candidate.
pub const SCAN_DEBUG_SPHERE_RADIUS: f32 = 50.0;
/// How long the selected-target debug shapes stay visible.
pub const SELECTION_DEBUG_SECONDS: f32 = 2.0;
/// Radius of the sphere marking the selected target.
pub const SELECTION_DEBUG_SPHERE_RADIUS: f32 = 75.0;
/// Tolerance used when deciding whether a placement is the identity.
pub const PLACEMENT_IDENTITY_TOLERANCE: f32 = 1e-4;
/// Number of started clips a [`ClipPlayer`](crate::ClipPlayer) remembers.
pub const CLIP_HISTORY_LEN: usize = 16;

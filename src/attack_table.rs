//! Static attack definitions keyed by attack code.
//!
//! A table is built once, usually from JSON, and then shared read-only
//! between every combatant of a type through an [`Arc`].

use std::borrow::Borrow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy::math::EulerRot;
use bevy::prelude::*;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationRef;
use crate::PLACEMENT_IDENTITY_TOLERANCE;

/// Identifier selecting an attack definition (the combo name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttackCode(pub String);

impl AttackCode {
    /// Builds a code from any string-like name.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttackCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl Borrow<str> for AttackCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttackCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Victim placement as authored in configuration files.
///
/// Angles are in degrees; yaw turns about the up (Z) axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Offset from the attacker, in the attacker's local frame.
    pub translation: [f32; 3],
    /// Turn about the up axis.
    pub yaw_degrees: f32,
    /// Turn about the local Y axis.
    pub pitch_degrees: f32,
    /// Turn about the forward axis.
    pub roll_degrees: f32,
    /// Authored scale. Only an identity check reads it.
    pub scale: [f32; 3],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            roll_degrees: 0.0,
            scale: [1.0; 3],
        }
    }
}

impl PlacementConfig {
    /// Converts the authored values into a relative transform.
    #[must_use]
    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: Vec3::from_array(self.translation),
            rotation: Quat::from_euler(
                EulerRot::ZYX,
                self.yaw_degrees.to_radians(),
                self.pitch_degrees.to_radians(),
                self.roll_degrees.to_radians(),
            ),
            scale: Vec3::from_array(self.scale),
        }
    }
}

/// One registered attack.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackDefinition {
    /// Clip the attacker plays. Attacks without one cannot be performed.
    pub attacker_animation: Option<AnimationRef>,
    /// Clip the victim plays when the hit lands.
    pub victim_reaction: Option<AnimationRef>,
    /// Victim transform relative to the attacker at the moment of impact.
    /// The attacker is the origin, facing +X. Identity means no warp.
    pub victim_placement: Transform,
}

impl AttackDefinition {
    /// An attack playing `attacker_animation`, with no reaction or placement.
    #[must_use]
    pub fn new(attacker_animation: impl Into<AnimationRef>) -> Self {
        Self {
            attacker_animation: Some(attacker_animation.into()),
            victim_reaction: None,
            victim_placement: Transform::IDENTITY,
        }
    }

    /// Sets the clip the victim plays when hit.
    #[must_use]
    pub fn with_reaction(mut self, reaction: impl Into<AnimationRef>) -> Self {
        self.victim_reaction = Some(reaction.into());
        self
    }

    /// Sets where the victim is placed relative to the attacker.
    #[must_use]
    pub const fn with_placement(mut self, placement: Transform) -> Self {
        self.victim_placement = placement;
        self
    }

    /// Whether the victim must be warped when this attack starts.
    #[must_use]
    pub fn has_placement(&self) -> bool {
        !is_identity(&self.victim_placement)
    }
}

fn is_identity(transform: &Transform) -> bool {
    transform
        .translation
        .abs_diff_eq(Vec3::ZERO, PLACEMENT_IDENTITY_TOLERANCE)
        && transform.rotation.is_near_identity()
        && transform
            .scale
            .abs_diff_eq(Vec3::ONE, PLACEMENT_IDENTITY_TOLERANCE)
}

/// Errors raised while loading an attack table.
#[derive(Debug, Error)]
pub enum AttackTableError {
    /// The file could not be read.
    #[error("failed to read attack table {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid attack table.
    #[error("malformed attack table: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two entries share a code.
    #[error("attack code '{0}' is defined more than once")]
    DuplicateCode(AttackCode),
}

#[derive(Debug, Deserialize)]
struct AttackEntry {
    code: AttackCode,
    #[serde(default)]
    attacker_animation: Option<AnimationRef>,
    #[serde(default)]
    victim_reaction: Option<AnimationRef>,
    #[serde(default)]
    victim_placement: PlacementConfig,
}

#[derive(Debug, Deserialize)]
struct AttackTableFile {
    attacks: Vec<AttackEntry>,
}

/// Read-only registry of attack definitions.
#[derive(Debug, Clone, Default)]
pub struct AttackTable {
    definitions: HashMap<AttackCode, AttackDefinition>,
}

impl AttackTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition while building a table.
    #[must_use]
    pub fn with(mut self, code: impl Into<AttackCode>, definition: AttackDefinition) -> Self {
        self.definitions.insert(code.into(), definition);
        self
    }

    /// Parses a table from its JSON representation.
    ///
    /// # Errors
    /// Returns [`AttackTableError::Parse`] for malformed JSON and
    /// [`AttackTableError::DuplicateCode`] when a code appears twice.
    ///
    /// # Examples
    /// ```
    /// use melee_core::attack_table::AttackTable;
    /// let table = AttackTable::from_json_str(
    ///     r#"{"attacks": [{"code": "jab", "attacker_animation": "jab_montage"}]}"#,
    /// )
    /// .unwrap();
    /// assert!(table.get("jab").is_some());
    /// assert!(table.get("hook").is_none());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, AttackTableError> {
        let file: AttackTableFile = serde_json::from_str(json)?;
        let mut definitions = HashMap::with_capacity(file.attacks.len());
        for entry in file.attacks {
            let definition = AttackDefinition {
                attacker_animation: entry.attacker_animation,
                victim_reaction: entry.victim_reaction,
                victim_placement: entry.victim_placement.to_transform(),
            };
            if definitions.contains_key(&entry.code) {
                return Err(AttackTableError::DuplicateCode(entry.code));
            }
            definitions.insert(entry.code, definition);
        }
        log::info!("loaded {} attack definitions", definitions.len());
        Ok(Self { definitions })
    }

    /// Reads and parses a JSON table from disk.
    ///
    /// # Errors
    /// Returns [`AttackTableError::Io`] when the file cannot be read, plus any
    /// error reported by [`AttackTable::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttackTableError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| AttackTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Looks up the definition registered under `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&AttackDefinition> {
        self.definitions.get(code)
    }

    /// Attacker clip for `code`, if the attack is registered with one.
    #[must_use]
    pub fn attacker_animation(&self, code: &str) -> Option<&AnimationRef> {
        self.get(code)?.attacker_animation.as_ref()
    }

    /// Number of registered attacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no attacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registered codes, in no particular order.
    #[must_use]
    pub fn codes(&self) -> impl Iterator<Item = &AttackCode> {
        self.definitions.keys()
    }

    /// Freezes the table for sharing between combatants.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

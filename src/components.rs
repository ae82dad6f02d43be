//! ECS component types used by the combat core.
//! Includes the combatant state, detection tuning and capability markers.
use std::sync::Arc;

use bevy::ecs::world::EntityRef;
use bevy::prelude::*;

use crate::attack_table::{AttackCode, AttackDefinition, AttackTable};
use crate::group_pull::GroupPull;
use crate::{DEFAULT_DETECTION_ANGLE_DEGREES, DEFAULT_DETECTION_RANGE, DEFAULT_TIE_TOLERANCE};

/// Per-combatant tuning for target detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionSettings {
    /// Maximum distance to a candidate target.
    pub range: f32,
    /// Half-angle of the horizontal detection cone.
    pub angle_degrees: f32,
    /// Linear distance within which candidates count as equally near.
    pub tie_tolerance: f32,
    /// Request debug shapes for scans and selections.
    pub draw_debug: bool,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            range: DEFAULT_DETECTION_RANGE,
            angle_degrees: DEFAULT_DETECTION_ANGLE_DEGREES,
            tie_tolerance: DEFAULT_TIE_TOLERANCE,
            draw_debug: false,
        }
    }
}

impl DetectionSettings {
    /// Tie tolerance in squared distance units.
    #[must_use]
    pub const fn tie_tolerance_sq(&self) -> f32 {
        self.tie_tolerance * self.tie_tolerance
    }
}

/// The attack a combatant is currently performing and who it is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAttack {
    /// Attack being performed.
    pub code: AttackCode,
    /// Entity the attack was aimed at.
    pub target: Entity,
}

/// An entity taking part in melee targeting and attacks.
///
/// `active` is `None` while idle. Attack identity and target live in one value
/// so they are always set and cleared together.
#[derive(Component, Debug, Clone)]
#[require(Transform, GroupPull)]
pub struct Combatant {
    attacks: Arc<AttackTable>,
    /// Detection tuning used by attacks.
    pub detection: DetectionSettings,
    active: Option<ActiveAttack>,
    pending_placement: Option<Transform>,
}

impl Combatant {
    /// An idle combatant using `attacks` and default detection.
    #[must_use]
    pub fn new(attacks: Arc<AttackTable>) -> Self {
        Self {
            attacks,
            detection: DetectionSettings::default(),
            active: None,
            pending_placement: None,
        }
    }

    /// Replaces the detection tuning.
    #[must_use]
    pub const fn with_detection(mut self, detection: DetectionSettings) -> Self {
        self.detection = detection;
        self
    }

    /// The attack table this combatant draws from.
    #[must_use]
    pub fn attacks(&self) -> &AttackTable {
        &self.attacks
    }

    /// The active attack, or `None` while idle.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveAttack> {
        self.active.as_ref()
    }

    /// Whether an attack is active.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.active.is_some()
    }

    /// Target of the active attack.
    #[must_use]
    pub fn target(&self) -> Option<Entity> {
        self.active.as_ref().map(|attack| attack.target)
    }

    /// Definition of the active attack, if one is active and still registered.
    #[must_use]
    pub fn active_definition(&self) -> Option<&AttackDefinition> {
        self.active
            .as_ref()
            .and_then(|attack| self.attacks.get(attack.code.as_str()))
    }

    /// Placement computed for this entity by the most recent warp.
    #[must_use]
    pub const fn pending_placement(&self) -> Option<&Transform> {
        self.pending_placement.as_ref()
    }

    pub(crate) fn begin_attack(&mut self, code: AttackCode, target: Entity) {
        self.active = Some(ActiveAttack { code, target });
    }

    pub(crate) fn end_attack(&mut self) -> Option<ActiveAttack> {
        self.active.take()
    }

    pub(crate) fn set_pending_placement(&mut self, placement: Transform) {
        self.pending_placement = Some(placement);
    }
}

/// Marker for entities that react when an attack lands on them.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ReceivesHits;

/// Marker for entities a group pull may move.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Pullable;

/// Optional behaviour an entity opts into by carrying a marker component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Carries [`ReceivesHits`].
    ReceivesHits,
    /// Carries [`Pullable`].
    Pullable,
}

impl Capability {
    /// Whether `entity` carries the marker for this capability.
    #[must_use]
    pub fn is_met_by(self, entity: &EntityRef<'_>) -> bool {
        match self {
            Self::ReceivesHits => entity.contains::<ReceivesHits>(),
            Self::Pullable => entity.contains::<Pullable>(),
        }
    }
}

//! Group-pull bookkeeping independent of the ECS world.

use bevy::prelude::*;
use hashbrown::HashSet;

use super::PullError;
use crate::vector_math::centroid;

/// A pulled entity and its fixed offset from the group centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulledEntity {
    /// Pulled entity.
    pub entity: Entity,
    /// Position relative to the group centroid at prepare time.
    pub offset: Vec3,
}

/// State of one group pull.
///
/// Offsets are captured once in [`prepare`](Self::prepare) and never
/// recomputed, so the group keeps its shape whatever `alpha` sequence the
/// caller drives [`update`](Self::update) with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupPullSession {
    active: bool,
    records: Vec<PulledEntity>,
    initial_centroid: Vec3,
    target_centroid: Vec3,
}

impl GroupPullSession {
    /// Starts a pull of `members` (entity and current position) towards
    /// `target_centroid`. Returns the number of pulled entities.
    ///
    /// An entity listed more than once is pulled once, at its first position.
    ///
    /// # Errors
    /// [`PullError::AlreadyActive`] while a pull is running and
    /// [`PullError::NoValidEntities`] when `members` is empty.
    pub fn prepare(
        &mut self,
        members: &[(Entity, Vec3)],
        target_centroid: Vec3,
    ) -> Result<usize, PullError> {
        if self.active {
            return Err(PullError::AlreadyActive);
        }
        let mut seen = HashSet::with_capacity(members.len());
        let unique: Vec<(Entity, Vec3)> = members
            .iter()
            .copied()
            .filter(|&(entity, _)| seen.insert(entity))
            .collect();
        let positions: Vec<Vec3> = unique.iter().map(|&(_, position)| position).collect();
        let initial_centroid = centroid(&positions).ok_or(PullError::NoValidEntities)?;
        self.records = unique
            .into_iter()
            .map(|(entity, position)| PulledEntity {
                entity,
                offset: position - initial_centroid,
            })
            .collect();
        self.initial_centroid = initial_centroid;
        self.target_centroid = target_centroid;
        self.active = true;
        Ok(self.records.len())
    }

    /// Moves the group to `alpha` (clamped to `0..=1`) of the way from the
    /// initial to the target centroid.
    ///
    /// `place` receives each entity and its new position and reports whether
    /// the entity still exists; entities reported missing are forgotten.
    /// Returns how many entities were placed.
    pub fn update(&mut self, alpha: f32, mut place: impl FnMut(Entity, Vec3) -> bool) -> usize {
        if !self.active || self.records.is_empty() {
            return 0;
        }
        let centroid = self.centroid_at(alpha);
        let mut placed = 0;
        self.records.retain(|record| {
            let alive = place(record.entity, centroid + record.offset);
            placed += usize::from(alive);
            alive
        });
        placed
    }

    /// Ends the pull. Calling it again has no further effect.
    pub fn finish(&mut self) {
        self.active = false;
        self.records.clear();
        self.initial_centroid = Vec3::ZERO;
        self.target_centroid = Vec3::ZERO;
    }

    /// Group centroid for `alpha`, clamped to `0..=1`. NaN counts as zero.
    #[must_use]
    pub fn centroid_at(&self, alpha: f32) -> Vec3 {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        self.initial_centroid.lerp(self.target_centroid, alpha)
    }

    /// Whether a pull is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Entities still being pulled.
    #[must_use]
    pub fn records(&self) -> &[PulledEntity] {
        &self.records
    }

    /// Centroid of the group when the pull started.
    #[must_use]
    pub const fn initial_centroid(&self) -> Vec3 {
        self.initial_centroid
    }

    /// Centroid the group reaches at `alpha == 1`.
    #[must_use]
    pub const fn target_centroid(&self) -> Vec3 {
        self.target_centroid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn entities() -> (World, [Entity; 3]) {
        let mut world = World::new();
        let ids = [(); 3].map(|()| world.spawn_empty().id());
        (world, ids)
    }

    fn prepared(ids: [Entity; 3]) -> GroupPullSession {
        let [a, b, c] = ids;
        let mut session = GroupPullSession::default();
        let members = [
            (a, Vec3::ZERO),
            (b, Vec3::new(30.0, 0.0, 0.0)),
            (c, Vec3::new(0.0, 30.0, 0.0)),
        ];
        session
            .prepare(&members, Vec3::new(100.0, 100.0, 0.0))
            .expect("prepare succeeds");
        session
    }

    #[rstest]
    fn prepare_twice_is_rejected(entities: (World, [Entity; 3])) {
        let (_world, ids) = entities;
        let mut session = prepared(ids);
        let before = session.clone();
        assert_eq!(
            session.prepare(&[(ids[0], Vec3::ZERO)], Vec3::ZERO),
            Err(PullError::AlreadyActive)
        );
        assert_eq!(session, before);
    }

    #[rstest]
    fn empty_members_are_rejected() {
        let mut session = GroupPullSession::default();
        assert_eq!(
            session.prepare(&[], Vec3::ZERO),
            Err(PullError::NoValidEntities)
        );
        assert!(!session.is_active());
    }

    #[rstest]
    fn repeated_members_are_recorded_once(entities: (World, [Entity; 3])) {
        let (_world, [a, b, _]) = entities;
        let mut session = GroupPullSession::default();
        let members = [
            (a, Vec3::ZERO),
            (a, Vec3::new(90.0, 0.0, 0.0)),
            (b, Vec3::new(20.0, 0.0, 0.0)),
        ];
        assert_eq!(session.prepare(&members, Vec3::ZERO), Ok(2));
        assert_relative_eq!(session.initial_centroid().x, 10.0, epsilon = 1e-4);
        let recorded: Vec<Entity> = session.records().iter().map(|r| r.entity).collect();
        assert_eq!(recorded, vec![a, b]);
    }

    #[rstest]
    #[case::below(-3.0, 0.0)]
    #[case::above(7.0, 1.0)]
    #[case::nan(f32::NAN, 0.0)]
    fn alpha_is_clamped(entities: (World, [Entity; 3]), #[case] alpha: f32, #[case] clamped: f32) {
        let (_world, ids) = entities;
        let session = prepared(ids);
        let expected = session
            .initial_centroid()
            .lerp(session.target_centroid(), clamped);
        let actual = session.centroid_at(alpha);
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-4);
    }

    #[rstest]
    fn offsets_survive_non_monotonic_updates(entities: (World, [Entity; 3])) {
        let (_world, ids) = entities;
        let mut session = prepared(ids);
        let mut last = Vec::new();
        for alpha in [0.8, 0.2, 1.0] {
            last.clear();
            session.update(alpha, |entity, position| {
                last.push((entity, position));
                true
            });
        }
        let [(_, a), (_, b), (_, c)] = last.as_slice() else {
            panic!("expected three placements, got {last:?}");
        };
        assert_relative_eq!(b.x - a.x, 30.0, epsilon = 1e-3);
        assert_relative_eq!(c.y - a.y, 30.0, epsilon = 1e-3);
        assert_relative_eq!(((*a + *b + *c) / 3.0).x, 100.0, epsilon = 1e-3);
    }

    #[rstest]
    fn missing_entities_are_dropped_lazily(entities: (World, [Entity; 3])) {
        let (_world, ids) = entities;
        let mut session = prepared(ids);
        let gone = ids[1];
        assert_eq!(session.update(0.5, |entity, _| entity != gone), 2);
        assert_eq!(session.records().len(), 2);
        assert!(session.records().iter().all(|r| r.entity != gone));
    }

    #[rstest]
    fn finish_is_idempotent(entities: (World, [Entity; 3])) {
        let (_world, ids) = entities;
        let mut once = prepared(ids);
        once.finish();
        let mut twice = prepared(ids);
        twice.finish();
        twice.finish();
        assert_eq!(once, twice);
        assert_eq!(once, GroupPullSession::default());
        assert_eq!(once.update(1.0, |_, _| true), 0);
    }
}

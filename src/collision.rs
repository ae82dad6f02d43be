//! Pairwise collision-ignore bookkeeping.
//!
//! Attacks register attacker and victim so their movement volumes stop
//! colliding during choreographed moves. Pairs stay registered until
//! [`release_attack_collision`] or an explicit [`CollisionPairs`] call removes
//! them.

use bevy::prelude::*;
use hashbrown::HashSet;
use log::debug;

/// Unordered entity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EntityPair(Entity, Entity);

impl EntityPair {
    fn new(a: Entity, b: Entity) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    fn contains(self, entity: Entity) -> bool {
        self.0 == entity || self.1 == entity
    }
}

/// Resource recording which entity pairs ignore each other's collision.
#[derive(Resource, Debug, Default)]
pub struct CollisionPairs {
    ignored: HashSet<EntityPair>,
}

impl CollisionPairs {
    /// Enables (`ignore = true`) or disables collision-ignore for a pair.
    pub fn set_ignore_pair(&mut self, a: Entity, b: Entity, ignore: bool) {
        let pair = EntityPair::new(a, b);
        if ignore {
            self.ignored.insert(pair);
        } else {
            self.ignored.remove(&pair);
        }
    }

    /// Whether `a` and `b` currently ignore each other.
    #[must_use]
    pub fn is_ignored(&self, a: Entity, b: Entity) -> bool {
        self.ignored.contains(&EntityPair::new(a, b))
    }

    /// Drops every pair involving `entity`, e.g. when it despawns.
    pub fn release(&mut self, entity: Entity) {
        self.ignored.retain(|pair| !pair.contains(entity));
    }

    /// Re-enables collision for every pair.
    pub fn clear(&mut self) {
        self.ignored.clear();
    }

    /// Number of ignored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ignored.len()
    }

    /// Whether no attacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }
}

/// Re-enables collision between an attacker and its former target.
pub fn release_attack_collision(world: &mut World, attacker: Entity, target: Entity) {
    if let Some(mut pairs) = world.get_resource_mut::<CollisionPairs>() {
        pairs.set_ignore_pair(attacker, target, false);
        debug!("collision restored between {attacker} and {target}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pairs_are_unordered() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut pairs = CollisionPairs::default();
        pairs.set_ignore_pair(a, b, true);
        assert!(pairs.is_ignored(b, a));
        pairs.set_ignore_pair(b, a, false);
        assert!(pairs.is_empty());
    }

    #[rstest]
    fn release_drops_every_pair_for_entity() {
        let mut world = World::new();
        let [a, b, c] = [(); 3].map(|()| world.spawn_empty().id());
        let mut pairs = CollisionPairs::default();
        pairs.set_ignore_pair(a, b, true);
        pairs.set_ignore_pair(a, c, true);
        pairs.set_ignore_pair(b, c, true);
        pairs.release(a);
        assert_eq!(pairs.len(), 1);
        assert!(pairs.is_ignored(b, c));
    }

    #[rstest]
    fn release_attack_collision_restores_pair() {
        let mut world = World::new();
        world.init_resource::<CollisionPairs>();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        world.resource_mut::<CollisionPairs>().set_ignore_pair(a, b, true);
        release_attack_collision(&mut world, a, b);
        assert!(!world.resource::<CollisionPairs>().is_ignored(a, b));
    }
}

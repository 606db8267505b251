use super::entity::EntityId;
use super::registry::EntityRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub first: EntityId,
    pub second: EntityId,
}

/// Every overlapping pair of solid entities of different kinds, each pair
/// reported once with `first` earlier in insertion order.
pub fn detect_collisions<K: Copy + PartialEq>(registry: &EntityRegistry<K>) -> Vec<CollisionPair> {
    let entities = registry.as_slice();
    let mut pairs = Vec::new();
    for (index, first) in entities.iter().enumerate() {
        if !first.solid {
            continue;
        }
        let first_bounds = first.bounds();
        for second in &entities[index + 1..] {
            if !second.solid || second.kind() == first.kind() {
                continue;
            }
            if first_bounds.overlaps(&second.bounds()) {
                pairs.push(CollisionPair {
                    first: first.id(),
                    second: second.id(),
                });
            }
        }
    }
    pairs
}

/// An earlier collision handler may have removed or killed one side.
pub(crate) fn pair_is_live<K: Copy + PartialEq>(
    registry: &EntityRegistry<K>,
    pair: CollisionPair,
) -> bool {
    let solid = |id: EntityId| registry.get(id).is_some_and(|entity| entity.solid);
    solid(pair.first) && solid(pair.second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::entity::EntityDesc;
    use crate::app::geometry::Size;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Ship,
        Rock,
        Shot,
    }

    fn at(kind: Kind, x: f32, y: f32) -> EntityDesc<Kind> {
        EntityDesc::new(kind, Size::new(20, 20)).at(x, y)
    }

    #[test]
    fn overlapping_pairs_are_reported_once_in_order() {
        let mut registry = EntityRegistry::new();
        let ship = registry.add(at(Kind::Ship, 0.0, 0.0));
        let rock = registry.add(at(Kind::Rock, 10.0, 0.0));
        let shot = registry.add(at(Kind::Shot, 5.0, 5.0));
        let pairs = detect_collisions(&registry);
        assert_eq!(
            pairs,
            vec![
                CollisionPair { first: ship, second: rock },
                CollisionPair { first: ship, second: shot },
                CollisionPair { first: rock, second: shot },
            ]
        );
    }

    #[test]
    fn same_kind_never_collides() {
        let mut registry = EntityRegistry::new();
        registry.add(at(Kind::Rock, 0.0, 0.0));
        registry.add(at(Kind::Rock, 0.0, 0.0));
        assert!(detect_collisions(&registry).is_empty());
    }

    #[test]
    fn non_solid_and_touching_entities_are_skipped() {
        let mut registry = EntityRegistry::new();
        registry.add(at(Kind::Ship, 0.0, 0.0).solid(false));
        registry.add(at(Kind::Rock, 0.0, 0.0));
        registry.add(at(Kind::Shot, 20.0, 0.0));
        assert!(detect_collisions(&registry).is_empty());
    }

    #[test]
    fn killed_entity_invalidates_pair() {
        let mut registry = EntityRegistry::new();
        let ship = registry.add(at(Kind::Ship, 0.0, 0.0));
        let rock = registry.add(at(Kind::Rock, 0.0, 0.0));
        let pair = CollisionPair { first: ship, second: rock };
        assert!(pair_is_live(&registry, pair));
        registry.kill(rock);
        assert!(!pair_is_live(&registry, pair));
        registry.remove(ship);
        assert!(!pair_is_live(&registry, pair));
    }
}

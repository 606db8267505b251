use super::entity::{Entity, EntityDesc, EntityId, EntityIdAllocator};
use super::geometry::Viewport;

/// Owns every live entity in insertion order. Removed entities are parked in
/// a deletion queue until the frame driver hands them to the game.
#[derive(Debug)]
pub struct EntityRegistry<K> {
    allocator: EntityIdAllocator,
    entities: Vec<Entity<K>>,
    deleted: Vec<Entity<K>>,
}

impl<K> Default for EntityRegistry<K> {
    fn default() -> Self {
        Self {
            allocator: EntityIdAllocator::default(),
            entities: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> EntityRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, desc: EntityDesc<K>) -> EntityId {
        let id = self.allocator.allocate();
        self.entities.push(desc.build(id));
        id
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let entity = self.entities.remove(index);
                self.deleted.push(entity);
                true
            }
            None => false,
        }
    }

    pub fn remove_all_of_kind(&mut self, kind: K) -> usize {
        self.remove_where(|entity| entity.kind() == kind)
    }

    /// Removes every entity, queueing a deletion notification for each.
    pub fn clear(&mut self) -> usize {
        let removed = self.entities.len();
        self.deleted.append(&mut self.entities);
        removed
    }

    /// Marks an entity for removal at the end of the frame. It stops
    /// colliding immediately.
    pub fn kill(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.doom();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity<K>> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity<K>> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Entity<K>> {
        self.entities
            .iter()
            .find(|entity| entity.name() == Some(name))
    }

    pub fn get_by_index(&self, index: usize) -> Option<&Entity<K>> {
        self.entities.get(index)
    }

    pub fn first_of_kind(&self, kind: K) -> Option<&Entity<K>> {
        self.entities.iter().find(|entity| entity.kind() == kind)
    }

    pub fn count(&self) -> usize {
        self.entities.len()
    }

    pub fn count_of_kind(&self, kind: K) -> usize {
        self.entities
            .iter()
            .filter(|entity| entity.kind() == kind)
            .count()
    }

    pub fn ids_of_kind(&self, kind: K) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| entity.kind() == kind)
            .map(Entity::id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity<K>> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity<K>> {
        self.entities.iter_mut()
    }

    pub(crate) fn as_slice(&self) -> &[Entity<K>] {
        &self.entities
    }

    pub(crate) fn integrate(&mut self, dt_seconds: f32, viewport: Viewport) {
        for entity in self.entities.iter_mut().filter(|entity| entity.auto_update) {
            entity.integrate(dt_seconds, viewport);
        }
    }

    /// Drops killed entities and those that left their alive zone.
    pub(crate) fn evict(&mut self) -> usize {
        self.remove_where(|entity| entity.is_doomed() || !entity.in_alive_zone())
    }

    pub(crate) fn take_deleted(&mut self) -> Vec<Entity<K>> {
        std::mem::take(&mut self.deleted)
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id() == id)
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&Entity<K>) -> bool) -> usize {
        let mut removed = 0;
        let mut index = 0;
        while index < self.entities.len() {
            if predicate(&self.entities[index]) {
                let entity = self.entities.remove(index);
                self.deleted.push(entity);
                removed += 1;
            } else {
                index += 1;
            }
        }
        removed
    }
}

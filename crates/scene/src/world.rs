use std::collections::HashMap;

use foundation::bounds::Aabb3;
use foundation::handles::Handle;
use tracing::debug;

use crate::components::ParticleSystem;
use crate::entity::{Entity, EntityId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub Handle);

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational slot storage shared by entities and primitives.
#[derive(Debug)]
struct Slots<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    fn insert(&mut self, value: T) -> Handle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            slot.value = Some(value);
            return Handle::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Handle::new(index, 0)
    }

    fn get(&self, handle: Handle) -> Option<&T> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        self.free.push(handle.index());
        Some(value)
    }

    fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|v| (Handle::new(index as u32, slot.generation), v))
        })
    }

    fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.value.is_some()).count()
    }
}

/// The rendered-entity collection of a globe viewer: keyed entities plus
/// free-standing primitives (particle systems).
#[derive(Debug, Default)]
pub struct World {
    entities: Slots<Entity>,
    keys: HashMap<String, EntityId>,
    primitives: Slots<ParticleSystem>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity. Returns `None` without touching the world when another
    /// entity already owns the same key.
    pub fn add(&mut self, entity: Entity) -> Option<EntityId> {
        if let Some(key) = &entity.key
            && self.keys.contains_key(key)
        {
            debug!(key = %key, "entity key already present");
            return None;
        }
        let key = entity.key.clone();
        let id = EntityId(self.entities.insert(entity));
        if let Some(key) = key {
            self.keys.insert(key, id);
        }
        Some(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    pub fn by_key(&self, key: &str) -> Option<EntityId> {
        self.keys.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(id.0)?;
        if let Some(key) = &entity.key {
            self.keys.remove(key);
        }
        Some(entity)
    }

    pub fn remove_by_key(&mut self, key: &str) -> Option<Entity> {
        let id = self.by_key(key)?;
        self.remove(id)
    }

    /// Direct children of `parent`, in slot order.
    pub fn children(&self, parent: EntityId) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, e)| e.parent == Some(parent))
            .map(|(h, _)| EntityId(h))
            .collect()
    }

    /// Returns false when the entity no longer exists.
    pub fn set_show(&mut self, id: EntityId, show: bool) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.show = show;
                true
            }
            None => false,
        }
    }

    /// Effective visibility: the entity and every live ancestor are shown.
    pub fn is_showing(&self, id: EntityId) -> bool {
        let mut current = Some(id);
        // Bounded walk; a parent cycle counts as hidden.
        for _ in 0..=self.entities.slots.len() {
            let Some(cur) = current else {
                return true;
            };
            let Some(entity) = self.get(cur) else {
                return cur != id;
            };
            if !entity.show {
                return false;
            }
            current = entity.parent;
        }
        false
    }

    /// World-space bounds of every graphic on the entity.
    pub fn bounds(&self, id: EntityId) -> Option<Aabb3> {
        let entity = self.get(id)?;
        let bounds = Aabb3::from_points(entity.extent_points().into_iter().map(|p| p.as_array()))?;
        Some(match &entity.model {
            Some(model) => bounds.padded(model.radius_m),
            None => bounds,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(h, e)| (EntityId(h), e))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_primitive(&mut self, primitive: ParticleSystem) -> PrimitiveId {
        PrimitiveId(self.primitives.insert(primitive))
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&ParticleSystem> {
        self.primitives.get(id.0)
    }

    pub fn primitive_mut(&mut self, id: PrimitiveId) -> Option<&mut ParticleSystem> {
        self.primitives.get_mut(id.0)
    }

    pub fn remove_primitive(&mut self, id: PrimitiveId) -> Option<ParticleSystem> {
        self.primitives.remove(id.0)
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
}

#[cfg(test)]
mod tests {
    use super::World;
    use crate::components::ParticleSystem;
    use crate::entity::Entity;
    use foundation::math::{Ecef, GeoPosition};

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut world = World::new();
        let first = world.add(Entity::new("1_plotPoint")).expect("added");
        assert!(world.add(Entity::new("1_plotPoint")).is_none());
        assert_eq!(world.by_key("1_plotPoint"), Some(first));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn removed_handles_go_stale() {
        let mut world = World::new();
        let a = world.add(Entity::new("a")).expect("a");
        assert!(world.remove(a).is_some());
        assert!(!world.contains_key("a"));

        let b = world.add(Entity::new("b")).expect("b");
        assert_eq!(a.index(), b.index());
        assert!(world.get(a).is_none());
        assert!(world.get(b).is_some());
        assert!(!world.set_show(a, false));
    }

    #[test]
    fn hidden_parent_hides_children() {
        let mut world = World::new();
        let group = world.add(Entity::new("group")).expect("group");
        let child = world.add(Entity::new("child").with_parent(group)).expect("child");
        assert!(world.is_showing(child));
        assert_eq!(world.children(group), vec![child]);

        world.set_show(group, false);
        assert!(!world.is_showing(child));

        // Orphans fall back to their own flag.
        world.remove(group);
        assert!(world.is_showing(child));
    }

    #[test]
    fn bounds_cover_position() {
        let mut world = World::new();
        let p = GeoPosition::new(117.0, 39.0, 0.0).to_cartesian();
        let id = world.add(Entity::new("p").with_position(p)).expect("p");
        let b = world.bounds(id).expect("bounds");
        assert!(b.contains(p.as_array()));
        let empty = world.add(Entity::new("empty")).expect("empty");
        assert!(world.bounds(empty).is_none());
    }

    #[test]
    fn primitives_live_beside_entities() {
        let mut world = World::new();
        let id = world.add_primitive(ParticleSystem::fire(Ecef::new(1.0, 0.0, 0.0)));
        assert_eq!(world.primitive_count(), 1);
        world.primitive_mut(id).expect("fire").show = false;
        assert!(!world.primitive(id).expect("fire").show);
        assert!(world.remove_primitive(id).is_some());
        assert!(world.remove_primitive(id).is_none());
    }
}

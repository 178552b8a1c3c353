//! Capped, insertion-ordered entity container
//!
//! Entities are never removed mid-step. Killing one only flips its `alive`
//! flag; `compact` sweeps the tombstones once the step is done.

use serde::{Deserialize, Serialize};

use super::state::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    entities: Vec<Entity>,
    cap: usize,
}

impl Pool {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entities: Vec::with_capacity(cap),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Append an entity. Returns false (and drops it) when the live
    /// population is already at the cap.
    pub fn spawn(&mut self, entity: Entity) -> bool {
        if self.count_alive() >= self.cap {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Tombstone the entity with `id`. Returns false if no live entity matched.
    ///
    /// For callers holding only an id. The step itself tombstones through
    /// `Entity::kill` while it already has the entity borrowed.
    pub fn mark_dead(&mut self, id: u32) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id && e.alive) {
            Some(entity) => {
                entity.alive = false;
                true
            }
            None => false,
        }
    }

    /// Drop every dead entity, keeping survivors in their original order.
    /// Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.alive);
        before - self.entities.len()
    }

    pub fn count_alive(&self) -> usize {
        self.entities.iter().filter(|e| e.alive).count()
    }

    /// Total stored entities, tombstones included
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Live entities only
    pub fn alive(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.alive)
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Entity] {
        &mut self.entities
    }
}

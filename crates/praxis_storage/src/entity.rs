//! Generational entity allocation.
//!
//! Each index carries a generation counter: odd while the entity is alive,
//! even once it is destroyed. A destroyed index is reused with the next odd
//! generation, so an old [`EntityId`] for that index is detected as stale.

// Indices are u64 but we target 64-bit systems.
#![allow(clippy::cast_possible_truncation)]

use praxis_foundation::{EntityId, Error, Result};

/// Allocates entity identities and tracks which are alive.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    generations: Vec<u32>,
    free: Vec<u64>,
    live: usize,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new identity, reusing a freed index when one exists.
    pub fn spawn(&mut self) -> EntityId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let generation = &mut self.generations[index as usize];
            *generation += 1;
            EntityId::new(index, *generation)
        } else {
            let index = self.generations.len() as u64;
            self.generations.push(1);
            EntityId::new(index, 1)
        }
    }

    /// Frees an identity.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown, already destroyed, or stale.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;
        self.generations[id.index as usize] += 1;
        self.free.push(id.index);
        self.live -= 1;
        Ok(())
    }

    /// Returns true if `id` refers to a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.validate(id).is_ok()
    }

    /// Checks that `id` refers to a live entity.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::StaleEntity`](praxis_foundation::ErrorKind::StaleEntity)
    /// when the index was reused, otherwise
    /// [`ErrorKind::EntityNotFound`](praxis_foundation::ErrorKind::EntityNotFound).
    pub fn validate(&self, id: EntityId) -> Result<()> {
        match self.generations.get(id.index as usize) {
            None => Err(Error::entity_not_found(id)),
            Some(&current) if current != id.generation => Err(Error::stale_entity(id)),
            Some(&current) if current % 2 == 0 => Err(Error::entity_not_found(id)),
            Some(_) => Ok(()),
        }
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if no entity is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates live identities in index order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(index, &generation)| EntityId::new(index as u64, generation))
    }
}

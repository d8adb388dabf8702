//! # Entity Id Pool
//!
//! Hands out [`EntityId`]s and recycles their slots.
//!
//! Each slot stores the generation of the id currently (or next) issued
//! for it. Freeing a slot bumps that generation, which invalidates every
//! outstanding id for the slot at once. The next `create` reuses the slot
//! with the bumped generation.
//!
//! ## Generation wrap-around
//!
//! Generations are `u32` and wrap (skipping 0, which is reserved for the
//! null id). After 2^32 - 1 reuses of a single slot an ancient id may
//! compare valid again. Callers holding handles across that many
//! recreate cycles of one slot must not rely on validity checks.

use super::entity::EntityId;

/// Generational slot allocator.
#[derive(Debug, Default)]
pub struct EntityIdPool {
    /// Current generation per slot.
    generations: Vec<u32>,
    /// Whether each slot is currently handed out.
    alive: Vec<bool>,
    /// Freed slots, reused LIFO.
    free_indices: Vec<u32>,
    /// Number of live ids.
    live: usize,
}

impl EntityIdPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool with room for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            alive: Vec::with_capacity(capacity),
            free_indices: Vec::new(),
            live: 0,
        }
    }

    /// Issues an id, reusing a freed slot if one is available.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` slots would be needed.
    pub fn create(&mut self) -> EntityId {
        let index = if let Some(index) = self.free_indices.pop() {
            index
        } else {
            let index = u32::try_from(self.generations.len()).expect("entity slots exhausted");
            self.generations.push(1);
            self.alive.push(false);
            index
        };

        let slot = index as usize;
        self.alive[slot] = true;
        self.live += 1;
        EntityId::new(index, self.generations[slot])
    }

    /// Frees the slot of `id` and invalidates every id issued for it.
    ///
    /// Returns `false` (and does nothing) if `id` is already invalid.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.is_valid(id) {
            return false;
        }
        let slot = id.index() as usize;
        self.generations[slot] = next_generation(self.generations[slot]);
        self.alive[slot] = false;
        self.free_indices.push(id.index());
        self.live -= 1;
        true
    }

    /// Returns `true` if `id` is the id currently issued for its slot.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, id: EntityId) -> bool {
        let slot = id.index() as usize;
        self.alive.get(slot).copied().unwrap_or(false) && self.generations[slot] == id.generation()
    }

    /// Returns the live id at `index`, if the slot is in use.
    #[must_use]
    pub fn id_at(&self, index: u32) -> Option<EntityId> {
        let slot = index as usize;
        if self.alive.get(slot).copied().unwrap_or(false) {
            Some(EntityId::new(index, self.generations[slot]))
        } else {
            None
        }
    }

    /// Returns the generation stored for `index`.
    #[must_use]
    pub fn generation_at(&self, index: u32) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }

    /// Iterates over the live ids in slot order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.generations.len()).filter_map(|slot| {
            let index = u32::try_from(slot).ok()?;
            self.id_at(index)
        })
    }

    /// Number of live ids.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no id is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever created (live or free).
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.generations.len()
    }

    /// Frees every live slot, invalidating all outstanding ids.
    pub fn clear(&mut self) {
        for slot in 0..self.generations.len() {
            if self.alive[slot] {
                self.generations[slot] = next_generation(self.generations[slot]);
                self.alive[slot] = false;
                if let Ok(index) = u32::try_from(slot) {
                    self.free_indices.push(index);
                }
            }
        }
        self.live = 0;
    }
}

#[inline]
const fn next_generation(generation: u32) -> u32 {
    match generation.wrapping_add(1) {
        0 => 1,
        next => next,
    }
}

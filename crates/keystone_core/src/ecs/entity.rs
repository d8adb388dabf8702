//! # Entity Handles
//!
//! Entities are lightweight identifiers consisting of:
//! - An index into the world's slot tables
//! - A generation counter for safe reuse
//! - The id of the world that issued them
//!
//! Handles own nothing. Copying or dropping one has no effect on the world.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Slot index plus generation, packed into one `u64`.
///
/// - Lower 32 bits: slot index
/// - Upper 32 bits: generation counter for detecting stale references
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Null id. Generation 0 is never issued, so this id is never valid.
    pub const NULL: Self = Self::new(u32::MAX, 0);

    /// Creates a new entity ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns the packed representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Rebuilds an id from [`EntityId::to_bits`].
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Checks if this entity ID is the null id.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.generation() == 0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

/// Identifies one [`World`](crate::World) for the lifetime of the process.
///
/// Id 0 is reserved for handles that belong to no world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(u32);

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(1);

impl WorldId {
    /// The id of no world.
    pub const NONE: Self = Self(0);

    /// Allocates a fresh, process-unique id.
    pub(crate) fn next() -> Self {
        Self(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Handle to an entity living in a [`World`](crate::World).
///
/// Two handles are equal iff they name the same slot, the same generation
/// and the same world. Whether a handle is still valid is a question for
/// the world: see [`World::is_valid`](crate::World::is_valid).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityId,
    world: WorldId,
}

impl Entity {
    /// A handle that is never valid in any world.
    pub const NULL: Self = Self {
        id: EntityId::NULL,
        world: WorldId::NONE,
    };

    #[inline]
    pub(crate) const fn new(id: EntityId, world: WorldId) -> Self {
        Self { id, world }
    }

    /// Returns the slot index and generation.
    #[inline]
    #[must_use]
    pub const fn id(self) -> EntityId {
        self.id
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.id.index()
    }

    /// Returns the generation.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.id.generation()
    }

    /// Returns the id of the world that issued this handle.
    #[inline]
    #[must_use]
    pub const fn world_id(self) -> WorldId {
        self.world
    }

    /// Packed index and generation, handy as a log field or map key.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.id.to_bits()
    }

    /// Returns `true` for [`Entity::NULL`] and other never-issued handles.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.id.is_null()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else {
            write!(f, "{}:{}", self.index(), self.generation())
        }
    }
}

//! # Component Types
//!
//! Components are plain data records with no behaviour. The core never
//! looks inside them; it stores them, hands them back by type and tracks
//! which types each entity carries.
//!
//! Every distinct component type receives a small integer
//! [`ComponentTypeId`] the first time it is used anywhere in the process.
//! Ids are dense and monotonic, so they double as bit positions in a
//! [`ComponentTypeList`](super::ComponentTypeList) and as column indices in
//! [`ComponentStorage`](super::ComponentStorage).

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;

/// Marker trait for ECS components.
///
/// Components must be `Send` so a whole world can be moved to (or
/// guarded for) another thread; the core itself never shares them.
///
/// # Example
///
/// ```rust
/// use keystone_core::Component;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Position {
///     x: f32,
///     y: f32,
///     z: f32,
/// }
///
/// impl Component for Position {}
/// ```
pub trait Component: Send + 'static {}

/// Process-wide identifier of a component type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(u32);

impl ComponentTypeId {
    /// Wraps a raw id.
    ///
    /// Only useful for building type lists by hand; ids obtained this way
    /// are not tied to any registered type.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the id as a bit / column index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match component_type_name(*self) {
            Some(name) => write!(f, "ComponentTypeId({}: {name})", self.0),
            None => write!(f, "ComponentTypeId({})", self.0),
        }
    }
}

/// Maps Rust types to dense component ids.
struct TypeRegistry {
    by_type: HashMap<TypeId, ComponentTypeId>,
    names: Vec<&'static str>,
}

impl TypeRegistry {
    fn register(&mut self, type_id: TypeId, name: &'static str) -> ComponentTypeId {
        // Another thread may have won the race between our read and write lock.
        if let Some(&id) = self.by_type.get(&type_id) {
            return id;
        }
        let raw = u32::try_from(self.names.len()).expect("component type ids exhausted");
        let id = ComponentTypeId(raw);
        self.by_type.insert(type_id, id);
        self.names.push(name);
        tracing::trace!(id = raw, name, "registered component type");
        id
    }
}

static REGISTRY: OnceLock<RwLock<TypeRegistry>> = OnceLock::new();

fn registry() -> &'static RwLock<TypeRegistry> {
    REGISTRY.get_or_init(|| {
        RwLock::new(TypeRegistry {
            by_type: HashMap::new(),
            names: Vec::new(),
        })
    })
}

/// Returns the id of component type `T`, assigning one on first use.
///
/// # Panics
///
/// Panics if more than `u32::MAX` distinct component types are registered.
#[must_use]
pub fn component_type_id<T: Component>() -> ComponentTypeId {
    let type_id = TypeId::of::<T>();
    if let Some(&id) = registry().read().by_type.get(&type_id) {
        return id;
    }
    registry().write().register(type_id, type_name::<T>())
}

/// Returns the Rust type name registered under `id`.
#[must_use]
pub fn component_type_name(id: ComponentTypeId) -> Option<&'static str> {
    registry().read().names.get(id.index()).copied()
}

/// Returns how many component types have been assigned an id so far.
#[must_use]
pub fn registered_component_types() -> usize {
    registry().read().names.len()
}

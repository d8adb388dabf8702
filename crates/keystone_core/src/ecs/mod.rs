//! # Entity Component System
//!
//! Entities are generational handles, components are plain data records,
//! and systems are behaviour that runs over every activated entity whose
//! component set passes the system's [`Filter`].
//!
//! ## Design
//!
//! - Structural changes (activate, deactivate, kill) are queued and
//!   committed in one [`World::refresh`] call
//! - Component add/remove applies immediately
//! - System membership is updated incrementally, never recomputed per frame
//! - Stale handles are detected through per-slot generation counters

mod component;
mod entity;
mod filter;
mod pool;
mod storage;
mod system;
mod type_list;
mod world;

pub use component::{
    component_type_id, component_type_name, registered_component_types, Component,
    ComponentTypeId,
};
pub use entity::{Entity, EntityId, WorldId};
pub use filter::{ComponentSet, Filter};
pub use pool::EntityIdPool;
pub use storage::ComponentStorage;
pub use system::{EntityObserver, System, SystemBase, SystemContext};
pub use type_list::{ComponentTypeList, TypeListIter};
pub use world::{EntityMut, RefreshStats, World};

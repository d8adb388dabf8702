//! # Keystone Core
//!
//! In-memory Entity Component System with deferred structural changes:
//! - Generational entity handles that go stale once their entity is killed
//! - Per-entity component sets tracked as bitsets
//! - Systems that declare a filter and receive add/remove notifications
//!
//! ## Architecture Rules
//!
//! 1. **Deferred lifecycle** - activation, deactivation and kills only take
//!    effect in [`World::refresh`], in that order
//! 2. **Immediate data** - component add/remove/get apply at once
//! 3. **Incremental membership** - each system keeps its own member list,
//!    updated only by refresh
//!
//! ## Example
//!
//! ```rust
//! use keystone_core::{Component, Filter, System, EntityObserver, World};
//!
//! struct Health(u32);
//! impl Component for Health {}
//!
//! struct Regen;
//! impl EntityObserver for Regen {}
//! impl System for Regen {
//!     fn filter(&self) -> Filter {
//!         Filter::new().requires::<Health>()
//!     }
//! }
//!
//! let mut world = World::new();
//! world.add_system(Regen).unwrap();
//!
//! let e = world.create_entity();
//! world.add_component(e, Health(10));
//! world.activate(e);
//! world.refresh();
//!
//! world.run_system::<Regen, _>(|_, mut ctx| {
//!     for &e in ctx.entities() {
//!         ctx.get_mut::<Health>(e).0 += 1;
//!     }
//! });
//! assert_eq!(world.get_component::<Health>(e).0, 11);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;

pub use config::WorldConfig;
pub use ecs::{
    component_type_id, component_type_name, registered_component_types, Component,
    ComponentSet, ComponentStorage, ComponentTypeId, ComponentTypeList, Entity, EntityId,
    EntityIdPool, EntityMut, EntityObserver, Filter, RefreshStats, System, SystemBase,
    SystemContext, TypeListIter, World, WorldId,
};
pub use error::{ConfigError, EcsError, EcsResult};

//! # KEYSTONE
//!
//! Entity component system with filtered systems and deferred refresh.
//!
//! ## Frame Shape
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  game code                                                   │
//! │    create_entity / add_component / activate / kill           │
//! │                         │                                    │
//! │                         ▼                                    │
//! │  World::refresh()   activations → deactivations → kills      │
//! │                         │                                    │
//! │                         ▼                                    │
//! │  World::run_system::<S, _>(..)   per-system update pass      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use keystone::prelude::*;
//!
//! struct Position(f32);
//! impl Component for Position {}
//!
//! struct Renderer;
//! impl EntityObserver for Renderer {}
//! impl System for Renderer {
//!     fn filter(&self) -> Filter {
//!         Filter::new().requires::<Position>()
//!     }
//! }
//!
//! let mut world = World::new();
//! world.add_system(Renderer).unwrap();
//! let e = world.create_entity();
//! world.entity(e).add_component(Position(1.0)).activate();
//! world.refresh();
//! assert_eq!(world.system_entities::<Renderer>(), Some(&[e][..]));
//! ```

pub use keystone_core as core;
pub use keystone_core::{config, ecs, error};

pub use keystone_core::{
    ConfigError, EcsError, EcsResult, Entity, RefreshStats, World, WorldConfig,
};

/// Everything needed to declare components and systems and drive a world.
pub mod prelude {
    pub use keystone_core::{
        Component, EcsError, EcsResult, Entity, EntityMut, EntityObserver, Filter,
        RefreshStats, System, SystemContext, World, WorldConfig,
    };
}

//! # ECS Error Types
//!
//! Recoverable errors surfaced by the `try_*` family of operations and by
//! configuration loading. Contract violations (stale handles, reading an
//! absent component through the panicking accessors) are not represented
//! here; they panic.

use std::path::PathBuf;

use thiserror::Error;

use crate::ecs::Entity;

/// Errors that can occur while operating on a [`World`](crate::World).
#[derive(Error, Debug)]
pub enum EcsError {
    /// A system of the same type is already registered with the world.
    #[error("system already registered: {name}")]
    SystemAlreadyRegistered {
        /// Type name of the rejected system.
        name: &'static str,
    },

    /// The entity already carries a component of this type.
    #[error("entity {entity} already has component {component}")]
    DuplicateComponent {
        /// The entity the component was added to.
        entity: Entity,
        /// Type name of the rejected component.
        component: &'static str,
    },

    /// The entity does not carry a component of this type.
    #[error("entity {entity} has no component {component}")]
    MissingComponent {
        /// The queried entity.
        entity: Entity,
        /// Type name of the missing component.
        component: &'static str,
    },

    /// The handle is stale, null, or belongs to another world.
    #[error("invalid entity handle: {entity}")]
    InvalidEntity {
        /// The offending handle.
        entity: Entity,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur while loading a [`WorldConfig`](crate::WorldConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;

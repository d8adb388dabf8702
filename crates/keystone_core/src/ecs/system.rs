//! # Systems
//!
//! A system is a user type that declares a [`Filter`] and gets told which
//! entities match it. The world keeps, for each registered system, a
//! [`SystemBase`]: the filter plus the ordered list of current members.
//!
//! Membership changes only inside [`World::refresh`](crate::World::refresh)
//! (and when the system is first registered). Each change is reported
//! synchronously through the [`EntityObserver`] hooks.
//!
//! Per-frame logic is driven by the caller through
//! [`World::run_system`](crate::World::run_system), which hands the system
//! a [`SystemContext`]: its member list plus component access.
//!
//! ## Example
//!
//! ```rust
//! use keystone_core::{Component, EntityObserver, Filter, System, SystemContext, World};
//!
//! struct Position(f32);
//! impl Component for Position {}
//! struct Velocity(f32);
//! impl Component for Velocity {}
//!
//! struct Movement;
//!
//! impl EntityObserver for Movement {}
//!
//! impl System for Movement {
//!     fn filter(&self) -> Filter {
//!         Filter::new().requires::<(Position, Velocity)>()
//!     }
//! }
//!
//! impl Movement {
//!     fn update(&mut self, mut ctx: SystemContext<'_>) {
//!         for &entity in ctx.entities() {
//!             let dx = ctx.get::<Velocity>(entity).0;
//!             ctx.get_mut::<Position>(entity).0 += dx;
//!         }
//!     }
//! }
//!
//! let mut world = World::new();
//! world.add_system(Movement).unwrap();
//! let e = world.create_entity();
//! world.add_component(e, Position(0.0));
//! world.add_component(e, Velocity(2.0));
//! world.activate(e);
//! world.refresh();
//!
//! world.run_system::<Movement, _>(|movement, ctx| movement.update(ctx));
//! assert_eq!(world.get_component::<Position>(e).0, 2.0);
//! ```

use std::any::{type_name, Any, TypeId};

use super::component::{component_type_id, Component};
use super::entity::{Entity, WorldId};
use super::filter::Filter;
use super::pool::EntityIdPool;
use super::storage::ComponentStorage;
use super::world::Pending;
use crate::error::{EcsError, EcsResult};

/// Membership notifications. Both hooks default to doing nothing.
pub trait EntityObserver {
    /// Called when `entity` starts matching the system.
    fn on_entity_added(&mut self, _entity: Entity) {}

    /// Called when `entity` stops matching the system (filter change,
    /// deactivation or death).
    fn on_entity_removed(&mut self, _entity: Entity) {}
}

/// A filtered system that can be registered with a [`World`](crate::World).
///
/// At most one instance of each system type may be registered per world.
pub trait System: EntityObserver + Send + 'static {
    /// The filter deciding membership. Queried once, at registration.
    fn filter(&self) -> Filter;
}

/// Filter and current members of one registered system.
///
/// Only the [`World`](crate::World) builds and updates these; the type is
/// public for its read-only `filter()` and `entities()` getters.
#[derive(Debug)]
pub struct SystemBase {
    filter: Filter,
    /// Members in the order they joined.
    entities: Vec<Entity>,
    /// Membership flag per entity slot.
    members: Vec<bool>,
}

impl SystemBase {
    /// Creates an empty member list for `filter`.
    #[must_use]
    pub(crate) fn new(filter: Filter) -> Self {
        Self {
            filter,
            entities: Vec::new(),
            members: Vec::new(),
        }
    }

    /// The system's filter.
    #[inline]
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Current members, as of the last refresh.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns `true` if `entity`'s slot is a member.
    ///
    /// Slots are only reused after a kill, which removes the old handle
    /// first, so the slot identifies the handle.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.members
            .get(entity.index() as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Adds `entity`. Returns `false` if it was already a member.
    pub(crate) fn insert(&mut self, entity: Entity) -> bool {
        let slot = entity.index() as usize;
        if slot >= self.members.len() {
            self.members.resize(slot + 1, false);
        }
        if self.members[slot] {
            return false;
        }
        self.members[slot] = true;
        self.entities.push(entity);
        true
    }

    /// Removes `entity`, keeping the order of the others. Returns `false`
    /// if it was not a member.
    pub(crate) fn remove(&mut self, entity: Entity) -> bool {
        if !self.contains(entity) {
            return false;
        }
        self.members[entity.index() as usize] = false;
        if let Some(pos) = self.entities.iter().position(|&e| e == entity) {
            self.entities.remove(pos);
        }
        true
    }

    /// Drops every member without notification.
    pub(crate) fn clear(&mut self) {
        self.entities.clear();
        self.members.clear();
    }
}

/// Object-safe view of a boxed [`System`].
pub(crate) trait ErasedSystem: Send {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn entity_added(&mut self, entity: Entity);
    fn entity_removed(&mut self, entity: Entity);
}

impl<S: System> ErasedSystem for S {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn entity_added(&mut self, entity: Entity) {
        self.on_entity_added(entity);
    }

    fn entity_removed(&mut self, entity: Entity) {
        self.on_entity_removed(entity);
    }
}

/// A system registered with a world.
pub(crate) struct SystemSlot {
    pub(crate) type_id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) base: SystemBase,
    pub(crate) system: Box<dyn ErasedSystem>,
}

impl SystemSlot {
    pub(crate) fn new<S: System>(system: S) -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            name: type_name::<S>(),
            base: SystemBase::new(system.filter()),
            system: Box::new(system),
        }
    }

    /// Adds `entity` if it is not a member yet, firing the hook.
    pub(crate) fn admit(&mut self, entity: Entity) {
        if self.base.insert(entity) {
            tracing::trace!(system = self.name, %entity, "entity added");
            self.system.entity_added(entity);
        }
    }

    /// Removes `entity` if it is a member, firing the hook.
    pub(crate) fn evict(&mut self, entity: Entity) {
        if self.base.remove(entity) {
            tracing::trace!(system = self.name, %entity, "entity removed");
            self.system.entity_removed(entity);
        }
    }
}

/// Access handed to a system by [`World::run_system`](crate::World::run_system).
///
/// Components can be read and written freely. Structural requests
/// (activate, deactivate, kill) are queued for the next refresh, so the
/// member list never changes while a system iterates it.
pub struct SystemContext<'w> {
    entities: &'w [Entity],
    world: WorldId,
    pool: &'w EntityIdPool,
    components: &'w mut ComponentStorage,
    activated: &'w [bool],
    pending: &'w mut Pending,
}

impl<'w> SystemContext<'w> {
    pub(crate) fn new(
        entities: &'w [Entity],
        world: WorldId,
        pool: &'w EntityIdPool,
        components: &'w mut ComponentStorage,
        activated: &'w [bool],
        pending: &'w mut Pending,
    ) -> Self {
        Self {
            entities,
            world,
            pool,
            components,
            activated,
            pending,
        }
    }

    /// The system's members. The slice outlives borrows of the context.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &'w [Entity] {
        self.entities
    }

    /// Returns `true` if `entity` is a live handle of this world.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, entity: Entity) -> bool {
        entity.world_id() == self.world && self.pool.is_valid(entity.id())
    }

    #[track_caller]
    fn slot(&self, entity: Entity) -> usize {
        assert!(self.is_valid(entity), "invalid entity handle {entity}");
        entity.index() as usize
    }

    /// Returns `true` if `entity` carries a `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.is_valid(entity)
            && self
                .components
                .has_component(entity.index() as usize, component_type_id::<T>())
    }

    /// Borrows `entity`'s `T`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid or the component is absent.
    #[track_caller]
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> &T {
        let slot = self.slot(entity);
        self.components
            .get::<T>(slot, component_type_id::<T>())
            .unwrap_or_else(|| missing::<T>(entity))
    }

    /// Mutably borrows `entity`'s `T`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid or the component is absent.
    #[track_caller]
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        let slot = self.slot(entity);
        self.components
            .get_mut::<T>(slot, component_type_id::<T>())
            .unwrap_or_else(|| missing::<T>(entity))
    }

    /// Borrows `entity`'s `T`, reporting problems as errors.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] or [`EcsError::MissingComponent`].
    pub fn try_get<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
        if !self.is_valid(entity) {
            return Err(EcsError::InvalidEntity { entity });
        }
        self.components
            .get::<T>(entity.index() as usize, component_type_id::<T>())
            .ok_or_else(|| EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Attaches a component, keeping any existing `T` and dropping `component`.
    ///
    /// Membership is re-evaluated at the next refresh.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        let slot = self.slot(entity);
        if self
            .components
            .add_component(slot, component_type_id::<T>(), Box::new(component))
        {
            self.pending.mark_changed(entity, self.activated);
        }
    }

    /// Detaches and returns `entity`'s `T`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot(entity);
        let removed = self
            .components
            .remove_component(slot, component_type_id::<T>())?;
        self.pending.mark_changed(entity, self.activated);
        removed.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Queues `entity` for activation at the next refresh.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn activate(&mut self, entity: Entity) {
        self.slot(entity);
        self.pending.to_activate.push(entity);
    }

    /// Queues `entity` for deactivation at the next refresh.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn deactivate(&mut self, entity: Entity) {
        self.slot(entity);
        self.pending.to_deactivate.push(entity);
    }

    /// Queues `entity` for destruction at the next refresh.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn kill(&mut self, entity: Entity) {
        self.slot(entity);
        self.pending.to_kill.push(entity);
    }
}

#[track_caller]
pub(crate) fn missing<T>(entity: Entity) -> ! {
    panic!("entity {entity} has no component {}", type_name::<T>())
}

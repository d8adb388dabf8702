//! # ECS World
//!
//! The central container for all entities, components and systems.
//!
//! Structural changes are deferred. `activate`, `deactivate` and `kill`
//! only queue a request; [`World::refresh`] commits every queued request
//! in three fixed phases:
//!
//! ```text
//! 1. activations    mark activated, add to every system whose filter passes
//! 2. deactivations  mark deactivated, remove from every system
//! 3. kills          remove from systems if still active, drop components,
//!                   recycle the slot (generation bump)
//! ```
//!
//! After the kills, entities whose component set changed while activated
//! are re-filtered, provided they are still activated. An entity that
//! leaves in the same refresh never gets a transient add/remove pair.
//!
//! Between refreshes every system's member list reflects the previous
//! refresh. Component mutations and handle validity apply immediately.
//!
//! ## Example
//!
//! ```rust
//! use keystone_core::World;
//!
//! let mut world = World::new();
//! let entity = world.create_entity();
//! world.activate(entity);
//! assert!(!world.is_activated(entity));
//!
//! world.refresh();
//! assert!(world.is_activated(entity));
//!
//! world.kill(entity);
//! world.refresh();
//! assert!(!world.is_valid(entity));
//! ```

use std::any::{type_name, TypeId};
use std::fmt;

use super::component::{component_type_id, Component};
use super::entity::{Entity, WorldId};
use super::pool::EntityIdPool;
use super::storage::ComponentStorage;
use super::system::{missing, System, SystemBase, SystemContext, SystemSlot};
use super::type_list::ComponentTypeList;
use crate::config::WorldConfig;
use crate::error::{EcsError, EcsResult};

/// Requests waiting for the next refresh.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    pub(crate) to_activate: Vec<Entity>,
    pub(crate) to_deactivate: Vec<Entity>,
    pub(crate) to_kill: Vec<Entity>,
    /// Activated entities whose component set changed since the last refresh.
    changed: Vec<Entity>,
    /// Per-slot flag so `changed` holds each entity once.
    changed_flags: Vec<bool>,
}

impl Pending {
    /// Records a component-set change for `entity` if it is activated.
    pub(crate) fn mark_changed(&mut self, entity: Entity, activated: &[bool]) {
        let slot = entity.index() as usize;
        if !activated.get(slot).copied().unwrap_or(false) {
            return;
        }
        if slot >= self.changed_flags.len() {
            self.changed_flags.resize(slot + 1, false);
        }
        if !self.changed_flags[slot] {
            self.changed_flags[slot] = true;
            self.changed.push(entity);
        }
    }

    fn is_empty(&self) -> bool {
        self.to_activate.is_empty()
            && self.to_deactivate.is_empty()
            && self.to_kill.is_empty()
            && self.changed.is_empty()
    }

    fn clear(&mut self) {
        self.to_activate.clear();
        self.to_deactivate.clear();
        self.to_kill.clear();
        self.changed.clear();
        self.changed_flags.iter_mut().for_each(|flag| *flag = false);
    }
}

/// What a call to [`World::refresh`] committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Entities that went from deactivated to activated.
    pub activated: usize,
    /// Entities that went from activated to deactivated (kills excluded).
    pub deactivated: usize,
    /// Entities destroyed.
    pub killed: usize,
}

/// The ECS World - owner of all entity, component and system state.
///
/// Entity handles are plain values; every operation on an entity goes
/// through the world that created it (directly, or through
/// [`World::entity`]). Using a stale handle, or one from another world,
/// for a mutation is a programmer error and panics.
pub struct World {
    /// Identity stamped into every handle this world issues.
    id: WorldId,
    config: WorldConfig,
    pool: EntityIdPool,
    components: ComponentStorage,
    /// Activation flag per entity slot.
    activated: Vec<bool>,
    pending: Pending,
    /// Registered systems, in registration order.
    systems: Vec<SystemSlot>,
}

impl World {
    /// Creates a world with the default [`WorldConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a world with the given configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        let id = WorldId::next();
        tracing::debug!(world = id.get(), ?config, "creating world");
        Self {
            id,
            pool: EntityIdPool::with_capacity(config.entity_capacity),
            components: ComponentStorage::with_capacity(
                config.entity_capacity,
                config.component_capacity,
            ),
            activated: Vec::with_capacity(config.entity_capacity),
            pending: Pending::default(),
            systems: Vec::with_capacity(config.system_capacity),
            config,
        }
    }

    /// Returns this world's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> WorldId {
        self.id
    }

    /// Returns the configuration the world was created with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates a new, deactivated entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let id = self.pool.create();
        let slot = id.index() as usize;
        if slot >= self.activated.len() {
            self.activated.resize(slot + 1, false);
        }
        self.components.ensure_entity(slot);
        Entity::new(id, self.id)
    }

    /// Creates `count` entities.
    pub fn create_entities(&mut self, count: usize) -> Vec<Entity> {
        (0..count).map(|_| self.create_entity()).collect()
    }

    /// Returns `true` if `entity` was issued by this world and has not
    /// been killed (by a processed refresh) since.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, entity: Entity) -> bool {
        entity.world_id() == self.id && self.pool.is_valid(entity.id())
    }

    #[track_caller]
    fn slot(&self, entity: Entity) -> usize {
        assert!(
            self.is_valid(entity),
            "invalid entity handle {entity} used with world {}",
            self.id.get()
        );
        entity.index() as usize
    }

    /// Returns `true` if `entity` is valid and was activated by a refresh.
    #[inline]
    #[must_use]
    pub fn is_activated(&self, entity: Entity) -> bool {
        self.is_valid(entity) && self.activated[entity.index() as usize]
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
    /// The handle stays valid until then.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn kill(&mut self, entity: Entity) {
        self.slot(entity);
        self.pending.to_kill.push(entity);
    }

    /// Queues every entity in `entities` for activation.
    ///
    /// # Panics
    ///
    /// Panics if any handle is invalid.
    #[track_caller]
    pub fn activate_entities(&mut self, entities: &[Entity]) {
        for &entity in entities {
            self.activate(entity);
        }
    }

    /// Queues every entity in `entities` for deactivation.
    ///
    /// # Panics
    ///
    /// Panics if any handle is invalid.
    #[track_caller]
    pub fn deactivate_entities(&mut self, entities: &[Entity]) {
        for &entity in entities {
            self.deactivate(entity);
        }
    }

    /// Queues every entity in `entities` for destruction.
    ///
    /// # Panics
    ///
    /// Panics if any handle is invalid.
    #[track_caller]
    pub fn kill_entities(&mut self, entities: &[Entity]) {
        for &entity in entities {
            self.kill(entity);
        }
    }

    /// Returns a view bundling `entity` with mutable access to this world.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn entity(&mut self, entity: Entity) -> EntityMut<'_> {
        self.slot(entity);
        EntityMut {
            world: self,
            entity,
        }
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.pool.len()
    }

    /// Iterates over the live entities in slot order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.pool.iter().map(move |id| Entity::new(id, self.id))
    }

    /// Iterates over the activated entities in slot order.
    pub fn activated_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities()
            .filter(move |entity| self.activated[entity.index() as usize])
    }

    /// Returns the live handle occupying slot `index`, if any.
    #[must_use]
    pub fn entity_at(&self, index: u32) -> Option<Entity> {
        self.pool.id_at(index).map(|id| Entity::new(id, self.id))
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attaches `component` to `entity`.
    ///
    /// If the entity already has a `T`, the existing one is kept and
    /// `component` is dropped without any signal to the caller. Use
    /// [`World::try_add_component`] to be told about it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        let inserted = self.insert_component(entity, component).is_ok();
        if !inserted && self.config.warn_on_duplicate_component {
            tracing::warn!(
                %entity,
                component = type_name::<T>(),
                "duplicate component discarded"
            );
        }
    }

    /// Attaches `component` to `entity`, failing if one is already present.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] for a stale or foreign handle,
    /// [`EcsError::DuplicateComponent`] if the entity already has a `T`
    /// (the existing component is kept and `component` is dropped).
    pub fn try_add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> EcsResult<()> {
        if !self.is_valid(entity) {
            return Err(EcsError::InvalidEntity { entity });
        }
        self.insert_component(entity, component)
    }

    #[track_caller]
    fn insert_component<T: Component>(&mut self, entity: Entity, component: T) -> EcsResult<()> {
        let slot = self.slot(entity);
        if self
            .components
            .add_component(slot, component_type_id::<T>(), Box::new(component))
        {
            self.pending.mark_changed(entity, &self.activated);
            Ok(())
        } else {
            Err(EcsError::DuplicateComponent {
                entity,
                component: type_name::<T>(),
            })
        }
    }

    /// Detaches and returns `entity`'s `T`. Absent components are a no-op.
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
        self.pending.mark_changed(entity, &self.activated);
        removed.downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Drops every component of `entity`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    pub fn remove_all_components(&mut self, entity: Entity) {
        let slot = self.slot(entity);
        if !self.components.component_type_list(slot).is_empty() {
            self.components.remove_all_components(slot);
            self.pending.mark_changed(entity, &self.activated);
        }
    }

    /// Borrows `entity`'s `T`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid or the entity has no `T`; check with
    /// [`World::has_component`] first or use [`World::try_get_component`].
    #[track_caller]
    #[must_use]
    pub fn get_component<T: Component>(&self, entity: Entity) -> &T {
        let slot = self.slot(entity);
        self.components
            .get::<T>(slot, component_type_id::<T>())
            .unwrap_or_else(|| missing::<T>(entity))
    }

    /// Mutably borrows `entity`'s `T`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid or the entity has no `T`.
    #[track_caller]
    #[must_use]
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
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
    pub fn try_get_component<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
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

    /// Mutable version of [`World::try_get_component`].
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] or [`EcsError::MissingComponent`].
    pub fn try_get_component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        if !self.is_valid(entity) {
            return Err(EcsError::InvalidEntity { entity });
        }
        self.components
            .get_mut::<T>(entity.index() as usize, component_type_id::<T>())
            .ok_or_else(|| EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Returns `true` if `entity` is valid and carries a `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.is_valid(entity)
            && self
                .components
                .has_component(entity.index() as usize, component_type_id::<T>())
    }

    /// The component types `entity` currently carries.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[track_caller]
    #[must_use]
    pub fn component_type_list(&self, entity: Entity) -> &ComponentTypeList {
        let slot = self.slot(entity);
        self.components.component_type_list(slot)
    }

    // =========================================================================
    // Systems
    // =========================================================================

    fn system_index<S: System>(&self) -> Option<usize> {
        let type_id = TypeId::of::<S>();
        self.systems.iter().position(|slot| slot.type_id == type_id)
    }

    /// Registers `system` and immediately fills it with every activated
    /// entity that passes its filter, in slot order.
    ///
    /// # Errors
    ///
    /// [`EcsError::SystemAlreadyRegistered`] if a system of type `S` is
    /// already registered; `system` is dropped.
    pub fn add_system<S: System>(&mut self, system: S) -> EcsResult<()> {
        if self.has_system::<S>() {
            return Err(EcsError::SystemAlreadyRegistered {
                name: type_name::<S>(),
            });
        }

        let mut slot = SystemSlot::new(system);
        if slot.base.filter().is_contradictory() {
            tracing::warn!(system = slot.name, "filter both requires and excludes a component");
        }

        for (index, &active) in self.activated.iter().enumerate() {
            if !active {
                continue;
            }
            let Some(id) = u32::try_from(index).ok().and_then(|i| self.pool.id_at(i)) else {
                continue;
            };
            if slot.base.filter().passes(self.components.component_type_list(index)) {
                slot.admit(Entity::new(id, self.id));
            }
        }

        tracing::debug!(
            system = slot.name,
            members = slot.base.entities().len(),
            "system registered"
        );
        self.systems.push(slot);
        Ok(())
    }

    /// Unregisters and returns the system of type `S`.
    ///
    /// Its member list is discarded without notifications.
    pub fn remove_system<S: System>(&mut self) -> Option<S> {
        let index = self.system_index::<S>()?;
        let slot = self.systems.remove(index);
        tracing::debug!(system = slot.name, "system removed");
        slot.system.into_any().downcast::<S>().ok().map(|boxed| *boxed)
    }

    /// Returns `true` if a system of type `S` is registered.
    #[must_use]
    pub fn has_system<S: System>(&self) -> bool {
        self.system_index::<S>().is_some()
    }

    /// Unregisters every system.
    pub fn remove_all_systems(&mut self) {
        tracing::debug!(count = self.systems.len(), "removing all systems");
        self.systems.clear();
    }

    /// Number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Borrows the registered system of type `S`.
    #[must_use]
    pub fn system<S: System>(&self) -> Option<&S> {
        let index = self.system_index::<S>()?;
        self.systems[index].system.as_any().downcast_ref::<S>()
    }

    /// Mutably borrows the registered system of type `S`.
    #[must_use]
    pub fn system_mut<S: System>(&mut self) -> Option<&mut S> {
        let index = self.system_index::<S>()?;
        self.systems[index].system.as_any_mut().downcast_mut::<S>()
    }

    /// The members of system `S` as of the last refresh.
    #[must_use]
    pub fn system_entities<S: System>(&self) -> Option<&[Entity]> {
        let index = self.system_index::<S>()?;
        Some(self.systems[index].base.entities())
    }

    /// The filter and members of system `S`.
    #[must_use]
    pub fn system_base<S: System>(&self) -> Option<&SystemBase> {
        let index = self.system_index::<S>()?;
        Some(&self.systems[index].base)
    }

    /// Runs `f` with the system of type `S` and a [`SystemContext`] over
    /// its members. Returns `None` if no such system is registered.
    pub fn run_system<S, R>(&mut self, f: impl FnOnce(&mut S, SystemContext<'_>) -> R) -> Option<R>
    where
        S: System,
    {
        let index = self.system_index::<S>()?;
        let SystemSlot { base, system, .. } = &mut self.systems[index];
        let system = system.as_any_mut().downcast_mut::<S>()?;
        let ctx = SystemContext::new(
            base.entities(),
            self.id,
            &self.pool,
            &mut self.components,
            &self.activated,
            &mut self.pending,
        );
        Some(f(system, ctx))
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Commits every queued activation, deactivation and kill, in that
    /// order, and updates system membership accordingly.
    ///
    /// Requests for handles that became invalid earlier in the same
    /// refresh (for example a second kill of one entity) are skipped.
    pub fn refresh(&mut self) -> RefreshStats {
        let mut stats = RefreshStats::default();
        if self.pending.is_empty() {
            return stats;
        }

        let to_activate = std::mem::take(&mut self.pending.to_activate);
        let changed = std::mem::take(&mut self.pending.changed);
        let to_deactivate = std::mem::take(&mut self.pending.to_deactivate);
        let to_kill = std::mem::take(&mut self.pending.to_kill);

        // Phase 1: activations.
        for &entity in &to_activate {
            if !self.is_valid(entity) {
                continue;
            }
            let slot = entity.index() as usize;
            if !self.activated[slot] {
                self.activated[slot] = true;
                stats.activated += 1;
            }
            self.refilter(entity);
        }

        // Phase 2: deactivations.
        for &entity in &to_deactivate {
            if !self.is_valid(entity) {
                continue;
            }
            let slot = entity.index() as usize;
            if self.activated[slot] {
                self.activated[slot] = false;
                stats.deactivated += 1;
            }
            self.evict_everywhere(entity);
        }

        // Phase 3: kills.
        for &entity in &to_kill {
            if !self.is_valid(entity) {
                continue;
            }
            let slot = entity.index() as usize;
            self.activated[slot] = false;
            self.evict_everywhere(entity);
            self.components.remove_all_components(slot);
            self.pool.remove(entity.id());
            stats.killed += 1;
        }

        // Component changes, for entities that are still activated.
        for &entity in &changed {
            if self.is_activated(entity) {
                self.refilter(entity);
            }
        }

        for entity in changed {
            if let Some(flag) = self.pending.changed_flags.get_mut(entity.index() as usize) {
                *flag = false;
            }
        }

        // Hand the (now empty) buffers back to keep their capacity.
        self.pending.to_activate = recycle(to_activate);
        self.pending.to_deactivate = recycle(to_deactivate);
        self.pending.to_kill = recycle(to_kill);

        tracing::debug!(
            world = self.id.get(),
            activated = stats.activated,
            deactivated = stats.deactivated,
            killed = stats.killed,
            "world refreshed"
        );
        stats
    }

    /// Re-evaluates every system's filter for an activated entity.
    fn refilter(&mut self, entity: Entity) {
        let types = self.components.component_type_list(entity.index() as usize);
        for slot in &mut self.systems {
            if slot.base.filter().passes(types) {
                slot.admit(entity);
            } else {
                slot.evict(entity);
            }
        }
    }

    fn evict_everywhere(&mut self, entity: Entity) {
        for slot in &mut self.systems {
            slot.evict(entity);
        }
    }

    /// Kills every entity immediately, unregisters every system and drops
    /// all queued requests.
    ///
    /// Systems are notified of each member's removal before they are
    /// unregistered. Every outstanding handle becomes invalid.
    pub fn clear(&mut self) {
        for slot in &mut self.systems {
            let members = slot.base.entities().to_vec();
            for entity in members {
                slot.evict(entity);
            }
            slot.base.clear();
        }
        self.systems.clear();
        self.components.clear();
        self.pool.clear();
        self.activated.iter_mut().for_each(|active| *active = false);
        self.pending.clear();
        tracing::debug!(world = self.id.get(), "world cleared");
    }
}

fn recycle(mut buffer: Vec<Entity>) -> Vec<Entity> {
    buffer.clear();
    buffer
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("id", &self.id)
            .field("entities", &self.pool.len())
            .field("entity_rows", &self.components.entity_capacity())
            .field("systems", &self.systems.iter().map(|s| s.name).collect::<Vec<_>>())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// An entity handle bundled with mutable access to its world.
///
/// Obtained from [`World::entity`]. Methods mirror the per-entity
/// operations of [`World`] and chain where they return `&mut Self`.
///
/// ```rust
/// use keystone_core::{Component, World};
///
/// struct Name(&'static str);
/// impl Component for Name {}
///
/// let mut world = World::new();
/// let e = world.create_entity();
/// world.entity(e).add_component(Name("crate")).activate();
/// world.refresh();
/// assert!(world.is_activated(e));
/// ```
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl EntityMut<'_> {
    /// The wrapped handle.
    #[must_use]
    pub fn id(&self) -> Entity {
        self.entity
    }

    /// See [`World::is_valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.world.is_valid(self.entity)
    }

    /// See [`World::is_activated`].
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.world.is_activated(self.entity)
    }

    /// See [`World::activate`].
    #[track_caller]
    pub fn activate(&mut self) -> &mut Self {
        self.world.activate(self.entity);
        self
    }

    /// See [`World::deactivate`].
    #[track_caller]
    pub fn deactivate(&mut self) -> &mut Self {
        self.world.deactivate(self.entity);
        self
    }

    /// See [`World::kill`].
    #[track_caller]
    pub fn kill(&mut self) {
        self.world.kill(self.entity);
    }

    /// See [`World::add_component`].
    #[track_caller]
    pub fn add_component<T: Component>(&mut self, component: T) -> &mut Self {
        self.world.add_component(self.entity, component);
        self
    }

    /// See [`World::try_add_component`].
    ///
    /// # Errors
    ///
    /// Same as [`World::try_add_component`].
    pub fn try_add_component<T: Component>(&mut self, component: T) -> EcsResult<&mut Self> {
        self.world.try_add_component(self.entity, component)?;
        Ok(self)
    }

    /// See [`World::remove_component`].
    #[track_caller]
    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        self.world.remove_component::<T>(self.entity)
    }

    /// See [`World::remove_all_components`].
    #[track_caller]
    pub fn remove_all_components(&mut self) -> &mut Self {
        self.world.remove_all_components(self.entity);
        self
    }

    /// See [`World::get_component`].
    #[track_caller]
    #[must_use]
    pub fn get<T: Component>(&self) -> &T {
        self.world.get_component::<T>(self.entity)
    }

    /// See [`World::get_component_mut`].
    #[track_caller]
    #[must_use]
    pub fn get_mut<T: Component>(&mut self) -> &mut T {
        self.world.get_component_mut::<T>(self.entity)
    }

    /// See [`World::has_component`].
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.world.has_component::<T>(self.entity)
    }

    /// See [`World::component_type_list`].
    #[track_caller]
    #[must_use]
    pub fn component_type_list(&self) -> &ComponentTypeList {
        self.world.component_type_list(self.entity)
    }
}

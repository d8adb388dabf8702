//! # Component Storage
//!
//! Entity-major sparse table of owned component instances:
//!
//! ```text
//! row 0: [Some(Position), None,           Some(Player)]  types {0, 2}
//! row 1: [Some(Position), Some(Velocity)]                types {0, 1}
//! row 2: []                                              types {}
//! ```
//!
//! Rows are indexed by entity slot, columns by [`ComponentTypeId`]. A row
//! only grows as wide as the highest type id ever stored in it.
//!
//! Invariant: bit `i` of a row's [`ComponentTypeList`] is set iff column
//! `i` of that row holds an instance.

use std::any::Any;

use super::component::ComponentTypeId;
use super::type_list::ComponentTypeList;

/// Components of one entity slot.
#[derive(Default)]
struct EntityRow {
    slots: Vec<Option<Box<dyn Any + Send>>>,
    types: ComponentTypeList,
}

/// Owns every component instance of a world.
#[derive(Default)]
pub struct ComponentStorage {
    rows: Vec<EntityRow>,
    /// Column slots reserved when a row is first created.
    row_capacity: usize,
}

static EMPTY: ComponentTypeList = ComponentTypeList::new();

impl ComponentStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with `entities` rows reserved, each reserving
    /// `components` columns once it is first written.
    #[must_use]
    pub fn with_capacity(entities: usize, components: usize) -> Self {
        Self {
            rows: Vec::with_capacity(entities),
            row_capacity: components,
        }
    }

    /// Makes sure a row exists for `index`.
    pub fn ensure_entity(&mut self, index: usize) {
        if index >= self.rows.len() {
            self.rows.resize_with(index + 1, EntityRow::default);
        }
    }

    fn row_mut(&mut self, index: usize) -> &mut EntityRow {
        self.ensure_entity(index);
        &mut self.rows[index]
    }

    /// Stores `component` in column `type_id` of row `index`.
    ///
    /// If the column is already occupied the existing instance is kept,
    /// `component` is dropped, and `false` is returned.
    pub fn add_component(
        &mut self,
        index: usize,
        type_id: ComponentTypeId,
        component: Box<dyn Any + Send>,
    ) -> bool {
        let reserve = self.row_capacity;
        let row = self.row_mut(index);
        let column = type_id.index();
        if column >= row.slots.len() {
            if row.slots.is_empty() {
                row.slots.reserve(reserve.max(column + 1));
            }
            row.slots.resize_with(column + 1, || None);
        }

        let slot = &mut row.slots[column];
        if slot.is_some() {
            return false;
        }
        *slot = Some(component);
        row.types.insert(type_id);
        true
    }

    /// Takes the instance out of column `type_id` of row `index`.
    ///
    /// Removing an absent component is a no-op returning `None`.
    pub fn remove_component(
        &mut self,
        index: usize,
        type_id: ComponentTypeId,
    ) -> Option<Box<dyn Any + Send>> {
        let row = self.rows.get_mut(index)?;
        let removed = row.slots.get_mut(type_id.index())?.take();
        if removed.is_some() {
            row.types.remove(type_id);
        }
        removed
    }

    /// Drops every instance in row `index`.
    pub fn remove_all_components(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.slots.clear();
            row.types.clear();
        }
    }

    /// Returns `true` if column `type_id` of row `index` is occupied.
    #[inline]
    #[must_use]
    pub fn has_component(&self, index: usize, type_id: ComponentTypeId) -> bool {
        self.component_type_list(index).contains(type_id)
    }

    /// Returns the instance at `(index, type_id)` downcast to `T`.
    #[must_use]
    pub fn get<T: 'static>(&self, index: usize, type_id: ComponentTypeId) -> Option<&T> {
        self.rows
            .get(index)?
            .slots
            .get(type_id.index())?
            .as_deref()?
            .downcast_ref::<T>()
    }

    /// Mutable version of [`ComponentStorage::get`].
    #[must_use]
    pub fn get_mut<T: 'static>(
        &mut self,
        index: usize,
        type_id: ComponentTypeId,
    ) -> Option<&mut T> {
        self.rows
            .get_mut(index)?
            .slots
            .get_mut(type_id.index())?
            .as_deref_mut()?
            .downcast_mut::<T>()
    }

    /// Types stored in row `index`. Rows never written read as empty.
    #[inline]
    #[must_use]
    pub fn component_type_list(&self, index: usize) -> &ComponentTypeList {
        self.rows.get(index).map_or(&EMPTY, |row| &row.types)
    }

    /// Number of instances in row `index`.
    #[must_use]
    pub fn component_count(&self, index: usize) -> usize {
        self.component_type_list(index).len()
    }

    /// Iterates over the type-erased instances of row `index`.
    pub fn components(
        &self,
        index: usize,
    ) -> impl Iterator<Item = (ComponentTypeId, &(dyn Any + Send))> + '_ {
        let slots: &[Option<Box<dyn Any + Send>>] =
            self.rows.get(index).map_or(&[][..], |row| row.slots.as_slice());
        slots.iter().enumerate().filter_map(|(column, slot)| {
            let raw = u32::try_from(column).ok()?;
            slot.as_deref().map(|c| (ComponentTypeId::from_raw(raw), c))
        })
    }

    /// Number of rows allocated.
    #[must_use]
    pub fn entity_capacity(&self) -> usize {
        self.rows.len()
    }

    /// Drops every instance in every row.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.slots.clear();
            row.types.clear();
        }
    }
}

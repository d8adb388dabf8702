//! # Filters
//!
//! A [`Filter`] decides whether an entity belongs to a system by looking
//! only at its [`ComponentTypeList`]. It holds three sets:
//!
//! - `requires`: every one of these must be present
//! - `requires_one_of`: if non-empty, at least one must be present
//! - `excludes`: none of these may be present
//!
//! A type that is both required and excluded makes the filter
//! contradictory. That is a caller error; the result of evaluating such a
//! filter is unspecified. [`Filter::is_contradictory`] detects it.
//!
//! ## Example
//!
//! ```rust
//! use keystone_core::{Component, ComponentTypeList, Filter};
//!
//! struct Player;
//! impl Component for Player {}
//! struct Npc;
//! impl Component for Npc {}
//!
//! let filter = Filter::new().requires::<Player>().excludes::<Npc>();
//! assert!(filter.passes(&ComponentTypeList::of::<Player>()));
//! assert!(!filter.passes(&ComponentTypeList::of::<Npc>()));
//! ```

use super::component::{component_type_id, Component};
use super::type_list::ComponentTypeList;

/// A set of component types named at compile time.
///
/// Implemented for every [`Component`] and for tuples of up to eight
/// components, so `Filter::new().requires::<(Position, Velocity)>()` works.
pub trait ComponentSet {
    /// Adds the ids of every type in the set to `list`.
    fn collect_into(list: &mut ComponentTypeList);

    /// Returns the ids of every type in the set.
    #[must_use]
    fn type_list() -> ComponentTypeList {
        let mut list = ComponentTypeList::new();
        Self::collect_into(&mut list);
        list
    }
}

impl<C: Component> ComponentSet for C {
    fn collect_into(list: &mut ComponentTypeList) {
        list.insert(component_type_id::<C>());
    }
}

impl ComponentSet for () {
    fn collect_into(_list: &mut ComponentTypeList) {}
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn collect_into(list: &mut ComponentTypeList) {
                $(list.insert(component_type_id::<$name>());)+
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

/// Require / require-one-of / exclude predicate over component types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    requires: ComponentTypeList,
    requires_one_of: ComponentTypeList,
    excludes: ComponentTypeList,
}

impl Filter {
    /// Creates a filter that every entity passes.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requires: ComponentTypeList::new(),
            requires_one_of: ComponentTypeList::new(),
            excludes: ComponentTypeList::new(),
        }
    }

    /// Alias for [`Filter::new`], reads better at system definitions.
    #[inline]
    #[must_use]
    pub const fn all() -> Self {
        Self::new()
    }

    /// Builds a filter from explicit type lists.
    #[must_use]
    pub fn from_lists(
        requires: ComponentTypeList,
        requires_one_of: ComponentTypeList,
        excludes: ComponentTypeList,
    ) -> Self {
        Self {
            requires,
            requires_one_of,
            excludes,
        }
    }

    /// Adds every type of `S` to the required set.
    #[must_use]
    pub fn requires<S: ComponentSet>(mut self) -> Self {
        S::collect_into(&mut self.requires);
        self
    }

    /// Adds every type of `S` to the require-one-of set.
    #[must_use]
    pub fn requires_one_of<S: ComponentSet>(mut self) -> Self {
        S::collect_into(&mut self.requires_one_of);
        self
    }

    /// Adds every type of `S` to the excluded set.
    #[must_use]
    pub fn excludes<S: ComponentSet>(mut self) -> Self {
        S::collect_into(&mut self.excludes);
        self
    }

    /// Types that must all be present.
    #[must_use]
    pub fn required(&self) -> &ComponentTypeList {
        &self.requires
    }

    /// Types of which at least one must be present (ignored when empty).
    #[must_use]
    pub fn required_one_of(&self) -> &ComponentTypeList {
        &self.requires_one_of
    }

    /// Types that must all be absent.
    #[must_use]
    pub fn excluded(&self) -> &ComponentTypeList {
        &self.excludes
    }

    /// Returns `true` if some type is both required and excluded.
    #[must_use]
    pub fn is_contradictory(&self) -> bool {
        self.requires.intersects(&self.excludes)
    }

    /// Evaluates the filter against an entity's component types.
    #[must_use]
    pub fn passes(&self, types: &ComponentTypeList) -> bool {
        if !types.contains_all(&self.requires) {
            return false;
        }
        if !self.requires_one_of.is_empty() && !types.intersects(&self.requires_one_of) {
            return false;
        }
        !types.intersects(&self.excludes)
    }
}

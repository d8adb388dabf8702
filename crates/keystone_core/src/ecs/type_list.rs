//! # Component Type Lists
//!
//! A growable bitset recording which component types an entity carries.
//! Bit `i` set means "has a component whose [`ComponentTypeId`] index is
//! `i`". The same type is used for filter sets.
//!
//! Storage is 64 ids per `u64` word. Words are appended on demand when a
//! higher id is inserted; missing trailing words read as zero, so two
//! lists holding the same ids compare equal regardless of how many words
//! each one happens to have allocated.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::component::{component_type_id, Component, ComponentTypeId};

const WORD_BITS: usize = 64;

/// Set of component type ids.
#[derive(Clone, Default)]
pub struct ComponentTypeList {
    /// 64 ids per word, lowest id in the lowest bit of word 0.
    words: Vec<u64>,
}

impl ComponentTypeList {
    /// Creates an empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Creates an empty list with room for ids below `bits` without growing.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
        }
    }

    /// Creates a list holding the id of `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        let mut list = Self::new();
        list.insert(component_type_id::<T>());
        list
    }

    #[inline]
    const fn split(id: ComponentTypeId) -> (usize, u64) {
        let index = id.index();
        (index / WORD_BITS, 1u64 << (index % WORD_BITS))
    }

    /// Adds `id`, growing the word array if needed.
    #[inline]
    pub fn insert(&mut self, id: ComponentTypeId) {
        let (word, mask) = Self::split(id);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= mask;
    }

    /// Removes `id`. Removing an absent id is a no-op.
    #[inline]
    pub fn remove(&mut self, id: ComponentTypeId) {
        let (word, mask) = Self::split(id);
        if let Some(bits) = self.words.get_mut(word) {
            *bits &= !mask;
        }
    }

    /// Returns `true` if `id` is in the list.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ComponentTypeId) -> bool {
        let (word, mask) = Self::split(id);
        self.words.get(word).is_some_and(|bits| bits & mask != 0)
    }

    /// Removes every id. Keeps the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|bits| *bits = 0);
    }

    /// Returns `true` if no id is set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&bits| bits == 0)
    }

    /// Number of ids in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|bits| bits.count_ones() as usize).sum()
    }

    /// Returns `true` if every id in `other` is also in `self`.
    ///
    /// Stops at the first word of `other` with a bit missing from `self`.
    #[must_use]
    pub fn contains_all(&self, other: &Self) -> bool {
        other.words.iter().enumerate().all(|(i, &required)| {
            let have = self.words.get(i).copied().unwrap_or(0);
            required & !have == 0
        })
    }

    /// Returns `true` if the two lists share at least one id.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(&a, &b)| a & b != 0)
    }

    /// Iterates over the ids in ascending order.
    #[must_use]
    pub fn iter(&self) -> TypeListIter<'_> {
        TypeListIter {
            words: &self.words,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Words up to and including the last non-zero one.
    fn significant(&self) -> &[u64] {
        let len = self
            .words
            .iter()
            .rposition(|&bits| bits != 0)
            .map_or(0, |last| last + 1);
        &self.words[..len]
    }
}

impl PartialEq for ComponentTypeList {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for ComponentTypeList {}

impl Hash for ComponentTypeList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl fmt::Debug for ComponentTypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(ComponentTypeId::index)).finish()
    }
}

impl FromIterator<ComponentTypeId> for ComponentTypeList {
    fn from_iter<I: IntoIterator<Item = ComponentTypeId>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl Extend<ComponentTypeId> for ComponentTypeList {
    fn extend<I: IntoIterator<Item = ComponentTypeId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl<'a> IntoIterator for &'a ComponentTypeList {
    type Item = ComponentTypeId;
    type IntoIter = TypeListIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the ids of a [`ComponentTypeList`].
pub struct TypeListIter<'a> {
    words: &'a [u64],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for TypeListIter<'_> {
    type Item = ComponentTypeId;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit = self.current_word.trailing_zeros() as usize;
                // Clear lowest set bit
                self.current_word &= self.current_word - 1;
                let raw = self.word_idx * WORD_BITS + bit;
                return u32::try_from(raw).ok().map(ComponentTypeId::from_raw);
            }
            self.word_idx += 1;
            self.current_word = *self.words.get(self.word_idx)?;
        }
    }
}

//! Arena storage for shared scene resources.
//!
//! Meshes and materials live in a [`Registry`] and objects refer to them with
//! copyable [`Handle`]s instead of owning them. Replacing an entry keeps its
//! handle valid, which is how a regenerated terrain mesh takes the place of
//! the old one without touching the objects that draw it.

use std::{fmt, hash::Hash, marker::PhantomData};

/// Index of a value of type `T` inside a [`Registry<T>`].
pub struct Handle<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

// Manual impls so `T` itself needs none of these traits.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Handle<T> {}
impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl<T> Eq for Handle<T> {}
impl<T> Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.index).finish()
    }
}

#[derive(Debug)]
pub struct Registry<T> {
    entries: Vec<Option<T>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> Handle<T> {
        self.entries.push(Some(value));
        Handle::new(self.entries.len() - 1)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.entries.get(handle.index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.entries.get_mut(handle.index).and_then(Option::as_mut)
    }

    /// Swap in `value` under an existing handle and hand back the old value.
    ///
    /// The old value is returned rather than dropped so the caller decides
    /// when its resources go away.
    pub fn replace(&mut self, handle: Handle<T>, value: T) -> Option<T> {
        self.entries
            .get_mut(handle.index)
            .and_then(|slot| slot.replace(value))
    }

    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        self.entries.get_mut(handle.index).and_then(Option::take)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| entry.as_ref().map(|value| (Handle::new(idx), value)))
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

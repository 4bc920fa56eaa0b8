//! Insertion-ordered collections addressed by a stable key.
//!
//! Every relationship list in the state (chats, events, comments, hangout
//! requests) is identified by a natural key: a chat id, an event id, a
//! counterpart email. [`KeyedVec`] keeps the wire order of those lists while
//! answering membership and lookup queries through a key index instead of a
//! linear scan.
//!
//! On the wire a `KeyedVec<T>` is a plain JSON array of `T`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Types addressable by a stable key inside a [`KeyedVec`].
pub trait Keyed {
    /// Key type. Must be cheap to clone; it is stored in the index.
    type Key: Clone + Eq + Hash + fmt::Debug;

    /// Returns the key identifying this value.
    fn key(&self) -> &Self::Key;
}

/// An insertion-ordered list with unique keys and O(1) key lookup.
///
/// Duplicate keys are never stored: [`KeyedVec::insert_unique`] refuses them
/// and building from a `Vec` keeps the first occurrence.
///
/// # Example
///
/// ```rust
/// use hangouts::domain::{Chat, ChatId, KeyedVec};
///
/// let mut chats: KeyedVec<Chat> = KeyedVec::new();
/// assert!(chats.insert_unique(Chat::new(ChatId(3), vec![])));
/// assert!(!chats.insert_unique(Chat::new(ChatId(3), vec![])));
/// assert_eq!(chats.len(), 1);
/// ```
#[derive(Clone)]
pub struct KeyedVec<T: Keyed> {
    items: Vec<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> KeyedVec<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Values in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` if a value with `key` is stored.
    #[must_use]
    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.index.get(key).and_then(|&pos| self.items.get(pos))
    }

    /// Appends `value` unless its key is already present.
    ///
    /// Returns `true` if the value was appended.
    pub fn insert_unique(&mut self, value: T) -> bool {
        if self.index.contains_key(value.key()) {
            return false;
        }
        self.index.insert(value.key().clone(), self.items.len());
        self.items.push(value);
        true
    }

    /// Replaces the value with the same key in place, or appends it.
    ///
    /// Returns the previous value if one was replaced.
    pub fn upsert(&mut self, value: T) -> Option<T> {
        if let Some(pos) = self.index.get(value.key()).copied() {
            return Some(std::mem::replace(&mut self.items[pos], value));
        }
        self.insert_unique(value);
        None
    }

    /// Replaces the value sharing `value`'s key, keeping its position.
    ///
    /// Returns the previous value, or gives `value` back when no value with
    /// that key exists.
    pub fn replace(&mut self, value: T) -> std::result::Result<T, T> {
        match self.index.get(value.key()).copied() {
            Some(pos) => Ok(std::mem::replace(&mut self.items[pos], value)),
            None => Err(value),
        }
    }

    /// Applies `f` to the value stored under `key`.
    ///
    /// Returns `false` if no such value exists. If `f` changes the key the
    /// index is rebuilt; a change that collides with another key drops the
    /// later duplicate.
    pub fn update_with(&mut self, key: &T::Key, f: impl FnOnce(&mut T)) -> bool {
        let Some(pos) = self.index.get(key).copied() else {
            return false;
        };
        f(&mut self.items[pos]);
        if self.items[pos].key() != key {
            let items = std::mem::take(&mut self.items);
            *self = Self::from(items);
        }
        true
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let pos = self.index.remove(key)?;
        let removed = self.items.remove(pos);
        for item in &self.items[pos..] {
            if let Some(slot) = self.index.get_mut(item.key()) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Keeps only the values for which `keep` returns `true`.
    ///
    /// Returns the number of values removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| keep(item));
        if self.items.len() != before {
            self.reindex();
        }
        before - self.items.len()
    }

    /// Consumes the collection, returning the values in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.key().clone(), pos))
            .collect();
    }
}

impl<T: Keyed> Default for KeyedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> From<Vec<T>> for KeyedVec<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Keyed> FromIterator<T> for KeyedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for value in iter {
            if !collection.insert_unique(value) {
                tracing::trace!("dropping duplicate key while building keyed collection");
            }
        }
        collection
    }
}

impl<'a, T: Keyed> IntoIterator for &'a KeyedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Keyed + PartialEq> PartialEq for KeyedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed + Eq> Eq for KeyedVec<T> {}

impl<T: Keyed + fmt::Debug> fmt::Debug for KeyedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<T: Keyed + Serialize> Serialize for KeyedVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for KeyedVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        id: u32,
        label: &'static str,
    }

    impl Keyed for Item {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.id
        }
    }

    fn item(id: u32, label: &'static str) -> Item {
        Item { id, label }
    }

    #[test]
    fn remove_keeps_order_and_index() {
        let mut items: KeyedVec<Item> =
            vec![item(1, "a"), item(2, "b"), item(3, "c")].into();

        assert_eq!(items.remove(&2), Some(item(2, "b")));
        assert_eq!(items.get(&3), Some(&item(3, "c")));
        assert_eq!(items.as_slice(), &[item(1, "a"), item(3, "c")]);
        assert_eq!(items.remove(&2), None);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let items: KeyedVec<Item> = vec![item(1, "first"), item(1, "second")].into();
        assert_eq!(items.len(), 1);
        assert_eq!(items.get(&1).map(|i| i.label), Some("first"));
    }

    #[test]
    fn replace_reports_missing_key() {
        let mut items: KeyedVec<Item> = vec![item(1, "a")].into();
        assert_eq!(items.replace(item(1, "z")), Ok(item(1, "a")));
        assert_eq!(items.replace(item(9, "x")), Err(item(9, "x")));
        assert_eq!(items.get(&1).map(|i| i.label), Some("z"));
    }

    #[test]
    fn upsert_replaces_in_place_or_appends() {
        let mut items: KeyedVec<Item> = vec![item(1, "a"), item(2, "b")].into();
        assert_eq!(items.upsert(item(1, "z")), Some(item(1, "a")));
        assert_eq!(items.upsert(item(3, "c")), None);
        assert_eq!(items.as_slice(), &[item(1, "z"), item(2, "b"), item(3, "c")]);
    }

    #[test]
    fn retain_reindexes() {
        let mut items: KeyedVec<Item> =
            vec![item(1, "a"), item(2, "b"), item(3, "c")].into();
        assert_eq!(items.retain(|i| i.id != 1), 1);
        assert_eq!(items.get(&3), Some(&item(3, "c")));
        assert!(!items.contains_key(&1));
    }

    #[test]
    fn update_with_rekeys_when_key_changes() {
        let mut items: KeyedVec<Item> = vec![item(1, "a"), item(2, "b")].into();
        assert!(items.update_with(&1, |i| i.id = 7));
        assert!(items.contains_key(&7));
        assert!(!items.contains_key(&1));
        assert!(!items.update_with(&1, |i| i.label = "nope"));
    }
}

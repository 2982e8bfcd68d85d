//! Vector, map and set collections.
//!
//! All three keep their elements in insertion order and carry optional
//! metadata, which does not take part in equality.

use std::fmt;
use std::iter::FromIterator;
use std::ops;
use std::slice;
use std::vec;

use crate::{Form, Metadata};

/// An ordered sequence of forms, written as `[...]`.
#[derive(Clone, Default)]
pub struct Vector {
    items: Vec<Form>,
    meta: Option<Box<Map>>,
}

/// A mapping from keys to values, written as `{k v ...}`.
///
/// Keys are compared by structural equality; there is no hashing. Inserting
/// a key that is already present replaces its value in place, so a literal
/// with duplicate keys collapses to one entry holding the last value.
///
/// ```
/// # use rouge_reader::{Form, Map};
/// let mut map = Map::new();
/// map.insert(Form::keyword("a"), 1);
/// map.insert(Form::keyword("b"), 2);
/// map.insert(Form::keyword("a"), 3);
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&Form::keyword("a")), Some(&Form::from(3)));
/// ```
#[derive(Clone, Default)]
pub struct Map {
    entries: Vec<(Form, Form)>,
    meta: Option<Box<Map>>,
}

/// A deduplicated collection of forms, written as `#{...}`.
#[derive(Clone, Default)]
pub struct Set {
    items: Vec<Form>,
    meta: Option<Box<Map>>,
}

macro_rules! impl_metadata {
    ($($ty:ty),*) => {
        $(
            impl Metadata for $ty {
                fn meta(&self) -> Option<&Map> {
                    self.meta.as_deref()
                }

                fn set_meta(&mut self, meta: Option<Map>) {
                    self.meta = meta.map(Box::new);
                }
            }
        )*
    };
}

impl_metadata!(Vector, Map, Set);

impl Vector {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Vector::default()
    }

    /// Appends an element.
    pub fn push(&mut self, item: impl Into<Form>) {
        self.items.push(item.into());
    }

    /// Returns the elements as a vector, dropping any metadata.
    pub fn into_vec(self) -> Vec<Form> {
        self.items
    }
}

impl ops::Deref for Vector {
    type Target = [Form];

    fn deref(&self) -> &[Form] {
        &self.items
    }
}

impl ops::DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut [Form] {
        &mut self.items
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Vector) -> bool {
        self.items == other.items
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Vector")?;
        f.debug_list().entries(&self.items).finish()
    }
}

impl<T: Into<Form>> From<Vec<T>> for Vector {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().map(Into::into).collect()
    }
}

impl FromIterator<Form> for Vector {
    fn from_iter<I: IntoIterator<Item = Form>>(iter: I) -> Self {
        Vector {
            items: iter.into_iter().collect(),
            meta: None,
        }
    }
}

impl IntoIterator for Vector {
    type Item = Form;
    type IntoIter = vec::IntoIter<Form>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Form;
    type IntoIter = slice::Iter<'a, Form>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self {
        Map::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry, returning the value previously stored under an
    /// equal key.
    pub fn insert(&mut self, key: impl Into<Form>, value: impl Into<Form>) -> Option<Form> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &Form) -> Option<&Form> {
        self.entries
            .iter()
            .find_map(|(k, v)| if k == key { Some(v) } else { None })
    }

    /// Returns true if an entry for `key` exists.
    pub fn contains_key(&self, key: &Form) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Form, &Form)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Form> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Form> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Map) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Map")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Form>, V: Into<Form>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<Form>, V: Into<Form>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl IntoIterator for Map {
    type Item = (Form, Form);
    type IntoIter = vec::IntoIter<(Form, Form)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Set {
    /// Creates an empty set.
    pub fn new() -> Self {
        Set::default()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `item` unless an equal element is present. Returns whether the
    /// element was added.
    pub fn insert(&mut self, item: impl Into<Form>) -> bool {
        let item = item.into();
        if self.contains(&item) {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    /// Membership test by structural equality.
    pub fn contains(&self, item: &Form) -> bool {
        self.items.contains(item)
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Form> {
        self.items.iter()
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Set) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Set")?;
        f.debug_set().entries(&self.items).finish()
    }
}

impl<T: Into<Form>> Extend<T> for Set {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Into<Form>> FromIterator<T> for Set {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for Set {
    type Item = Form;
    type IntoIter = vec::IntoIter<Form>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Form;
    type IntoIter = slice::Iter<'a, Form>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_eq_ignores_order() {
        let a: Map = vec![(Form::keyword("a"), 1), (Form::keyword("b"), 2)]
            .into_iter()
            .collect();
        let b: Map = vec![(Form::keyword("b"), 2), (Form::keyword("a"), 1)]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_dedup() {
        let set: Set = vec![1, 2, 1, 3, 2].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set, vec![3, 2, 1].into_iter().collect::<Set>());
    }
}

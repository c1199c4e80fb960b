//! Key ordered list of borrowed records.
use crate::{Key, Record};

/// Records sharing a single coordinate, or the accumulated matches of a range query.
///
/// Items are kept in ascending key order. The bucket only holds references, dropping it never
/// drops a record.
#[derive(Debug)]
pub struct Bucket<'a, R> {
    items: Vec<&'a R>,
}

impl<'a, R> Clone for Bucket<'a, R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<'a, R> Default for Bucket<'a, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R> Bucket<'a, R> {
    pub fn new() -> Self {
        // grows by doubling from here
        Self {
            items: Vec::with_capacity(1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a R> {
        self.items.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a R] {
        self.items.as_slice()
    }
}

impl<'a, R: Record> Bucket<'a, R> {
    /// Insert keeping the keys ascending. Equal keys keep their insertion order.
    ///
    /// Does not deduplicate, use [`Bucket::find`] first if that matters.
    pub fn insert_sorted(&mut self, record: &'a R) {
        let key = record.key();
        // scan from the tail, in-order inserts never move anything
        let index = self
            .items
            .iter()
            .rposition(|r| r.key() <= key)
            .map_or(0, |i| i + 1);
        self.items.insert(index, record);
    }

    /// Returns the record with the given key, if any
    pub fn find(&self, key: Key) -> Option<&'a R> {
        self.items
            .binary_search_by_key(&key, |r| r.key())
            .ok()
            .map(|i| self.items[i])
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.items.iter().map(|r| r.key())
    }
}

impl<'b, 'a, R> IntoIterator for &'b Bucket<'a, R> {
    type Item = &'a R;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}

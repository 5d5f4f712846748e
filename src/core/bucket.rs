//! # Bucket Store
//!
//! The places the user has saved, keyed by POI id, in the order they were
//! added. There is no remove.

use std::collections::HashSet;

use crate::core::catalog::{Poi, PoiId};

#[derive(Debug, Default)]
pub struct BucketStore {
    items: Vec<Poi>,
    ids: HashSet<PoiId>,
}

impl BucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `poi` unless one with the same id is already here.
    ///
    /// Returns `true` only when something was inserted. A repeated add is a
    /// silent no-op.
    pub fn add(&mut self, poi: Poi) -> bool {
        if !self.ids.insert(poi.id) {
            return false;
        }
        self.items.push(poi);
        true
    }

    pub fn contains(&self, id: PoiId) -> bool {
        self.ids.contains(&id)
    }

    /// Saved POIs in insertion order.
    pub fn list(&self) -> &[Poi] {
        &self.items
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::poi;

    #[test]
    fn test_new_bucket_is_empty() {
        let bucket = BucketStore::new();
        assert!(bucket.is_empty());
        assert_eq!(bucket.size(), 0);
    }

    #[test]
    fn test_add_inserts_once() {
        let mut bucket = BucketStore::new();
        assert!(bucket.add(poi(1)));
        assert!(!bucket.add(poi(1)));
        assert_eq!(bucket.size(), 1);
        assert!(bucket.contains(PoiId(1)));
        assert!(!bucket.contains(PoiId(2)));
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut bucket = BucketStore::new();
        bucket.add(poi(2));
        bucket.add(poi(1));
        bucket.add(poi(2));
        let ids: Vec<PoiId> = bucket.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PoiId(2), PoiId(1)]);
    }
}

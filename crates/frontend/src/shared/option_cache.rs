//! Per-parent cache of dropdown option lists.
//!
//! Keyed by the parent selection (`()` for root lists, a single id, or a
//! tuple of ids for composite parents). Only successful fetches are stored,
//! so a failed load is retried the next time the parent is selected.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct OptionCache<K, T> {
    entries: HashMap<K, Vec<T>>,
}

impl<K, T> Default for OptionCache<K, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, T> OptionCache<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: K, options: Vec<T>) {
        self.entries.insert(key, options);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_stored_list() {
        let mut cache: OptionCache<(i64, i64), &str> = OptionCache::new();
        assert!(cache.get(&(1, 2)).is_none());

        cache.insert((1, 2), vec!["bolt", "nut"]);
        assert_eq!(cache.get(&(1, 2)), Some(&["bolt", "nut"][..]));
        assert!(cache.get(&(2, 1)).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_empty_list_is_a_valid_entry() {
        let mut cache: OptionCache<i64, String> = OptionCache::new();
        cache.insert(7, Vec::new());
        assert!(cache.contains(&7));
        assert_eq!(cache.get(&7).map(<[String]>::len), Some(0));

        cache.clear();
        assert!(cache.is_empty());
    }
}

//! Bounded keyed store with recency-based eviction.
//!
//! A stop page left open for hours keeps looking things up: stop records,
//! route records, map tile bitmaps. Memoizing those lookups through this
//! cache bounds their memory no matter how long the page lives. When the
//! cache is full, the least-recently-touched entry is evicted.
//!
//! "Touched" is deliberately narrow: an entry is touched when it is
//! inserted, or when it is read with promotion requested. A plain read and
//! a membership check leave recency alone, so callers decide whether a
//! lookup means "this entry is still wanted" or is just a probe.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A keyed store holding at most `capacity` entries.
///
/// # Examples
///
/// ```
/// use stop_board::cache::BoundedCache;
///
/// // Tile-style composite keys work like any other.
/// let mut tiles: BoundedCache<(u8, u32, u32), Vec<u8>> = BoundedCache::new(2);
/// tiles.set((14, 8190, 5448), vec![1]);
/// tiles.set((14, 8191, 5448), vec![2]);
/// tiles.set((14, 8192, 5448), vec![3]);
///
/// assert_eq!(tiles.len(), 2);
/// assert!(!tiles.has(&(14, 8190, 5448)));
/// ```
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    /// Keys in recency order, oldest at the front.
    order: VecDeque<K>,
    entries: HashMap<K, V>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. A cache that can hold nothing is a
    /// programming error, not a runtime condition.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be at least 1");

        Self {
            capacity,
            order: VecDeque::with_capacity(capacity + 1),
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Look up a value.
    ///
    /// With `promote`, a hit moves the entry to the most-recent position;
    /// without it, the read leaves recency untouched.
    pub fn get(&mut self, key: &K, promote: bool) -> Option<&V> {
        if promote && self.entries.contains_key(key) {
            self.touch(key);
        }
        self.entries.get(key)
    }

    /// Insert or overwrite a value. Either way the entry becomes the most
    /// recent. If the insert pushes the cache over capacity, the
    /// least-recently-touched entry is evicted.
    pub fn set(&mut self, key: K, value: V) {
        if self.entries.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return;
        }

        self.order.push_back(key);
        if self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Membership check. Never affects recency.
    pub fn has(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Visit every entry, oldest-touched first.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for key in &self.order {
            if let Some(value) = self.entries.get(key) {
                f(key, value);
            }
        }
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Move `key` to the most-recent position.
    ///
    /// Linear scan of the recency order; capacities here are small (tens
    /// to low hundreds of entries).
    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_without_promotion() {
        let mut cache = BoundedCache::new(3);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);
        cache.set("d", 4);

        assert_eq!(cache.len(), 3);
        assert!(!cache.has(&"a"));
        assert!(cache.has(&"b"));
        assert!(cache.has(&"d"));
    }

    #[test]
    fn promotion_changes_eviction_victim() {
        // Capacity 2: set A, set B, promote A, set C -> B evicted.
        let mut cache = BoundedCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.get(&"a", true), Some(&1));
        cache.set("c", 3);

        assert!(cache.has(&"a"));
        assert!(!cache.has(&"b"));
        assert!(cache.has(&"c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn plain_get_does_not_promote() {
        let mut cache = BoundedCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert_eq!(cache.get(&"a", false), Some(&1));
        cache.set("c", 3);

        // "a" was only probed, so it is still the oldest.
        assert!(!cache.has(&"a"));
        assert!(cache.has(&"b"));
    }

    #[test]
    fn has_does_not_promote() {
        let mut cache = BoundedCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        assert!(cache.has(&"a"));
        cache.set("c", 3);

        assert!(!cache.has(&"a"));
    }

    #[test]
    fn overwrite_updates_value_and_becomes_newest() {
        let mut cache = BoundedCache::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);
        cache.set("c", 3);

        assert_eq!(cache.get(&"a", false), Some(&10));
        assert!(!cache.has(&"b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn missing_key_returns_none() {
        let mut cache: BoundedCache<&str, i32> = BoundedCache::new(2);
        assert_eq!(cache.get(&"a", true), None);
        assert!(!cache.has(&"a"));
    }

    #[test]
    fn for_each_visits_oldest_first() {
        let mut cache = BoundedCache::new(3);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);
        assert_eq!(cache.get(&"a", true), Some(&1));

        let mut seen = Vec::new();
        cache.for_each(|k, v| seen.push((*k, *v)));

        assert_eq!(seen, vec![("b", 2), ("c", 3), ("a", 1)]);
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn zero_capacity_rejected() {
        let _ = BoundedCache::<&str, i32>::new(0);
    }
}

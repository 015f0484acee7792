//! Capacity-bounded max-priority queue used for top-k selection.
//!
//! The heap keeps the `capacity` smallest keys pushed so far. Each push is
//! O(log k) and the structure never holds more than `capacity + 1` entries,
//! so selecting the k nearest of n candidates costs O(n log k) time and
//! O(k) space.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One retained training row for a single query.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborCandidate<L> {
    pub distance: f64,
    pub source_index: usize,
    pub label: L,
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    // Insertion order; among equal keys the latest insert is the maximum
    // and is evicted first.
    seq: usize,
    value: V,
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord, V> Eq for Entry<K, V> {}

#[derive(Debug)]
pub struct BoundedMaxHeap<K, V> {
    capacity: usize,
    heap: BinaryHeap<Entry<K, V>>,
    pushed: usize,
}

impl<K: Ord, V> BoundedMaxHeap<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
            pushed: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert a candidate. Returns the entry evicted to stay within
    /// capacity, which may be the candidate itself.
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        let seq = self.pushed;
        self.pushed += 1;
        self.heap.push(Entry { key, seq, value });
        if self.heap.len() > self.capacity {
            self.pop_max()
        } else {
            None
        }
    }

    pub fn peek_max(&self) -> Option<(&K, &V)> {
        self.heap.peek().map(|e| (&e.key, &e.value))
    }

    pub fn pop_max(&mut self) -> Option<(K, V)> {
        self.heap.pop().map(|e| (e.key, e.value))
    }

    /// Consume the heap, returning entries in ascending key order
    /// (insertion order among equal keys).
    pub fn into_sorted_vec(self) -> Vec<(K, V)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn keys_of(heap: BoundedMaxHeap<u32, usize>) -> Vec<u32> {
        heap.into_sorted_vec().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn keeps_the_k_smallest_keys() {
        let mut heap = BoundedMaxHeap::new(3);
        for (i, key) in [9u32, 4, 7, 1, 8, 2].into_iter().enumerate() {
            heap.push(key, i);
        }
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_max().map(|(k, _)| *k), Some(4));
        assert_eq!(keys_of(heap), vec![1, 2, 4]);
    }

    #[test]
    fn result_does_not_depend_on_insertion_order() {
        let mut keys: Vec<u32> = (0..50).map(|i| (i * 37) % 101).collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        expected.truncate(7);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            keys.shuffle(&mut rng);
            let mut heap = BoundedMaxHeap::new(7);
            for (i, &k) in keys.iter().enumerate() {
                heap.push(k, i);
            }
            assert_eq!(keys_of(heap), expected);
        }
    }

    #[test]
    fn fewer_candidates_than_capacity_keeps_all() {
        let mut heap = BoundedMaxHeap::new(10);
        heap.push(3u32, 0usize);
        heap.push(1, 1);
        assert_eq!(heap.len(), 2);
        assert_eq!(keys_of(heap), vec![1, 3]);
    }

    #[test]
    fn push_reports_the_evicted_entry() {
        let mut heap = BoundedMaxHeap::new(1);
        assert_eq!(heap.push(5u32, "a"), None);
        assert_eq!(heap.push(2, "b"), Some((5, "a")));
        assert_eq!(heap.push(9, "c"), Some((9, "c")));
        assert_eq!(heap.pop_max(), Some((2, "b")));
        assert!(heap.is_empty());
    }

    #[test]
    fn equal_keys_keep_earliest_inserts() {
        let mut heap = BoundedMaxHeap::new(2);
        heap.push(1u32, "first");
        heap.push(1, "second");
        heap.push(1, "third");
        let values: Vec<_> = heap.into_sorted_vec().into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["first", "second"]);
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let mut heap = BoundedMaxHeap::new(0);
        assert_eq!(heap.push(1u32, ()), Some((1, ())));
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), 0);
    }
}

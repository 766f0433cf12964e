use std::{cmp::Ordering, collections::BinaryHeap};

struct Entry<T> {
    priority: f64,
    sequence: u64,
    item: T,
}

// Min-heap by priority, then by push order (reversed from standard Rust BinaryHeap)
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/// Binary min-heap without decrease-key.
///
/// The same item may be pushed several times; stale copies stay in the heap
/// and callers must discard them on pop (lazy deletion). Equal priorities pop
/// in push order.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    sequence: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            sequence: 0,
        }
    }

    pub fn push(&mut self, item: T, priority: f64) {
        self.heap.push(Entry {
            priority,
            sequence: self.sequence,
            item,
        });
        self.sequence += 1;
    }

    /// Removes the entry with the lowest priority
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

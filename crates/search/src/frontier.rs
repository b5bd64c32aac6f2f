use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; earlier pushes win ties.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue of search node indices.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, priority: f64, node: usize) {
        self.heap.push(FrontierEntry {
            priority,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    /// Remove the lowest-priority entry, returning `(priority, node)`.
    pub fn pop(&mut self) -> Option<(f64, usize)> {
        self.heap.pop().map(|e| (e.priority, e.node))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_first() {
        let mut f = Frontier::new();
        f.push(5.0, 0);
        f.push(1.5, 1);
        f.push(3.0, 2);
        assert_eq!(f.pop(), Some((1.5, 1)));
        assert_eq!(f.pop(), Some((3.0, 2)));
        assert_eq!(f.pop(), Some((5.0, 0)));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn ties_follow_insertion_order() {
        let mut f = Frontier::new();
        for node in 0..5 {
            f.push(2.0, node);
        }
        let order: Vec<usize> = std::iter::from_fn(|| f.pop().map(|(_, n)| n)).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn clear_empties() {
        let mut f = Frontier::new();
        f.push(0.0, 0);
        f.push(1.0, 1);
        assert_eq!(f.len(), 2);
        f.clear();
        assert!(f.is_empty());
    }
}

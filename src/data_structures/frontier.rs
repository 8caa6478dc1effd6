use std::cmp::min;

use crate::cost::Cost;
use crate::graph::VertexId;
use crate::heap_primitives::min_index;

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_children::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_children::<HEAP_ARITY>(i)
}

/// The ranking tuple for the frontier.
///
/// We prefer lower priorities (`f = g + h`), and tie break on insertion
/// order so equal priorities come out first-in first-out.
///
/// ```
/// use graph_search::data_structures::frontier::FrontierRank;
///
/// assert!(FrontierRank::new(2, 9) < FrontierRank::new(3, 0));
/// assert!(FrontierRank::new(2, 0) < FrontierRank::new(2, 1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierRank {
    pub priority: Cost,
    seq: u64,
}

impl FrontierRank {
    pub fn new(priority: Cost, seq: u64) -> Self {
        Self { priority, seq }
    }
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A pending search state.
///
/// Several entries may exist for a single vertex. Only the one with the best
/// `g` matters, the rest are stale and get skipped when popped.
#[derive(Copy, Clone, Debug)]
pub struct FrontierEntry {
    pub rank: FrontierRank,
    pub vertex: VertexId,
    pub g: Cost,
    pub h: Cost,
    pub parent: Option<VertexId>,
}

impl FrontierEntry {
    #[inline(always)]
    pub fn priority(&self) -> Cost {
        self.rank.priority
    }
}

impl PartialEq for FrontierEntry {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for FrontierEntry {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Min-heap of [`FrontierEntry`] ordered by [`FrontierRank`].
///
/// There's no decrease-key. Improving a vertex pushes a new entry and leaves
/// the old one behind (lazy deletion).
#[derive(Debug, Default)]
pub struct Frontier {
    heap: Vec<FrontierEntry>,
    /// Insertion counter, feeds `FrontierRank::seq`.
    next_seq: u64,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.first()
    }

    pub fn push(
        &mut self,
        vertex: VertexId,
        g: Cost,
        h: Cost,
        parent: Option<VertexId>,
    ) -> FrontierRank {
        self.verify_heap();

        let rank = FrontierRank::new(g.saturating_add(h), self.next_seq);
        self.next_seq += 1;

        let heap_index = self.heap.len(); // Future heap_index
        self.heap.push(FrontierEntry {
            rank,
            vertex,
            g,
            h,
            parent,
        });
        self.sift_up(heap_index);

        self.verify_heap();
        rank
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.verify_heap();

        if self.heap.len() <= 1 {
            return self.heap.pop();
        }

        let entry = self.pop_non_trivial_heap();
        self.verify_heap();
        Some(entry)
    }

    /// The current entries, best first.
    ///
    /// Works on a copy, so the heap layout (and the order of later pops) is
    /// unaffected.
    pub fn snapshot(&self) -> Vec<FrontierEntry> {
        let mut entries = self.heap.clone();
        entries.sort_unstable();
        entries
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every entry goes after its parent, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Entry[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    /// Pops the top entry from a heap with at least 2 elements.
    ///
    /// Works by unfairly sifting down the top entry to the last level, where it
    /// can be swapped with the very last element of the array and popped.
    fn pop_non_trivial_heap(&mut self) -> FrontierEntry {
        debug_assert!(self.heap.len() >= 2, "Trivial heaps are popped directly");

        // 1. We pretend there's a hole at the root, and bubble elements up till the hole reaches the bottom.
        // 2. If the hole is not the last element, we swap it for the last one.
        // 3. Now the last element is the one that was at the top of the heap, we pop it.
        let len = self.heap.len();
        let last = len - 1;

        let mut hole = 0;
        let mut child = down_left(hole);
        while child < len {
            // Find the best child
            debug_assert_eq!(child + HEAP_ARITY, down_right(hole) + 1);
            child += min_index(&self.heap[child..min(child + HEAP_ARITY, len)]);

            self.heap.swap(hole, child);

            hole = child;
            child = down_left(hole);
        }
        // NOTE: The hole made it to the last level, but it may not be at the end of the array.
        debug_assert!(hole <= last, "The hole={hole} is past last={last}");
        if hole != last {
            self.heap.swap(hole, last);
            self.sift_up(hole);
        }

        match self.heap.pop() {
            Some(entry) => entry,
            None => unreachable!("Non-trivial heaps have at least 2 entries"),
        }
    }

    /// Raises an entry.
    /// Returns its new index.
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        debug_assert!(index < self.heap.len(), "Index out of bounds...");

        let mut pos = index;
        while pos != 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::graph::Graph;

    fn ids(n: usize) -> Vec<VertexId> {
        let mut g = Graph::new();
        (0..n)
            .map(|i| g.add_vertex(&format!("v{i}")).unwrap())
            .collect()
    }

    #[test]
    fn frontier_works() {
        let v = ids(1);
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());

        frontier.push(v[0], 3, 1, None);
        let e = frontier.pop().unwrap();
        assert_eq!((e.vertex, e.g, e.h, e.priority()), (v[0], 3, 1, 4));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn frontier_sorts() {
        let v = ids(6);
        let mut frontier = Frontier::new();
        for (i, p) in [4, 6, 7, 1, 5, 2].into_iter().enumerate() {
            frontier.push(v[i], p, 0, None);
        }

        let popped: Vec<Cost> = std::iter::from_fn(|| frontier.pop())
            .map(|e| e.priority())
            .collect();
        assert_eq!(popped, [1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let v = ids(12);
        let mut frontier = Frontier::new();
        // Different (g, h) splits of the same priority.
        for (i, id) in v.iter().enumerate() {
            let g = (i % 4) as Cost;
            frontier.push(*id, g, 5 - g, None);
        }

        let popped: Vec<VertexId> = std::iter::from_fn(|| frontier.pop())
            .map(|e| e.vertex)
            .collect();
        assert_eq!(popped, v);
    }

    #[test]
    fn snapshot_is_sorted_and_read_only() {
        let v = ids(5);
        let mut frontier = Frontier::new();
        for (i, p) in [3, 1, 3, 0, 2].into_iter().enumerate() {
            frontier.push(v[i], p, 0, None);
        }

        let snapshot: Vec<(VertexId, Cost)> = frontier
            .snapshot()
            .iter()
            .map(|e| (e.vertex, e.priority()))
            .collect();
        assert_eq!(
            snapshot,
            [(v[3], 0), (v[1], 1), (v[4], 2), (v[0], 3), (v[2], 3)]
        );
        assert_eq!(frontier.len(), 5);

        // Popping after a snapshot yields the very same order.
        let popped: Vec<(VertexId, Cost)> = std::iter::from_fn(|| frontier.pop())
            .map(|e| (e.vertex, e.priority()))
            .collect();
        assert_eq!(popped, snapshot);
    }

    #[test]
    fn random_pushes_pop_sorted() {
        let v = ids(1);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut frontier = Frontier::new();
        let mut expected = vec![];
        for _ in 0..500 {
            let g = rng.random_range(0..50);
            let rank = frontier.push(v[0], g, 0, None);
            expected.push(rank);

            // Interleave some pops.
            if rng.random_bool(0.2) {
                expected.sort();
                let first = expected.remove(0);
                assert_eq!(frontier.pop().map(|e| e.rank), Some(first));
            }
        }
        expected.sort();

        let popped: Vec<FrontierRank> = std::iter::from_fn(|| frontier.pop())
            .map(|e| e.rank)
            .collect();
        assert_eq!(popped, expected);
    }
}

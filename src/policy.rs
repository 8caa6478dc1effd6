//! Strategies plugged into [`crate::algorithms::best_first::BestFirstSearch`].
//!
//! - A [`Heuristic`] turns the engine into Dijkstra ([`NoHeuristic`]) or into
//!   A*/greedy best-first ([`VertexHeuristic`]).
//! - A [`Constraint`] caps the accumulated cost of the paths it explores
//!   ([`Unconstrained`], [`WireLimit`]).

use std::fmt::Debug;

use crate::cost::Cost;
use crate::cost::remaining;
use crate::graph::Graph;
use crate::graph::VertexId;

/// Estimated cost from a vertex to the target.
///
/// Admissible heuristics (never overestimating) keep the search optimal.
/// Inadmissible ones still find a path when there's one, but not
/// necessarily the shortest.
pub trait Heuristic: Debug {
    fn h(graph: &Graph, v: VertexId) -> Cost;
}

/// `h ≡ 0`, ranking by distance only (Dijkstra).
#[derive(Debug)]
pub struct NoHeuristic;

impl Heuristic for NoHeuristic {
    #[inline(always)]
    fn h(_graph: &Graph, _v: VertexId) -> Cost {
        0
    }
}

/// The heuristic values stored in the graph.
#[derive(Debug)]
pub struct VertexHeuristic;

impl Heuristic for VertexHeuristic {
    #[inline(always)]
    fn h(graph: &Graph, v: VertexId) -> Cost {
        graph.heuristic(v)
    }
}

/// A resource budget on accumulated path cost.
pub trait Constraint: Debug {
    /// Whether relaxing an edge into `candidate_g` stays within budget.
    fn admits(&self, _candidate_g: Cost) -> bool {
        true
    }
    /// Whether a vertex popped at `g` may be expanded.
    fn allows_expansion(&self, _g: Cost) -> bool {
        true
    }
    /// What's left of the budget at `g`, if there's a budget at all.
    fn remaining(&self, _g: Cost) -> Option<i64> {
        None
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Unconstrained;

impl Constraint for Unconstrained {}

/// A wire of fixed length laid along the path.
///
/// Edges that would need more wire than `length` are never taken, and
/// vertices reached with no wire to spare are not expanded. A target reached
/// with exactly `length` wire is therefore not accepted.
///
/// ```
/// use graph_search::policy::Constraint;
/// use graph_search::policy::WireLimit;
///
/// let wire = WireLimit::new(5);
/// assert!(wire.admits(5));
/// assert!(!wire.admits(6));
/// assert!(wire.allows_expansion(4));
/// assert!(!wire.allows_expansion(5));
/// assert_eq!(wire.remaining(7), Some(-2));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WireLimit {
    pub length: Cost,
}

impl WireLimit {
    pub fn new(length: Cost) -> Self {
        Self { length }
    }
}

impl Constraint for WireLimit {
    fn admits(&self, candidate_g: Cost) -> bool {
        candidate_g <= self.length
    }
    fn allows_expansion(&self, g: Cost) -> bool {
        remaining(self.length, g) > 0
    }
    fn remaining(&self, g: Cost) -> Option<i64> {
        Some(remaining(self.length, g))
    }
}

//! Heuristic search using the per-vertex estimates stored in the graph.
//!
//! It's A* while those estimates are admissible and consistent, and greedy
//! best-first search otherwise.

use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::SearchResult;
use crate::graph::Graph;
use crate::graph::GraphError;
use crate::policy::Unconstrained;
use crate::policy::VertexHeuristic;
use crate::trace::TraceSink;

pub type AStarSearch<'g, K = Unconstrained> = BestFirstSearch<'g, VertexHeuristic, K>;

/// A path from `start` to `goal`, guided by the graph's heuristic values.
pub fn heuristic_search<S: TraceSink>(
    graph: &Graph,
    start: &str,
    goal: &str,
    sink: &mut S,
) -> Result<SearchResult, GraphError> {
    AStarSearch::new(graph, start, Unconstrained)?.find(goal, sink)
}

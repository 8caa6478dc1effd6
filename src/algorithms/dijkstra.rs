//! Dijkstra's algorithm, the best-first search without heuristic.

use rustc_hash::FxHashMap;

use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::SearchResult;
use crate::cost::Cost;
use crate::graph::Graph;
use crate::graph::GraphError;
use crate::graph::VertexId;
use crate::policy::NoHeuristic;
use crate::policy::Unconstrained;
use crate::policy::WireLimit;
use crate::trace::TraceSink;

pub type DijkstraSearch<'g, K = Unconstrained> = BestFirstSearch<'g, NoHeuristic, K>;

/// The shortest path from `start` to `goal`.
///
/// ```
/// use graph_search::algorithms::dijkstra::shortest_path;
/// use graph_search::graph::Graph;
///
/// let mut g = Graph::new();
/// g.add_edge("a", "b", 5, true).unwrap();
/// g.add_edge("a", "c", 1, true).unwrap();
/// g.add_edge("c", "b", 1, true).unwrap();
///
/// let result = shortest_path(&g, "a", "b", &mut ()).unwrap();
/// assert_eq!(result.distance(), Some(2));
/// assert_eq!(result.path.unwrap().names(&g), ["a", "c", "b"]);
/// ```
pub fn shortest_path<S: TraceSink>(
    graph: &Graph,
    start: &str,
    goal: &str,
    sink: &mut S,
) -> Result<SearchResult, GraphError> {
    DijkstraSearch::new(graph, start, Unconstrained)?.find(goal, sink)
}

/// The shortest path from `start` to `goal` that fits a wire of `length`.
pub fn shortest_wired_path<S: TraceSink>(
    graph: &Graph,
    start: &str,
    goal: &str,
    length: Cost,
    sink: &mut S,
) -> Result<SearchResult, GraphError> {
    DijkstraSearch::new(graph, start, WireLimit::new(length))?.find(goal, sink)
}

/// Shortest distances from `start` to every vertex it can reach.
pub fn shortest_distances(
    graph: &Graph,
    start: &str,
) -> Result<FxHashMap<VertexId, Cost>, GraphError> {
    let mut search = DijkstraSearch::new(graph, start, Unconstrained)?;
    search.settle_all(&mut ());
    Ok(search.states().settled().collect())
}

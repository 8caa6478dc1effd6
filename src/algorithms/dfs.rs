//! Greedy search that never revisits a vertex.
//!
//! Entries still come out by `g + h`, but a vertex is claimed the moment it's
//! first pushed. Later (and maybe cheaper) ways into it are ignored, so the
//! search dives along whatever reached each vertex first.

use crate::cost::Cost;
use crate::data_structures::frontier::Frontier;
use crate::graph::Graph;
use crate::graph::GraphError;
use crate::policy::Heuristic;
use crate::search::Path;
use crate::search::SearchNode;
use crate::search::SearchStates;
use crate::search::Status;
use crate::trace::FrontierView;
use crate::trace::IterationReport;
use crate::trace::SearchSummary;
use crate::trace::TraceSink;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfsResult {
    /// The first path found, with the cost it happens to have.
    pub path: Option<Path>,
    /// Pops, the goal's included.
    pub expanded: usize,
}

/// Explores from `start` until popping `goal`, reporting to `sink`.
///
/// Edges are followed last to first. Each iteration reports every queued
/// entry, since none of them can go stale.
///
/// ```
/// use graph_search::algorithms::dfs::depth_first;
/// use graph_search::graph::Graph;
/// use graph_search::policy::NoHeuristic;
///
/// let mut g = Graph::new();
/// g.add_edge("a", "b", 1, true).unwrap();
/// g.add_edge("a", "c", 5, true).unwrap();
/// g.add_edge("b", "c", 1, true).unwrap();
///
/// // `c` is claimed through the direct edge before `b` gets popped.
/// let result = depth_first::<NoHeuristic, _>(&g, "a", "c", &mut ()).unwrap();
/// assert_eq!(result.path.unwrap().cost, 5);
/// ```
pub fn depth_first<H, S>(graph: &Graph, start: &str, goal: &str, sink: &mut S) -> Result<DfsResult, GraphError>
where
    H: Heuristic,
    S: TraceSink,
{
    let start = graph.id(start)?;
    let goal = graph.id(goal)?;

    let mut states = SearchStates::new();
    let mut open = Frontier::new();
    let mut expanded = 0usize;
    let mut path = None;

    states.insert(start, SearchNode::new(0, None));
    open.push(start, 0, H::h(graph, start), None);

    while let Some(entry) = open.pop() {
        let v = entry.vertex;
        debug_assert!(!states.is_settled(v), "Vertices are only pushed once");
        states.set_status(v, Status::Settled);
        expanded += 1;

        if v == goal {
            path = Some(states.path(v));
            break;
        }

        log::debug!("Expanding {}@{}", graph.name(v), entry.g);
        for edge in graph.edges(v).iter().rev() {
            if states.get(edge.to).is_some() {
                continue;
            }
            let g: Cost = entry.g.saturating_add(edge.cost);
            states.insert(edge.to, SearchNode::new(g, Some(v)));
            open.push(edge.to, g, H::h(graph, edge.to), Some(v));
        }

        if sink.wants_iterations() && !open.is_empty() {
            sink.iteration(&IterationReport {
                iteration: expanded,
                current: graph.name(v).to_string(),
                g: entry.g,
                remaining: None,
                frontier: frontier_view(graph, &open),
                expanded,
            });
        }
    }

    match &path {
        Some(p) => log::info!("Found {} after expanding {expanded} vertices", p.display(graph)),
        None => log::info!(
            "No path to {} after expanding {expanded} vertices",
            graph.name(goal)
        ),
    }
    sink.finished(&SearchSummary {
        found: path.is_some(),
        distance: path.as_ref().map(|p| p.cost),
        path: path.as_ref().map_or_else(Vec::new, |p| {
            p.names(graph).into_iter().map(str::to_string).collect()
        }),
        expanded,
    });

    Ok(DfsResult { path, expanded })
}

fn frontier_view(graph: &Graph, open: &Frontier) -> Vec<FrontierView> {
    open.snapshot()
        .into_iter()
        .map(|e| FrontierView {
            name: graph.name(e.vertex).to_string(),
            g: e.g,
            h: e.h,
            priority: e.priority(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::algorithms::dijkstra::shortest_path;
    use crate::policy::NoHeuristic;
    use crate::policy::VertexHeuristic;
    use crate::problems::graph_file::GraphProblem;
    use crate::trace::TraceLog;

    const EXAMPLE: &str = indoc! {"
        ponto_inicial(A).
        ponto_final(F).
        pode_ir(A,B,2).
        pode_ir(A,C,2).
        pode_ir(B,C,3).
        pode_ir(B,D,1).
        pode_ir(B,E,5).
        pode_ir(C,D,2).
        pode_ir(D,E,1).
        pode_ir(D,F,4).
        pode_ir(E,F,2).
    "};

    fn views(report: &IterationReport) -> Vec<(&str, Cost)> {
        report.frontier.iter().map(|f| (f.name.as_str(), f.g)).collect()
    }

    #[test]
    fn first_claim_wins() {
        let p = GraphProblem::try_from(EXAMPLE).unwrap();
        let mut log = TraceLog::new();
        let result = depth_first::<NoHeuristic, _>(&p.graph, "A", "F", &mut log).unwrap();

        let path = result.path.unwrap();
        assert_eq!(path.names(&p.graph), ["A", "C", "D", "F"]);
        assert_eq!(path.cost, 8);
        assert_eq!(result.expanded, 6);

        // D is claimed through C, E through B, before the cheaper ways show up.
        let trace: Vec<(usize, &str, Vec<(&str, Cost)>)> = log
            .iterations()
            .map(|r| (r.iteration, r.current.as_str(), views(r)))
            .collect();
        let expected: Vec<(usize, &str, Vec<(&str, Cost)>)> = vec![
            (1, "A", vec![("C", 2), ("B", 2)]),
            (2, "C", vec![("B", 2), ("D", 4)]),
            (3, "B", vec![("D", 4), ("E", 7)]),
            (4, "D", vec![("E", 7), ("F", 8)]),
            (5, "E", vec![("F", 8)]),
        ];
        assert_eq!(trace, expected);
        assert!(log.iterations().all(|r| r.iteration == r.expanded));

        let summary = log.summary().unwrap();
        assert!(summary.found);
        assert_eq!(summary.distance, Some(8));
        assert_eq!(summary.path, ["A", "C", "D", "F"]);
        assert_eq!(summary.expanded, 6);

        let shortest = shortest_path(&p.graph, "A", "F", &mut ()).unwrap();
        assert!(shortest.distance().unwrap() < path.cost);
    }

    #[test]
    fn heuristic_orders_the_queue() {
        let mut g = Graph::new();
        g.add_edge("s", "a", 1, true).unwrap();
        g.add_edge("s", "b", 1, true).unwrap();
        g.add_edge("a", "t", 1, true).unwrap();
        g.add_edge("b", "t", 1, true).unwrap();
        g.set_heuristic("a", 5).unwrap();

        let mut log = TraceLog::new();
        let result = depth_first::<VertexHeuristic, _>(&g, "s", "t", &mut log).unwrap();
        assert_eq!(result.path.unwrap().names(&g), ["s", "b", "t"]);

        let first = log.iterations().next().unwrap();
        let priorities: Vec<(&str, Cost)> =
            first.frontier.iter().map(|f| (f.name.as_str(), f.priority)).collect();
        assert_eq!(priorities, [("b", 1), ("a", 6)]);
    }

    #[test]
    fn start_is_goal() {
        let p = GraphProblem::try_from(EXAMPLE).unwrap();
        let mut log = TraceLog::new();
        let result = depth_first::<NoHeuristic, _>(&p.graph, "A", "A", &mut log).unwrap();

        assert_eq!(result.path.unwrap().cost, 0);
        assert_eq!(result.expanded, 1);
        assert_eq!(log.iterations().count(), 0);
        assert!(log.summary().unwrap().found);
    }

    #[test]
    fn unreachable_goal() {
        let p = GraphProblem::try_from(EXAMPLE).unwrap();
        let mut log = TraceLog::new();
        let result = depth_first::<NoHeuristic, _>(&p.graph, "C", "B", &mut log).unwrap();

        assert_eq!(result.path, None);
        // C, D, E, F
        assert_eq!(result.expanded, 4);
        let summary = log.summary().unwrap();
        assert!(!summary.found);
        assert!(summary.path.is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let mut g = Graph::new();
        g.add_edge("a", "b", 1, false).unwrap();
        g.add_edge("b", "c", 1, false).unwrap();
        g.add_edge("c", "a", 1, false).unwrap();
        g.add_vertex("lonely").unwrap();

        let result = depth_first::<NoHeuristic, _>(&g, "a", "lonely", &mut ()).unwrap();
        assert!(result.path.is_none());
        assert_eq!(result.expanded, 3);
    }

    #[test]
    fn unknown_endpoints_fail() {
        let p = GraphProblem::try_from(EXAMPLE).unwrap();
        assert!(matches!(
            depth_first::<NoHeuristic, _>(&p.graph, "X", "F", &mut ()),
            Err(GraphError::UnknownVertex(_))
        ));
    }
}

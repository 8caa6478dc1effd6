use std::marker::PhantomData;

use rustc_hash::FxHashSet;

use crate::cost::Cost;
use crate::data_structures::frontier::Frontier;
use crate::graph::Graph;
use crate::graph::GraphError;
use crate::graph::VertexId;
use crate::policy::Constraint;
use crate::policy::Heuristic;
use crate::search::Path;
use crate::search::SearchNode;
use crate::search::SearchStates;
use crate::search::Status;
use crate::trace::FrontierView;
use crate::trace::IterationReport;
use crate::trace::SearchSummary;
use crate::trace::TraceSink;

/// Counters of a single search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Non-stale pops, discarded ones included.
    pub iterations: usize,
    /// Vertices settled (and so expanded or accepted as the goal).
    pub expanded: usize,
    /// Successful edge relaxations, each pushing a frontier entry.
    pub relaxations: usize,
    /// Edge relaxations refused by the constraint.
    pub rejected_edges: usize,
    /// Pops refused by the constraint.
    pub discarded: usize,
    /// Outdated frontier entries skipped.
    pub stale: usize,
}

/// The outcome of a point-to-point search.
///
/// Not finding a path is a regular outcome, with `path == None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub path: Option<Path>,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
    pub fn distance(&self) -> Option<Cost> {
        self.path.as_ref().map(|p| p.cost)
    }
}

/// Best-first search over a [`Graph`].
///
/// Ranks frontier entries by `f = g + h`, where `h` comes from `H`, and only
/// explores what the constraint `K` allows.
///
/// - `NoHeuristic` + `Unconstrained` is Dijkstra's algorithm.
/// - An admissible, consistent `H` makes it A*.
/// - Any other `H` degrades it to greedy best-first search. Vertices are
///   settled the first time they come out of the frontier, so the path found
///   may not be the shortest.
///
/// Per-vertex state lives in the search, not in the graph. The graph stays
/// borrowed (and so immutable) for as long as the search exists.
#[derive(Debug)]
pub struct BestFirstSearch<'g, H, K>
where
    H: Heuristic,
    K: Constraint,
{
    graph: &'g Graph,
    start: VertexId,

    /// The reached vertices. Naturally forms a search tree through parents.
    states: SearchStates,

    /// Pending entries. May hold outdated entries for a vertex, only the
    /// first pop of a vertex with its best `g` counts.
    open: Frontier,

    constraint: K,
    stats: SearchStats,

    _phantom_heuristic: PhantomData<H>,
}

impl<'g, H, K> BestFirstSearch<'g, H, K>
where
    H: Heuristic,
    K: Constraint,
{
    pub fn new(graph: &'g Graph, start: &str, constraint: K) -> Result<Self, GraphError> {
        let start = graph.id(start)?;

        let mut search = Self {
            graph,
            start,
            states: SearchStates::new(),
            open: Frontier::new(),
            constraint,
            stats: SearchStats::default(),
            _phantom_heuristic: PhantomData,
        };

        let g: Cost = 0;
        search.states.insert(start, SearchNode::new(g, None));
        search.open.push(start, g, H::h(graph, start), None);

        Ok(search)
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }
    pub fn start(&self) -> VertexId {
        self.start
    }
    pub fn states(&self) -> &SearchStates {
        &self.states
    }
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches for a path to `goal`, reporting to `sink`.
    pub fn find<S: TraceSink>(&mut self, goal: &str, sink: &mut S) -> Result<SearchResult, GraphError> {
        let goal = self.graph.id(goal)?;
        let path = self.find_goal(goal, sink);
        Ok(SearchResult {
            path,
            stats: self.stats,
        })
    }

    /// Searches for a path to `goal`, reporting to `sink`.
    ///
    /// The search stops as soon as the goal is settled.
    #[must_use]
    pub fn find_goal<S: TraceSink>(&mut self, goal: VertexId, sink: &mut S) -> Option<Path> {
        let path = if goal == self.start && self.stats.iterations == 0 {
            // Nothing to explore.
            Some(Path {
                vertices: vec![self.start],
                cost: 0,
            })
        } else {
            self.run(Some(goal), sink)
        };

        match &path {
            Some(p) => log::info!(
                "Found {} after expanding {} vertices",
                p.display(self.graph),
                self.stats.expanded
            ),
            None => log::info!(
                "No path to {} after expanding {} vertices",
                self.graph.name(goal),
                self.stats.expanded
            ),
        }
        sink.finished(&SearchSummary {
            found: path.is_some(),
            distance: path.as_ref().map(|p| p.cost),
            path: path.as_ref().map_or_else(Vec::new, |p| {
                p.names(self.graph).into_iter().map(str::to_string).collect()
            }),
            expanded: self.stats.expanded,
        });

        path
    }

    /// Settles every vertex within reach (and within the constraint).
    pub fn settle_all<S: TraceSink>(&mut self, sink: &mut S) {
        let none = self.run(None, sink);
        debug_assert!(none.is_none());
    }

    /// Best known `g` of `v`, final once `v` is settled.
    pub fn g(&self, v: VertexId) -> Option<Cost> {
        self.states.get(v).map(|n| n.g)
    }

    fn run<S: TraceSink>(&mut self, goal: Option<VertexId>, sink: &mut S) -> Option<Path> {
        while let Some(entry) = self.open.pop() {
            let v = entry.vertex;
            let node = match self.states.get(v) {
                Some(node) => *node,
                None => unreachable!("Frontier entries always have a node"),
            };

            if node.is_closed() || entry.g > node.g {
                // Left behind by a better relaxation, or already done with.
                self.stats.stale += 1;
                log::trace!("Skipping stale entry {}@{}", self.graph.name(v), entry.g);
                continue;
            }
            debug_assert_eq!(entry.parent, node.parent);
            self.stats.iterations += 1;

            if !self.constraint.allows_expansion(entry.g) {
                self.states.set_status(v, Status::Discarded);
                self.stats.discarded += 1;
                let remaining = self.constraint.remaining(entry.g).unwrap_or_default();
                log::debug!(
                    "Discarding {}@{} ({remaining} left)",
                    self.graph.name(v),
                    entry.g
                );
                sink.discarded(
                    self.stats.iterations,
                    self.graph.name(v),
                    entry.g,
                    remaining,
                    self.stats.expanded,
                );
                continue;
            }

            self.states.set_status(v, Status::Settled);
            self.stats.expanded += 1;
            self.report_iteration(v, entry.g, sink);

            if goal == Some(v) {
                return Some(self.states.path(v));
            }

            self.expand(v, entry.g, sink);
        }

        None
    }

    fn expand<S: TraceSink>(&mut self, v: VertexId, g: Cost, sink: &mut S) {
        let graph = self.graph;
        log::debug!("Expanding {}@{g}", graph.name(v));

        for edge in graph.edges(v) {
            let to = edge.to;
            if self.states.get(to).is_some_and(SearchNode::is_closed) {
                continue;
            }

            let candidate_g = g.saturating_add(edge.cost);
            if !self.constraint.admits(candidate_g) {
                self.stats.rejected_edges += 1;
                log::debug!("Rejecting {} -> {}@{candidate_g}", graph.name(v), graph.name(to));
                sink.edge_rejected(graph.name(v), graph.name(to), candidate_g);
                continue;
            }

            match self.states.get_mut(to) {
                Some(node) => {
                    if candidate_g >= node.g {
                        continue;
                    }
                    // Found better path to an open vertex. Its old entry
                    // becomes stale.
                    node.reach(v, candidate_g);
                }
                None => self.states.insert(to, SearchNode::new(candidate_g, Some(v))),
            }

            self.stats.relaxations += 1;
            self.open.push(to, candidate_g, H::h(graph, to), Some(v));
        }
    }

    /// Reports the frontier left behind by popping `v`, unless it's empty.
    fn report_iteration<S: TraceSink>(&self, v: VertexId, g: Cost, sink: &mut S) {
        if !sink.wants_iterations() {
            return;
        }
        let frontier = self.frontier_view();
        if frontier.is_empty() {
            return;
        }
        sink.iteration(&IterationReport {
            iteration: self.stats.iterations,
            current: self.graph.name(v).to_string(),
            g,
            remaining: self.constraint.remaining(g),
            frontier,
            expanded: self.stats.expanded,
        });
    }

    /// The open vertices with their best entry, ascending by priority.
    fn frontier_view(&self) -> Vec<FrontierView> {
        let mut shown = FxHashSet::default();
        self.open
            .snapshot()
            .into_iter()
            .filter(|e| {
                self.states
                    .get(e.vertex)
                    .is_some_and(|n| !n.is_closed() && n.g == e.g)
            })
            .filter(|e| shown.insert(e.vertex))
            .map(|e| FrontierView {
                name: self.graph.name(e.vertex).to_string(),
                g: e.g,
                h: e.h,
                priority: e.priority(),
            })
            .collect()
    }
}

/// Runs a fresh search from `start` to `goal`.
pub fn search<H, K, S>(
    graph: &Graph,
    start: &str,
    goal: &str,
    constraint: K,
    sink: &mut S,
) -> Result<SearchResult, GraphError>
where
    H: Heuristic,
    K: Constraint,
    S: TraceSink,
{
    BestFirstSearch::<H, K>::new(graph, start, constraint)?.find(goal, sink)
}

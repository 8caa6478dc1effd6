use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::cost::UNREACHED;
use crate::graph::Graph;
use crate::graph::VertexId;

/// Where a vertex stands within one search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Reached, waiting in the frontier.
    Open,
    /// Expanded with a final `g`.
    Settled,
    /// Popped but refused by the constraint, never expanded.
    Discarded,
}

/// Per-search annotations of a vertex.
#[derive(Copy, Clone, Debug)]
pub struct SearchNode {
    pub g: Cost,
    pub parent: Option<VertexId>,
    pub status: Status,
}

impl SearchNode {
    pub fn new(g: Cost, parent: Option<VertexId>) -> Self {
        Self {
            g,
            parent,
            status: Status::Open,
        }
    }

    /// Gives this node a better path through a new parent.
    pub fn reach(&mut self, parent: VertexId, g: Cost) {
        debug_assert!(g < self.g);
        debug_assert_eq!(self.status, Status::Open);
        self.parent = Some(parent);
        self.g = g;
    }

    pub fn is_closed(&self) -> bool {
        self.status != Status::Open
    }
}

/// The search forest of one invocation, keyed by vertex.
///
/// Lives outside the [`Graph`], which stays untouched and reusable. Nodes are
/// created lazily the first time a vertex is reached.
#[derive(Debug, Default)]
pub struct SearchStates {
    nodes: FxHashMap<VertexId, SearchNode>,
}

impl SearchStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, v: VertexId) -> Option<&SearchNode> {
        self.nodes.get(&v)
    }
    pub fn get_mut(&mut self, v: VertexId) -> Option<&mut SearchNode> {
        self.nodes.get_mut(&v)
    }
    pub fn insert(&mut self, v: VertexId, node: SearchNode) {
        debug_assert!(!self.nodes.contains_key(&v), "{v} was already reached");
        self.nodes.insert(v, node);
    }

    /// Best known `g`, [`UNREACHED`] for unseen vertices.
    pub fn g(&self, v: VertexId) -> Cost {
        self.nodes.get(&v).map_or(UNREACHED, |n| n.g)
    }
    pub fn status(&self, v: VertexId) -> Option<Status> {
        self.nodes.get(&v).map(|n| n.status)
    }
    pub fn is_settled(&self, v: VertexId) -> bool {
        self.status(v) == Some(Status::Settled)
    }

    pub fn set_status(&mut self, v: VertexId, status: Status) {
        match self.nodes.get_mut(&v) {
            Some(node) => node.status = status,
            None => unreachable!("Tried closing a vertex without a node"),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Settled vertices with their final `g`, in no particular order.
    pub fn settled(&self) -> impl Iterator<Item = (VertexId, Cost)> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.status == Status::Settled)
            .map(|(v, n)| (*v, n.g))
    }

    /// Walks parents back from `end` and returns the path from its root.
    #[must_use]
    pub fn path(&self, end: VertexId) -> Path {
        let cost = self.g(end);
        debug_assert!(crate::cost::valid(cost));

        let mut vertices = vec![end];
        let mut v = end;
        while let Some(parent) = self.nodes.get(&v).and_then(|n| n.parent) {
            debug_assert!(parent != v);
            vertices.push(parent);
            v = parent;
        }

        vertices.reverse();
        Path { vertices, cost }
    }
}

/// A path through a [`Graph`], from its first to its last vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub cost: Cost,
}

impl Path {
    pub fn start(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }
    pub fn end(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }
    /// Number of edges.
    pub fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.vertices.iter().map(|v| graph.name(*v)).collect()
    }

    /// Renders with vertex names, e.g. `A – B – D (3)`.
    pub fn display<'a>(&'a self, graph: &'a Graph) -> NamedPath<'a> {
        NamedPath { path: self, graph }
    }
}

pub struct NamedPath<'a> {
    path: &'a Path,
    graph: &'a Graph,
}

impl std::fmt::Display for NamedPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.path.names(self.graph).join(crate::report::PATH_SEPARATOR),
            self.path.cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_walks_parents() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b", 1, true).unwrap();
        graph.add_edge("b", "c", 2, true).unwrap();
        let [a, b, c] = ["a", "b", "c"].map(|n| graph.id(n).unwrap());

        let mut states = SearchStates::new();
        states.insert(a, SearchNode::new(0, None));
        states.insert(b, SearchNode::new(1, Some(a)));
        states.insert(c, SearchNode::new(3, Some(b)));

        let path = states.path(c);
        assert_eq!(path.vertices, [a, b, c]);
        assert_eq!(path.cost, 3);
        assert_eq!(path.len(), 2);
        assert_eq!(path.display(&graph).to_string(), "a – b – c (3)");
    }

    #[test]
    fn unseen_vertices_are_unreached() {
        let mut graph = Graph::new();
        let a = graph.add_vertex("a").unwrap();
        let states = SearchStates::new();
        assert_eq!(states.g(a), UNREACHED);
        assert_eq!(states.status(a), None);
    }

    #[test]
    fn reaching_updates_parent() {
        let mut graph = Graph::new();
        let a = graph.add_vertex("a").unwrap();
        let b = graph.add_vertex("b").unwrap();
        let c = graph.add_vertex("c").unwrap();

        let mut states = SearchStates::new();
        states.insert(c, SearchNode::new(10, Some(a)));
        states.get_mut(c).unwrap().reach(b, 4);
        assert_eq!(states.g(c), 4);
        assert_eq!(states.get(c).unwrap().parent, Some(b));

        states.set_status(c, Status::Settled);
        assert!(states.is_settled(c));
        assert_eq!(states.settled().collect::<Vec<_>>(), [(c, 4)]);
    }
}

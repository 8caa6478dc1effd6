use derive_more::Display;
use nonmax::NonMaxU32;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::cost::Cost;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// Dense handle to a vertex of a [`Graph`].
///
/// `NonMax` keeps `Option<VertexId>` (a parent pointer) as wide as the id.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("#{}", _0.get())]
pub struct VertexId(NonMaxU32);

impl VertexId {
    fn new(index: usize) -> Option<Self> {
        let index = u32::try_from(index).ok()?;
        Some(Self(NonMaxU32::new(index)?))
    }

    #[inline(always)]
    #[must_use]
    pub fn index(&self) -> usize {
        self.0.get() as usize
    }
}

/// A directed, weighted edge owned by its source vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub to: VertexId,
    pub cost: Cost,
}

#[derive(Clone, Debug)]
pub struct Vertex {
    name: String,
    heuristic: Cost,
    edges: SmallVec<[Edge; 4]>,
}

impl Vertex {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            heuristic: 0,
            edges: SmallVec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn heuristic(&self) -> Cost {
        self.heuristic
    }
    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown vertex '{0}'")]
    UnknownVertex(String),
    #[error("Too many vertices, can't add '{0}'")]
    TooManyVertices(String),
    #[error("The graph has no vertices")]
    EmptyGraph,
}

/// A weighted graph with named vertices.
///
/// Vertices live in a `Vec` indexed by [`VertexId`], with a name index on
/// the side. The graph carries no per-search state, so it can be searched
/// any number of times, from several threads at once, while borrowed.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    index: FxHashMap<String, VertexId>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the id for `name`, creating the vertex if needed.
    pub fn add_vertex(&mut self, name: &str) -> Result<VertexId, GraphError> {
        if let Some(id) = self.index.get(name) {
            return Ok(*id);
        }
        let id = VertexId::new(self.vertices.len())
            .ok_or_else(|| GraphError::TooManyVertices(name.to_string()))?;
        self.vertices.push(Vertex::new(name));
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Adds `from -> to`, and `to -> from` when `!directed`.
    ///
    /// ```
    /// use graph_search::graph::Graph;
    ///
    /// let mut g = Graph::new();
    /// g.add_edge("a", "b", 3, false).unwrap();
    /// assert_eq!(g.neighbors("a").unwrap()[0].cost, 3);
    /// assert_eq!(g.neighbors("b").unwrap().len(), 1);
    /// ```
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        cost: Cost,
        directed: bool,
    ) -> Result<(), GraphError> {
        let from = self.add_vertex(from)?;
        let to = self.add_vertex(to)?;

        self.vertices[from.index()].edges.push(Edge { to, cost });
        if !directed {
            self.vertices[to.index()].edges.push(Edge { to: from, cost });
        }
        Ok(())
    }

    /// Sets the heuristic value of `name`, creating the vertex if needed.
    pub fn set_heuristic(&mut self, name: &str, h: Cost) -> Result<VertexId, GraphError> {
        let id = self.add_vertex(name)?;
        self.vertices[id.index()].heuristic = h;
        Ok(id)
    }

    pub fn id(&self, name: &str) -> Result<VertexId, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Outgoing edges of `name` in insertion order.
    pub fn neighbors(&self, name: &str) -> Result<&[Edge], GraphError> {
        Ok(self.edges(self.id(name)?))
    }

    #[inline(always)]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }
    #[inline(always)]
    pub fn edges(&self, id: VertexId) -> &[Edge] {
        self.vertex(id).edges()
    }
    #[inline(always)]
    pub fn name(&self, id: VertexId) -> &str {
        self.vertex(id).name()
    }
    #[inline(always)]
    pub fn heuristic(&self, id: VertexId) -> Cost {
        self.vertex(id).heuristic()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }

    /// All vertex ids, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + use<> {
        // Ids are only minted by `add_vertex`, which checked they fit.
        (0..self.vertices.len()).filter_map(VertexId::new)
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Graph({} vertices, {} edges):", self.len(), self.edge_count())?;
        for v in self.vertices.iter().take(MAX_ELEMENTS_DISPLAYED) {
            write!(f, "  {} (h={}):", v.name, v.heuristic)?;
            for e in &v.edges {
                write!(f, " {}({})", self.name(e.to), e.cost)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_are_created_once() {
        let mut g = Graph::new();
        let a = g.add_vertex("a").unwrap();
        assert_eq!(g.add_vertex("a").unwrap(), a);
        g.add_edge("a", "b", 1, true).unwrap();
        g.add_edge("b", "a", 1, true).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut g = Graph::new();
        g.add_edge("s", "c", 5, true).unwrap();
        g.add_edge("s", "a", 1, true).unwrap();
        g.add_edge("s", "b", 3, true).unwrap();

        let names: Vec<&str> = g
            .neighbors("s")
            .unwrap()
            .iter()
            .map(|e| g.name(e.to))
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn undirected_edges_are_mirrored() {
        let mut g = Graph::new();
        g.add_edge("a", "b", 4, false).unwrap();

        let b = g.id("b").unwrap();
        let a = g.id("a").unwrap();
        assert_eq!(g.edges(b), [Edge { to: a, cost: 4 }]);
        assert_eq!(g.edges(a), [Edge { to: b, cost: 4 }]);
    }

    #[test]
    fn heuristic_defaults_to_zero_and_upserts() {
        let mut g = Graph::new();
        g.add_edge("a", "b", 1, true).unwrap();
        let a = g.id("a").unwrap();
        assert_eq!(g.heuristic(a), 0);

        g.set_heuristic("a", 7).unwrap();
        g.set_heuristic("a", 4).unwrap();
        assert_eq!(g.heuristic(a), 4);

        // Heuristics may name vertices without edges.
        let z = g.set_heuristic("z", 2).unwrap();
        assert_eq!(g.name(z), "z");
        assert!(g.edges(z).is_empty());
    }

    #[test]
    fn unknown_vertices_fail() {
        let g = Graph::new();
        assert_eq!(
            g.id("nope"),
            Err(GraphError::UnknownVertex("nope".to_string()))
        );
        assert!(g.neighbors("nope").is_err());
    }

    #[test]
    fn ids_follow_creation_order() {
        let mut g = Graph::new();
        g.add_edge("x", "y", 1, true).unwrap();
        g.add_vertex("z").unwrap();
        let names: Vec<&str> = g.ids().map(|id| g.name(id)).collect();
        assert_eq!(names, ["x", "y", "z"]);
    }
}

//! Random instances, for tests and benchmarks.

use rand::Rng;

use crate::cost::Cost;
use crate::graph::Graph;
use crate::graph::GraphError;
use crate::problems::graph_file::GraphProblem;

/// A directed graph over `v0..v{vertices-1}` with `edges` random edges.
///
/// Every vertex exists even when no edge touches it. Costs are drawn from
/// `0..=max_cost`, and both self-loops and parallel edges may show up.
pub fn random_graph<R: Rng>(
    r: &mut R,
    vertices: usize,
    edges: usize,
    max_cost: Cost,
) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    let names: Vec<String> = (0..vertices).map(|i| format!("v{i}")).collect();
    for name in &names {
        graph.add_vertex(name)?;
    }
    if names.is_empty() {
        return Ok(graph);
    }

    for _ in 0..edges {
        let from = &names[r.random_range(0..names.len())];
        let to = &names[r.random_range(0..names.len())];
        graph.add_edge(from, to, r.random_range(0..=max_cost), true)?;
    }
    Ok(graph)
}

/// A random graph searched from its first vertex to its last one.
///
/// Heuristic values are drawn from `0..=max_h`, so they are usually not
/// admissible. Fails with [`GraphError::EmptyGraph`] without vertices.
pub fn random_problem<R: Rng>(
    r: &mut R,
    vertices: usize,
    edges: usize,
    max_cost: Cost,
    max_h: Cost,
) -> Result<GraphProblem, GraphError> {
    if vertices == 0 {
        return Err(GraphError::EmptyGraph);
    }
    let mut graph = random_graph(r, vertices, edges, max_cost)?;
    let start = "v0".to_string();
    let goal = format!("v{}", vertices - 1);

    for v in graph.ids() {
        let name = graph.name(v).to_string();
        graph.set_heuristic(&name, r.random_range(0..=max_h))?;
    }
    graph.set_heuristic(&goal, 0)?;

    Ok(GraphProblem { graph, start, goal })
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn graphs_have_the_requested_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let g = random_graph(&mut rng, 10, 25, 5).unwrap();
        assert_eq!(g.len(), 10);
        assert_eq!(g.edge_count(), 25);
        assert!(g.ids().flat_map(|v| g.edges(v)).all(|e| e.cost <= 5));
    }

    #[test]
    fn same_seed_same_graph() {
        let a = random_graph(&mut ChaCha8Rng::seed_from_u64(3), 8, 20, 9).unwrap();
        let b = random_graph(&mut ChaCha8Rng::seed_from_u64(3), 8, 20, 9).unwrap();
        for v in a.ids() {
            assert_eq!(a.edges(v), b.edges(v));
        }
    }

    #[test]
    fn problems_go_from_first_to_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let p = random_problem(&mut rng, 6, 12, 9, 4).unwrap();
        assert_eq!(p.start, "v0");
        assert_eq!(p.goal, "v5");
        assert_eq!(p.graph.heuristic(p.graph.id("v5").unwrap()), 0);

    }

    #[test]
    fn problems_need_a_vertex() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(matches!(
            random_problem(&mut rng, 0, 5, 1, 1),
            Err(GraphError::EmptyGraph)
        ));

        let p = random_problem(&mut rng, 1, 0, 1, 1).unwrap();
        assert_eq!(p.start, "v0");
        assert_eq!(p.goal, "v0");
    }
}

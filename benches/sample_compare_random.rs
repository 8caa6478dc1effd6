use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use graph_search::algorithms::astar::heuristic_search;
use graph_search::algorithms::dfs::depth_first;
use graph_search::algorithms::dijkstra::shortest_path;
use graph_search::policy::VertexHeuristic;
use graph_search::problems::random::random_problem;

const SIZES: [(usize, usize); 3] = [(100, 400), (1_000, 5_000), (10_000, 60_000)];
const MAX_COST: u32 = 100;
const MAX_H: u32 = 50;

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random graph search");

    for (vertices, edges) in SIZES {
        for i in 0..3 {
            let instance_name = format!("{vertices}v{edges}e:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let problem = random_problem(&mut rng, vertices, edges, MAX_COST, MAX_H).unwrap();

            group.bench_with_input(BenchmarkId::new("Dijkstra", &instance_name), &problem, |b, p| {
                b.iter(|| shortest_path(&p.graph, &p.start, &p.goal, &mut ()).unwrap())
            });
            group.bench_with_input(BenchmarkId::new("Best-first", &instance_name), &problem, |b, p| {
                b.iter(|| heuristic_search(&p.graph, &p.start, &p.goal, &mut ()).unwrap())
            });
            group.bench_with_input(BenchmarkId::new("DFS", &instance_name), &problem, |b, p| {
                b.iter(|| depth_first::<VertexHeuristic, _>(&p.graph, &p.start, &p.goal, &mut ()).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);

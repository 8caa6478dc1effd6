//! Implementation of search algorithms.
//!
//! Dijkstra and the heuristic search are the same [`best_first`] engine with
//! different strategies plugged in. DFS stands on its own.

pub mod astar;
pub mod best_first;
pub mod dfs;
pub mod dijkstra;

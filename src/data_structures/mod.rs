//! Data structures backing the search algorithms.

pub mod frontier;

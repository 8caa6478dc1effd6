use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod cost;
pub mod data_structures;
pub mod heap_primitives;

// Graphs and search state
// -----------------------
pub mod graph;
pub mod policy;
pub mod search;

// Reporting
// ---------
pub mod report;
pub mod trace;

// Algorithms
// ----------
pub mod algorithms;

// Problems
// --------
pub mod problems;

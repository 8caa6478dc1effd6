//! Search problems: a graph plus the endpoints to connect.

pub mod graph_file;
pub mod random;

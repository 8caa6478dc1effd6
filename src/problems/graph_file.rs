//! Graphs written in a small Prolog-like language, one fact per line.
//!
//! ```text
//! % Comments start with '%'
//! ponto_inicial(a).     % start vertex
//! ponto_final(c).       % goal vertex
//! orientado(n).         % 's' (default) makes later edges directed, 'n' undirected
//! pode_ir(a,b,3).       % edge a -> b costing 3, and b -> a when undirected
//! h(b,c,1).             % heuristic of b (the middle field is ignored)
//! ```

use std::num::ParseIntError;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::cost::Cost;
use crate::graph::Graph;
use crate::graph::GraphError;

/// A graph together with the endpoints of the path to find.
#[derive(Clone, Debug)]
pub struct GraphProblem {
    pub graph: Graph,
    pub start: String,
    pub goal: String,
}

#[derive(Debug, Error)]
pub enum GraphFileParseError {
    #[error("File not found '{p}'")]
    FileNotFound { p: PathBuf },
    #[error("I/O error when loading '{p}': {e}")]
    Io { p: PathBuf, e: std::io::Error },
    #[error("Malformed line {line} '{content}': {reason}")]
    MalformedLine {
        line: usize,
        content: String,
        reason: &'static str,
    },
    #[error("Invalid number '{value}' at line {line}: {e}")]
    InvalidNumber {
        line: usize,
        value: String,
        e: ParseIntError,
    },
    #[error("Negative value '{value}' at line {line}")]
    NegativeValue { line: usize, value: String },
    #[error("Missing start, expected a 'ponto_inicial(...)' line")]
    MissingStart,
    #[error("Missing goal, expected a 'ponto_final(...)' line")]
    MissingGoal,
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// One line, split into its directive and fields.
struct Fact<'a> {
    line: usize,
    content: &'a str,
    directive: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Fact<'a> {
    /// Splits `name(f0, f1, ...)`, tolerating a trailing `.` and `% comment`.
    fn parse(line: usize, content: &'a str) -> Result<Self, GraphFileParseError> {
        let malformed = |reason: &'static str| GraphFileParseError::MalformedLine {
            line,
            content: content.to_string(),
            reason,
        };

        let fact = content.split_once('%').map_or(content, |(fact, _)| fact).trim_end();
        let fact = fact.strip_suffix('.').unwrap_or(fact).trim_end();
        let (directive, rest) = fact.split_once('(').ok_or_else(|| malformed("missing '('"))?;
        let args = rest.strip_suffix(')').ok_or_else(|| malformed("missing ')'"))?;

        Ok(Self {
            line,
            content,
            directive: directive.trim(),
            fields: args.split(',').map(str::trim).collect(),
        })
    }

    fn malformed(&self, reason: &'static str) -> GraphFileParseError {
        GraphFileParseError::MalformedLine {
            line: self.line,
            content: self.content.to_string(),
            reason,
        }
    }

    /// The fields, checking there are exactly `N` of them and that names
    /// aren't empty.
    fn fields<const N: usize>(&self) -> Result<[&'a str; N], GraphFileParseError> {
        let fields: [&'a str; N] = self
            .fields
            .as_slice()
            .try_into()
            .map_err(|_| self.malformed("wrong number of fields"))?;
        if fields.first().is_some_and(|name| name.is_empty()) {
            return Err(self.malformed("empty vertex name"));
        }
        Ok(fields)
    }

    fn value(&self, field: &str) -> Result<Cost, GraphFileParseError> {
        match field.parse::<Cost>() {
            Ok(v) => Ok(v),
            Err(_) if field.parse::<i64>().is_ok_and(|v| v < 0) => {
                Err(GraphFileParseError::NegativeValue {
                    line: self.line,
                    value: field.to_string(),
                })
            }
            Err(e) => Err(GraphFileParseError::InvalidNumber {
                line: self.line,
                value: field.to_string(),
                e,
            }),
        }
    }
}

impl std::convert::TryFrom<&str> for GraphProblem {
    type Error = GraphFileParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut graph = Graph::new();
        let mut start = None;
        let mut goal = None;
        let mut directed = true;

        for (i, content) in s.lines().enumerate() {
            let content = content.trim();
            if content.is_empty() || content.starts_with('%') {
                continue;
            }

            let fact = Fact::parse(i + 1, content)?;
            match fact.directive {
                "ponto_inicial" => {
                    let [name] = fact.fields::<1>()?;
                    start = Some(name.to_string());
                }
                "ponto_final" => {
                    let [name] = fact.fields::<1>()?;
                    goal = Some(name.to_string());
                }
                "orientado" => {
                    directed = match fact.fields::<1>()? {
                        ["s"] => true,
                        ["n"] => false,
                        _ => return Err(fact.malformed("expected 's' or 'n'")),
                    };
                }
                "pode_ir" => {
                    let [from, to, cost] = fact.fields::<3>()?;
                    if to.is_empty() {
                        return Err(fact.malformed("empty vertex name"));
                    }
                    let cost = fact.value(cost)?;
                    graph.add_edge(from, to, cost, directed)?;
                }
                "h" => {
                    let [name, _goal, h] = fact.fields::<3>()?;
                    let h = fact.value(h)?;
                    graph.set_heuristic(name, h)?;
                }
                other => log::warn!("Skipping unknown directive '{other}' at line {}", fact.line),
            }
        }

        let start = start.ok_or(GraphFileParseError::MissingStart)?;
        let goal = goal.ok_or(GraphFileParseError::MissingGoal)?;
        // Goals are often sinks without any fact of their own.
        graph.add_vertex(&goal)?;

        log::debug!(
            "Loaded {} vertices and {} edges, from '{start}' to '{goal}'",
            graph.len(),
            graph.edge_count()
        );
        Ok(GraphProblem { graph, start, goal })
    }
}

impl std::convert::TryFrom<&Path> for GraphProblem {
    type Error = GraphFileParseError;

    fn try_from(p: &Path) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(p).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => GraphFileParseError::FileNotFound { p: p.to_path_buf() },
            _ => GraphFileParseError::Io {
                p: p.to_path_buf(),
                e,
            },
        })?;
        GraphProblem::try_from(s.as_str())
    }
}

impl std::fmt::Display for GraphProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "GraphProblem({} -> {})", self.start, self.goal)?;
        write!(f, "{}", self.graph)
    }
}

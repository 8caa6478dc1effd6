//! Structured events emitted while searching.
//!
//! Searches report to a [`TraceSink`] instead of printing, so the same run can
//! feed a console ([`crate::report::ConsoleReporter`]), a test
//! ([`TraceLog`]) or nothing at all (`()`).

use crate::cost::Cost;

/// A live frontier entry as shown to a reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrontierView {
    pub name: String,
    pub g: Cost,
    pub h: Cost,
    pub priority: Cost,
}

/// The state of a search right after popping the vertex to expand.
///
/// The frontier doesn't include what expanding `current` will add.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterationReport {
    /// 1-based count of non-stale pops, discarded ones included.
    pub iteration: usize,
    /// The vertex being expanded, possibly the goal.
    pub current: String,
    pub g: Cost,
    /// Budget left at `g`, for constrained searches.
    pub remaining: Option<i64>,
    /// One entry per open vertex (its best `g`), ascending by priority.
    pub frontier: Vec<FrontierView>,
    pub expanded: usize,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSummary {
    pub found: bool,
    pub distance: Option<Cost>,
    /// Vertex names from start to target, empty when not found.
    pub path: Vec<String>,
    pub expanded: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    Iteration(IterationReport),
    Discarded {
        iteration: usize,
        vertex: String,
        g: Cost,
        remaining: i64,
        expanded: usize,
    },
    EdgeRejected {
        from: String,
        to: String,
        candidate_g: Cost,
    },
    Finished(SearchSummary),
}

/// Receives search events. Every method defaults to doing nothing.
pub trait TraceSink {
    /// Whether [`TraceSink::iteration`] reports are wanted at all.
    ///
    /// Building frontier views costs a sort per iteration.
    fn wants_iterations(&self) -> bool {
        true
    }
    fn iteration(&mut self, _report: &IterationReport) {}
    /// A popped vertex the constraint refused to expand.
    fn discarded(&mut self, _iteration: usize, _vertex: &str, _g: Cost, _remaining: i64, _expanded: usize) {}
    /// An edge relaxation the constraint refused.
    fn edge_rejected(&mut self, _from: &str, _to: &str, _candidate_g: Cost) {}
    fn finished(&mut self, _summary: &SearchSummary) {}
}

impl TraceSink for () {
    fn wants_iterations(&self) -> bool {
        false
    }
}

/// Records every event, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iterations(&self) -> impl Iterator<Item = &IterationReport> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Iteration(report) => Some(report),
            _ => None,
        })
    }

    pub fn summary(&self) -> Option<&SearchSummary> {
        self.events.iter().rev().find_map(|e| match e {
            TraceEvent::Finished(summary) => Some(summary),
            _ => None,
        })
    }
}

impl TraceSink for TraceLog {
    fn iteration(&mut self, report: &IterationReport) {
        self.events.push(TraceEvent::Iteration(report.clone()));
    }
    fn discarded(&mut self, iteration: usize, vertex: &str, g: Cost, remaining: i64, expanded: usize) {
        self.events.push(TraceEvent::Discarded {
            iteration,
            vertex: vertex.to_string(),
            g,
            remaining,
            expanded,
        });
    }
    fn edge_rejected(&mut self, from: &str, to: &str, candidate_g: Cost) {
        self.events.push(TraceEvent::EdgeRejected {
            from: from.to_string(),
            to: to.to_string(),
            candidate_g,
        });
    }
    fn finished(&mut self, summary: &SearchSummary) {
        self.events.push(TraceEvent::Finished(summary.clone()));
    }
}

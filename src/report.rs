//! Human-readable trace of a search, one block per iteration.
//!
//! ```text
//! Iteration 3:
//! Frontier: (D: 3 + 0 = 3) (E: 7 + 0 = 7)
//! Expanded nodes: 3
//! ```

use std::io;
use std::io::Write;

use owo_colors::OwoColorize;

use crate::cost::Cost;
use crate::trace::IterationReport;
use crate::trace::SearchSummary;
use crate::trace::TraceSink;

/// Separates vertex names when printing paths.
pub const PATH_SEPARATOR: &str = " – ";

/// Writes search events to `W` as they happen.
///
/// Labels are styled, so `W` should strip escapes when colours aren't wanted
/// (like [`anstream::AutoStream`] does). The first I/O error stops all output
/// and is returned by [`ConsoleReporter::finish`].
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
    quiet: bool,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            quiet: false,
            error: None,
        }
    }

    /// Only reports the final summary.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Flushes, giving back the writer or the first error found.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = f(&mut self.out) {
            self.error = Some(e);
        }
    }
}

fn write_header<W: Write>(out: &mut W, iteration: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {iteration}:", "Iteration".bold())
}

fn write_expanded<W: Write>(out: &mut W, expanded: usize) -> io::Result<()> {
    writeln!(out, "{} {expanded}", "Expanded nodes:".cyan())
}

impl<W: Write> TraceSink for ConsoleReporter<W> {
    fn wants_iterations(&self) -> bool {
        !self.quiet
    }

    fn iteration(&mut self, report: &IterationReport) {
        if self.quiet {
            return;
        }
        self.emit(|out| {
            write_header(out, report.iteration)?;
            write!(out, "{}", "Frontier:".cyan())?;
            for f in &report.frontier {
                write!(out, " ({}: {} + {} = {})", f.name, f.g, f.h, f.priority)?;
            }
            writeln!(out)?;
            if let Some(remaining) = report.remaining {
                writeln!(out, "{} {remaining}", "Wire left:".cyan())?;
            }
            write_expanded(out, report.expanded)
        });
    }

    fn discarded(&mut self, iteration: usize, vertex: &str, g: Cost, remaining: i64, expanded: usize) {
        if self.quiet {
            return;
        }
        self.emit(|out| {
            write_header(out, iteration)?;
            writeln!(
                out,
                "{} {remaining}{PATH_SEPARATOR}{} ({vertex} at {g})",
                "Wire left:".cyan(),
                "path discarded".yellow()
            )?;
            write_expanded(out, expanded)
        });
    }

    fn finished(&mut self, summary: &SearchSummary) {
        self.emit(|out| {
            writeln!(out)?;
            writeln!(out, "{}", "End of search".bold())?;
            match summary.distance {
                Some(distance) if summary.found => {
                    writeln!(out, "{} {distance}", "Distance:".green())?;
                    writeln!(out, "{} {}", "Path:".green(), summary.path.join(PATH_SEPARATOR))?;
                }
                _ => writeln!(out, "{}", "Path not found.".red())?,
            }
            write_expanded(out, summary.expanded)
        });
    }
}

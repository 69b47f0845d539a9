use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;

use crate::graph::builder::Diagnostic;
use crate::query::circular::Cycle;
use crate::query::stats::GraphStats;

/// What one run found, as shown to the user after the graph is written.
#[derive(Debug)]
pub struct RunSummary<'a> {
    pub stats: &'a GraphStats,
    pub cycles: &'a [Cycle],
    /// Files skipped due to read or parse errors.
    pub skipped: usize,
    /// Wall-clock time for discovery, parsing, and linking in seconds.
    pub elapsed_secs: f64,
}

/// Write the human-readable run summary.
pub fn write_summary(out: &mut impl Write, summary: &RunSummary<'_>) -> io::Result<()> {
    let stats = summary.stats;
    writeln!(
        out,
        "Analyzed {} files in {:.2}s",
        stats.file_count, summary.elapsed_secs
    )?;
    writeln!(
        out,
        "  {} import edges ({} dangling), {} call edges",
        stats.import_edges, stats.dangling_imports, stats.call_edges
    )?;
    if summary.skipped > 0 {
        writeln!(out, "  {} files skipped (parse errors)", summary.skipped)?;
    }

    if summary.cycles.is_empty() {
        writeln!(out, "No circular dependencies found.")?;
    } else {
        writeln!(out, "Found {} circular dependencies:", summary.cycles.len())?;
        for (i, cycle) in summary.cycles.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, cycle)?;
        }
    }

    if !stats.most_imported.is_empty() {
        writeln!(out, "Most imported files:")?;
        for (id, count) in &stats.most_imported {
            let noun = if *count == 1 { "import" } else { "imports" };
            writeln!(out, "  {count:>4} {noun:<7} {id}")?;
        }
    }
    Ok(())
}

/// Write resolution diagnostics, one per line.
pub fn write_diagnostics(out: &mut impl Write, diagnostics: &[Diagnostic]) -> io::Result<()> {
    if diagnostics.is_empty() {
        return writeln!(out, "No resolution diagnostics.");
    }
    writeln!(out, "{} resolution diagnostics:", diagnostics.len())?;
    for diagnostic in diagnostics {
        writeln!(out, "  {diagnostic}")?;
    }
    Ok(())
}

/// Write rendered graph content to `path`, or to stdout when `path` is `None`.
pub fn write_graph(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write graph to {}", path.display())),
        None => write_stdout(content).context("failed to write graph to stdout"),
    }
}

fn write_stdout(content: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}

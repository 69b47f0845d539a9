mod analysis;
mod cli;
mod config;
mod error;
mod export;
mod graph;
mod language;
mod output;
mod parser;
mod query;
mod resolver;
mod walker;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use analysis::{Analysis, analyze};
use cli::Cli;
use config::DepGraphConfig;
use export::model::ExportFormat;
use output::{RunSummary, write_diagnostics, write_graph, write_summary};
use query::circular::find_cycles;
use query::stats::project_stats;

/// Default size of the most-imported ranking.
const DEFAULT_TOP: usize = 5;

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "depgraph=debug" } else { "depgraph=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = DepGraphConfig::load(cli.config.as_deref());
    let language = cli.language.or(config.language).context(
        "no source language given: pass --language ts|js or set `language` in depgraph.toml",
    )?;
    let format = cli.format.or(config.format).unwrap_or_default();
    let top = cli.top.or(config.top).unwrap_or(DEFAULT_TOP);

    let start = Instant::now();
    let analysis = analyze(&cli.glob, language, &config)?;
    let cycles = find_cycles(&analysis.graph);
    let stats = project_stats(&analysis.graph, top);
    let elapsed_secs = start.elapsed().as_secs_f64();
    info!(cycles = cycles.len(), "analysis complete");

    let content = export::render(&analysis.graph, format)?;
    let output_path = output_path(cli.output.as_deref(), cli.open, format);
    write_graph(output_path.as_deref(), &content)?;

    let summary = RunSummary {
        stats: &stats,
        cycles: &cycles,
        skipped: analysis.skipped.len(),
        elapsed_secs,
    };
    // Keep stdout machine-readable when the graph itself went there.
    let reported = match &output_path {
        Some(path) => report(
            &mut io::stdout().lock(),
            &summary,
            &analysis,
            cli.diagnostics,
            Some((format, path)),
        ),
        None => report(&mut io::stderr().lock(), &summary, &analysis, cli.diagnostics, None),
    };
    reported.context("failed to write run summary")?;

    if cli.open {
        match (&output_path, format) {
            (Some(path), ExportFormat::Html) => {
                if let Err(err) = open::that(path) {
                    warn!(path = %path.display(), %err, "failed to open graph viewer");
                }
            }
            _ => warn!(%format, "--open only applies to html output; ignoring"),
        }
    }

    Ok(())
}

/// Where the graph goes: `--output`, a temp file for `--open` HTML, or stdout (`None`).
fn output_path(explicit: Option<&Path>, open: bool, format: ExportFormat) -> Option<PathBuf> {
    match (explicit, open, format) {
        (Some(path), _, _) => Some(path.to_path_buf()),
        (None, true, ExportFormat::Html) => Some(std::env::temp_dir().join("depgraph.html")),
        _ => None,
    }
}

fn report(
    out: &mut impl Write,
    summary: &RunSummary<'_>,
    analysis: &Analysis,
    diagnostics: bool,
    written: Option<(ExportFormat, &PathBuf)>,
) -> io::Result<()> {
    if let Some((format, path)) = written {
        writeln!(out, "Wrote {format} graph to {}", path.display())?;
    }
    write_summary(out, summary)?;
    if diagnostics {
        write_diagnostics(out, &analysis.diagnostics)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyGraph;
    use crate::graph::builder::Diagnostic;
    use crate::query::circular::Cycle;

    #[test]
    fn test_output_path_prefers_explicit() {
        let path = output_path(Some(Path::new("out.html")), true, ExportFormat::Html);
        assert_eq!(path, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_open_html_without_output_uses_temp_file() {
        let path = output_path(None, true, ExportFormat::Html).unwrap();
        assert_eq!(path, std::env::temp_dir().join("depgraph.html"));
    }

    #[test]
    fn test_open_ignored_for_other_formats() {
        assert_eq!(output_path(None, true, ExportFormat::Dot), None);
        assert_eq!(output_path(None, false, ExportFormat::Html), None);
    }

    #[test]
    fn test_report_includes_diagnostics_when_asked() {
        let analysis = Analysis {
            graph: DependencyGraph::new(),
            diagnostics: vec![Diagnostic::SelfImport {
                source: "a.ts".into(),
                specifier: "./a".into(),
            }],
            skipped: Vec::new(),
        };
        let stats = project_stats(&analysis.graph, DEFAULT_TOP);
        let cycles: Vec<Cycle> = Vec::new();
        let summary = RunSummary {
            stats: &stats,
            cycles: &cycles,
            skipped: 0,
            elapsed_secs: 0.0,
        };
        let mut buf = Vec::new();
        report(&mut buf, &summary, &analysis, true, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Analyzed 0 files"));
        assert!(text.contains("1 resolution diagnostics:"));
    }
}

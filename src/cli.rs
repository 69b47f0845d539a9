use std::path::PathBuf;

use clap::Parser;

use crate::export::model::ExportFormat;
use crate::language::SourceLanguage;

/// Build a module dependency graph for a TypeScript/JavaScript source tree.
///
/// depgraph parses every file matching a glob, links relative imports and
/// exported-function calls between files, reports import cycles, and writes the
/// graph as JSON, GraphViz DOT, d3 force-layout JSON, or an HTML viewer.
#[derive(Parser, Debug)]
#[command(name = "depgraph", version, about, long_about = None)]
pub struct Cli {
    /// Glob pattern selecting the files to analyze (e.g. "src/**/*.ts").
    #[arg(short, long)]
    pub glob: String,

    /// Source language; picks the extension appended to extension-less imports.
    /// Required unless set in the config file.
    #[arg(short, long, value_enum)]
    pub language: Option<SourceLanguage>,

    /// Write the graph to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format [default: json].
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Open the generated HTML graph in the system viewer (html format only).
    #[arg(long)]
    pub open: bool,

    /// Number of entries in the most-imported ranking [default: 5].
    #[arg(long)]
    pub top: Option<usize>,

    /// Print resolution diagnostics (dangling imports, self-imports, export collisions).
    #[arg(long)]
    pub diagnostics: bool,

    /// Log each processed file.
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file path [default: ./depgraph.toml].
    #[arg(long)]
    pub config: Option<PathBuf>,
}

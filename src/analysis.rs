use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::DepGraphConfig;
use crate::error::{AnalyzeError, ParseError};
use crate::graph::DependencyGraph;
use crate::graph::builder::{Diagnostic, GraphBuilder};
use crate::language::SourceLanguage;
use crate::parser::extract::{FileFacts, extract};
use crate::parser::parse_file;
use crate::walker::discover_files;

/// Stack for parser workers. Lowering recurses once per nesting level, up to
/// [`crate::parser::MAX_NESTING_DEPTH`], which the default 2 MiB rayon stack cannot hold.
const PARSE_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Everything one run produces before export.
#[derive(Debug)]
pub struct Analysis {
    pub graph: DependencyGraph,
    pub diagnostics: Vec<Diagnostic>,
    /// Files that matched the pattern but failed to read or parse, in match order.
    pub skipped: Vec<PathBuf>,
}

/// Discover, parse, and link every file matching `pattern`.
///
/// Files are parsed in parallel; results are folded into the builder in match
/// order on the calling thread, so the graph is identical across runs.
///
/// # Errors
/// [`AnalyzeError::InvalidPattern`] for a malformed glob and
/// [`AnalyzeError::NoFilesFound`] when nothing matches. Both happen before any
/// file is parsed. Per-file parse failures are not errors; see [`Analysis::skipped`].
pub fn analyze(
    pattern: &str,
    language: SourceLanguage,
    config: &DepGraphConfig,
) -> Result<Analysis, AnalyzeError> {
    let files = discover_files(pattern, config)?;
    if files.is_empty() {
        return Err(AnalyzeError::NoFilesFound {
            pattern: pattern.to_string(),
        });
    }
    info!(count = files.len(), %language, "analyzing files");

    Ok(analyze_files(files, language))
}

/// Parse and link an explicit file list. Paths are used as given (after normalization).
pub fn analyze_files(files: Vec<PathBuf>, language: SourceLanguage) -> Analysis {
    let parsed = match rayon::ThreadPoolBuilder::new()
        .stack_size(PARSE_STACK_SIZE)
        .build()
    {
        Ok(pool) => pool.install(|| parse_all(files, language)),
        Err(err) => {
            warn!(%err, "failed to start parser pool, using the global pool");
            parse_all(files, language)
        }
    };

    let mut builder = GraphBuilder::new(language);
    let mut skipped = Vec::new();
    for (path, facts) in parsed {
        match facts {
            Ok(facts) => {
                debug!(
                    path = %path.display(),
                    imports = facts.imports.len(),
                    exports = facts.exports.len(),
                    calls = facts.calls.len(),
                    "processed file"
                );
                builder.add_file(&path, facts);
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping file");
                skipped.push(path);
            }
        }
    }

    if builder.is_empty() {
        warn!("no file parsed cleanly");
    } else {
        debug!(files = builder.len(), "linking files");
    }
    let (graph, diagnostics) = builder.build();
    info!(
        files = graph.node_count(),
        skipped = skipped.len(),
        diagnostics = diagnostics.len(),
        "graph built"
    );

    Analysis {
        graph,
        diagnostics,
        skipped,
    }
}

/// Parse every file on the current rayon pool; the syntax tree is dropped on the worker.
fn parse_all(
    files: Vec<PathBuf>,
    language: SourceLanguage,
) -> Vec<(PathBuf, Result<FileFacts, ParseError>)> {
    files
        .into_par_iter()
        .map(|path| {
            let facts = parse_file(&path, language).map(|tree| extract(&tree));
            (path, facts)
        })
        .collect()
}

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that stop a run before any graph work begins.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("no files found matching pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Why a single file could not be turned into a syntax tree.
///
/// Always recovered by the caller: the file is logged and skipped.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {} at {line}:{column}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("{} nests deeper than {limit} levels at {line}:{column}", path.display())]
    TooDeep {
        path: PathBuf,
        limit: usize,
        line: usize,
        column: usize,
    },

    #[error("tree-sitter returned no tree for {}", path.display())]
    NoTree { path: PathBuf },
}

pub mod extract;
pub mod languages;
pub mod syntax;

use std::cell::RefCell;
use std::path::Path;

use tree_sitter::Parser;

use crate::error::ParseError;
use crate::language::SourceLanguage;

use languages::Grammar;
use syntax::{SyntaxTree, first_beyond_depth, first_error, lower};

fn new_parser(grammar: Grammar) -> Parser {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.language())
        .expect("bundled grammar is ABI-compatible with tree-sitter");
    parser
}

/// Deepest syntax tree accepted for lowering. Deeper files are skipped.
pub const MAX_NESTING_DEPTH: usize = 2048;

// One parser per grammar per rayon worker thread.
thread_local! {
    static PARSER_TS: RefCell<Parser> = RefCell::new(new_parser(Grammar::TypeScript));
    static PARSER_TSX: RefCell<Parser> = RefCell::new(new_parser(Grammar::Tsx));
    static PARSER_JS: RefCell<Parser> = RefCell::new(new_parser(Grammar::JavaScript));
}

/// Read and parse one source file.
///
/// # Errors
/// Returns a [`ParseError`] if the file cannot be read as UTF-8 text, does not
/// parse cleanly, or nests deeper than [`MAX_NESTING_DEPTH`]. Never panics on
/// bad input; the caller decides to skip the file.
pub fn parse_file(path: &Path, language: SourceLanguage) -> Result<SyntaxTree, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(path, &source, language)
}

/// Parse already-loaded source text. `path` selects the grammar and names the file in errors.
///
/// tree-sitter always produces a tree, recovering from syntax errors with `ERROR`
/// and `MISSING` nodes; any such node makes the whole file a parse failure so that
/// no partial node ever reaches the graph.
pub fn parse_source(
    path: &Path,
    source: &str,
    language: SourceLanguage,
) -> Result<SyntaxTree, ParseError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let grammar = Grammar::for_extension(ext, language);
    let bytes = source.as_bytes();

    let tree = match grammar {
        Grammar::TypeScript => PARSER_TS.with(|p| p.borrow_mut().parse(bytes, None)),
        Grammar::Tsx => PARSER_TSX.with(|p| p.borrow_mut().parse(bytes, None)),
        Grammar::JavaScript => PARSER_JS.with(|p| p.borrow_mut().parse(bytes, None)),
    };
    let tree = tree.ok_or_else(|| ParseError::NoTree {
        path: path.to_path_buf(),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        let pos = first_error(root)
            .map(|n| n.start_position())
            .unwrap_or_else(|| root.start_position());
        return Err(ParseError::Syntax {
            path: path.to_path_buf(),
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }

    if let Some(node) = first_beyond_depth(root, MAX_NESTING_DEPTH) {
        let pos = node.start_position();
        return Err(ParseError::TooDeep {
            path: path.to_path_buf(),
            limit: MAX_NESTING_DEPTH,
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }

    Ok(SyntaxTree {
        root: lower(root, bytes),
    })
}

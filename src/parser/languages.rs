use tree_sitter::Language;

use crate::language::SourceLanguage;

/// The tree-sitter grammar a file is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    TypeScript,
    Tsx,
    JavaScript,
}

impl Grammar {
    /// Pick the grammar for a file extension, falling back to the declared
    /// source language when the extension is not one we know.
    ///
    /// `.ts` and `.tsx` MUST use different grammars: the TypeScript grammar cannot
    /// parse JSX, and the TSX grammar rejects angle-bracket type assertions.
    pub fn for_extension(ext: &str, fallback: SourceLanguage) -> Grammar {
        match ext {
            "ts" | "mts" | "cts" => Grammar::TypeScript,
            "tsx" => Grammar::Tsx,
            "js" | "jsx" | "mjs" | "cjs" => Grammar::JavaScript,
            _ => match fallback {
                SourceLanguage::Ts => Grammar::TypeScript,
                SourceLanguage::Js => Grammar::JavaScript,
            },
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Grammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared source language of the analyzed tree.
///
/// Only affects two things: the extension appended to extension-less import
/// specifiers, and the grammar used for files whose own extension is not
/// recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    /// TypeScript (`.ts`).
    Ts,
    /// JavaScript (`.js`).
    Js,
}

impl SourceLanguage {
    /// Extension (with leading dot) appended to extension-less import targets.
    pub fn default_extension(&self) -> &'static str {
        match self {
            SourceLanguage::Ts => ".ts",
            SourceLanguage::Js => ".js",
        }
    }

    /// Bare extension used to pick a grammar for files with an unknown extension.
    pub fn grammar_extension(&self) -> &'static str {
        match self {
            SourceLanguage::Ts => "ts",
            SourceLanguage::Js => "js",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.grammar_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension() {
        assert_eq!(SourceLanguage::Ts.default_extension(), ".ts");
        assert_eq!(SourceLanguage::Js.default_extension(), ".js");
    }

    #[test]
    fn test_deserialize_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            language: SourceLanguage,
        }
        let w: Wrapper = toml::from_str("language = \"js\"").unwrap();
        assert_eq!(w.language, SourceLanguage::Js);
    }
}

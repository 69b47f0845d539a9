use std::path::Path;

use indexmap::{IndexMap, IndexSet};

/// Coarse kind of an exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// A function declaration, or a variable initialised with a function / arrow function.
    Function,
    /// Any other exported binding.
    Variable,
    /// `export default <expr>`.
    Default,
}

/// One source file in the dependency graph.
#[derive(Debug, Clone, Default)]
pub struct ModuleNode {
    /// Normalized file path; the node's identity.
    pub id: String,
    /// Relative import specifiers exactly as written, in source order.
    pub imports: Vec<String>,
    /// Resolved import targets, parallel to `imports`. Empty until edges are built.
    pub resolved_imports: Vec<String>,
    /// Exported name -> kind, in first-declaration order (last declaration wins the kind).
    pub exports: IndexMap<String, ExportKind>,
    /// Call names (`foo`, `obj.method`) in first-observation order.
    pub calls: IndexSet<String>,
}

impl ModuleNode {
    /// The file's basename, used as a display label.
    pub fn label(&self) -> String {
        basename(&self.id)
    }

    pub fn has_exports(&self) -> bool {
        !self.exports.is_empty()
    }
}

/// Basename of a node id, falling back to the whole id.
pub fn basename(id: &str) -> String {
    Path::new(id)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_owned())
}

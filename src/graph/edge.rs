/// The kind of directed edge between two files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// source -> target: the source file imports the target through a relative specifier.
    Import,
    /// source -> target: the source calls a function the target exports (name match only).
    Call,
}

/// A directed edge. `target` may name a file that is not a node (dangling import).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    /// The call name for `Call` edges; `None` for imports.
    pub label: Option<String>,
}

impl Edge {
    pub fn import(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Import,
            label: None,
        }
    }

    pub fn call(
        source: impl Into<String>,
        target: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Call,
            label: Some(name.into()),
        }
    }
}

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::language::SourceLanguage;
use crate::parser::extract::FileFacts;
use crate::resolver::{normalize_id, resolve_import};

use super::DependencyGraph;
use super::edge::Edge;
use super::node::{ExportKind, ModuleNode};

/// A resolution ambiguity noticed while building edges. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An import edge whose target is not a parsed file.
    DanglingImport {
        source: String,
        specifier: String,
        target: String,
    },
    /// A file that imports itself; no edge is emitted.
    SelfImport { source: String, specifier: String },
    /// Two files export a function with the same name; call edges go to `replacement`.
    ExportCollision {
        name: String,
        previous: String,
        replacement: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingImport {
                source,
                specifier,
                target,
            } => write!(
                f,
                "{source}: import {specifier:?} resolves to {target}, which was not analyzed"
            ),
            Diagnostic::SelfImport { source, specifier } => {
                write!(f, "{source}: import {specifier:?} resolves to the file itself")
            }
            Diagnostic::ExportCollision {
                name,
                previous,
                replacement,
            } => write!(
                f,
                "function {name:?} is exported by both {previous} and {replacement}; calls link to {replacement}"
            ),
        }
    }
}

/// Accumulates file nodes, then builds every edge in one pass once all nodes exist.
pub struct GraphBuilder {
    language: SourceLanguage,
    nodes: IndexMap<String, ModuleNode>,
}

impl GraphBuilder {
    pub fn new(language: SourceLanguage) -> Self {
        Self {
            language,
            nodes: IndexMap::new(),
        }
    }

    /// Record a successfully parsed file. Returns `false` if its normalized id was already added.
    pub fn add_file(&mut self, path: &Path, facts: FileFacts) -> bool {
        let id = normalize_id(path);
        if self.nodes.contains_key(&id) {
            debug!(path = %id, "file already added, ignoring duplicate");
            return false;
        }
        let node = ModuleNode {
            id: id.clone(),
            imports: facts.imports,
            resolved_imports: Vec::new(),
            exports: facts.exports,
            calls: facts.calls,
        };
        self.nodes.insert(id, node);
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve imports, join calls against exports, and produce the finished graph.
    pub fn build(self) -> (DependencyGraph, Vec<Diagnostic>) {
        let language = self.language;
        let mut nodes = self.nodes;
        let mut diagnostics = Vec::new();
        let mut edges = Vec::new();

        // --- Import-edge pass ---
        for node in nodes.values_mut() {
            node.resolved_imports = node
                .imports
                .iter()
                .map(|spec| resolve_import(&node.id, spec, language))
                .collect();
        }
        for node in nodes.values() {
            for (specifier, target) in node.imports.iter().zip(&node.resolved_imports) {
                if *target == node.id {
                    diagnostics.push(Diagnostic::SelfImport {
                        source: node.id.clone(),
                        specifier: specifier.clone(),
                    });
                    continue;
                }
                if !nodes.contains_key(target) {
                    diagnostics.push(Diagnostic::DanglingImport {
                        source: node.id.clone(),
                        specifier: specifier.clone(),
                        target: target.clone(),
                    });
                }
                edges.push(Edge::import(node.id.clone(), target.clone()));
            }
        }

        // --- Call-edge pass ---
        // Exported function name -> defining file. Last file in insertion order wins.
        let mut export_index: HashMap<&str, &str> = HashMap::new();
        for node in nodes.values() {
            for (name, kind) in &node.exports {
                if *kind != ExportKind::Function {
                    continue;
                }
                if let Some(previous) = export_index.insert(name, &node.id)
                    && previous != node.id
                {
                    diagnostics.push(Diagnostic::ExportCollision {
                        name: name.clone(),
                        previous: previous.to_owned(),
                        replacement: node.id.clone(),
                    });
                }
            }
        }
        for node in nodes.values() {
            for call in &node.calls {
                if let Some(&defining) = export_index.get(call.as_str())
                    && defining != node.id
                {
                    edges.push(Edge::call(node.id.clone(), defining, call.clone()));
                }
            }
        }

        let mut graph = DependencyGraph::new();
        for node in nodes.into_values() {
            graph.add_module(node);
        }
        for edge in edges {
            graph.add_edge(edge);
        }

        for diagnostic in &diagnostics {
            debug!(%diagnostic, "resolution diagnostic");
        }
        debug!(
            files = graph.node_count(),
            imports = graph.import_edge_count(),
            calls = graph.call_edge_count(),
            "graph built"
        );

        (graph, diagnostics)
    }
}

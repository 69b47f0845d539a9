pub mod builder;
pub mod edge;
pub mod node;

use indexmap::IndexMap;

use edge::{Edge, EdgeKind};
use node::ModuleNode;

/// The in-memory dependency graph: file nodes keyed by id plus an append-only edge list.
///
/// Node order is insertion order and edge order is discovery order, so every
/// export of the same input is byte-identical.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: IndexMap<String, ModuleNode>,
    edges: Vec<Edge>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file node. Returns `false` (and keeps the existing node) if the id is taken.
    pub fn add_module(&mut self, node: ModuleNode) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Append an edge. Self-loops are rejected and `false` is returned.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.source == edge.target {
            return false;
        }
        self.edges.push(edge);
        true
    }

    #[cfg(test)]
    pub fn node(&self, id: &str) -> Option<&ModuleNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// File nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ModuleNode> {
        self.nodes.values()
    }

    /// All edges in discovery order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Number of file nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn import_edge_count(&self) -> usize {
        self.edges_of_kind(EdgeKind::Import).count()
    }

    pub fn call_edge_count(&self) -> usize {
        self.edges_of_kind(EdgeKind::Call).count()
    }
}

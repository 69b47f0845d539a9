use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::Directed;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::{VisitMap, Visitable};

use crate::graph::{DependencyGraph, edge::EdgeKind};

/// A chain of files connected by import edges whose last file imports the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Files in path order, starting at the file where the cycle was closed.
    pub files: Vec<String>,
}

impl Cycle {
    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.files.iter().any(|f| f == id)
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            write!(f, "{file} -> ")?;
        }
        match self.files.first() {
            Some(first) => f.write_str(first),
            None => Ok(()),
        }
    }
}

/// Detect import cycles with a depth-first search over the import subgraph.
///
/// Only `Import` edges between analyzed files take part; a dangling target has
/// no outgoing edges and can never close a cycle. When the search meets a
/// neighbor that is still on the recursion stack, the stack segment from that
/// neighbor to the current file is reported and that branch stops. This yields
/// the first cycle along each branch, not every elementary cycle of a strongly
/// connected component.
///
/// Roots are tried in node insertion order, so the output is deterministic for
/// a fixed input order.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    // Step 1: file-only petgraph Graph with one edge per distinct import pair.
    let mut import_graph: Graph<&str, (), Directed> = Graph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();
    for node in graph.nodes() {
        let idx = import_graph.add_node(node.id.as_str());
        index.insert(node.id.as_str(), idx);
    }

    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    for edge in graph.edges_of_kind(EdgeKind::Import) {
        if let (Some(&src), Some(&dst)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
            && seen.insert((src, dst))
        {
            import_graph.add_edge(src, dst, ());
        }
    }

    // Step 2: adjacency in edge insertion order (petgraph lists newest neighbors first).
    let adjacency: Vec<Vec<NodeIndex>> = import_graph
        .node_indices()
        .map(|n| {
            let mut neighbors: Vec<NodeIndex> = import_graph.neighbors(n).collect();
            neighbors.reverse();
            neighbors
        })
        .collect();

    // Step 3: DFS from every unvisited root.
    let mut search = CycleSearch {
        graph: &import_graph,
        visited: import_graph.visit_map(),
        stack: Vec::new(),
        cycles: Vec::new(),
    };
    for root in import_graph.node_indices() {
        if !search.visited.is_visited(&root) {
            search.dfs(&adjacency, root);
        }
    }

    search.cycles
}

struct CycleSearch<'g> {
    graph: &'g Graph<&'g str, (), Directed>,
    visited: <Graph<&'g str, (), Directed> as Visitable>::Map,
    stack: Vec<NodeIndex>,
    cycles: Vec<Cycle>,
}

impl CycleSearch<'_> {
    fn dfs(&mut self, adjacency: &[Vec<NodeIndex>], node: NodeIndex) {
        self.visited.visit(node);
        self.stack.push(node);

        for &next in &adjacency[node.index()] {
            if let Some(pos) = self.stack.iter().position(|&n| n == next) {
                self.record(pos);
            } else if !self.visited.is_visited(&next) {
                self.dfs(adjacency, next);
            }
        }

        self.stack.pop();
    }

    fn record(&mut self, from: usize) {
        let files: Vec<String> = self.stack[from..]
            .iter()
            .map(|&idx| self.graph[idx].to_owned())
            .collect();
        let cycle = Cycle { files };
        if !self.cycles.contains(&cycle) {
            self.cycles.push(cycle);
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

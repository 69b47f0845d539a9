use std::collections::HashMap;

use crate::graph::{DependencyGraph, edge::EdgeKind};

/// Aggregated statistics derived from a built `DependencyGraph`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub file_count: usize,
    pub import_edges: usize,
    pub call_edges: usize,
    /// Import edges whose target is not an analyzed file.
    pub dangling_imports: usize,
    /// Most-imported targets with their incoming import-edge counts, highest first.
    pub most_imported: Vec<(String, usize)>,
}

/// Compute graph statistics, keeping the `top` most-imported targets.
///
/// Ranking counts every import edge, so a target imported twice by one file
/// counts twice. Ties are broken by target id so the ranking is stable.
pub fn project_stats(graph: &DependencyGraph, top: usize) -> GraphStats {
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    let mut dangling_imports = 0usize;

    for edge in graph.edges_of_kind(EdgeKind::Import) {
        *incoming.entry(edge.target.as_str()).or_default() += 1;
        if !graph.contains(&edge.target) {
            dangling_imports += 1;
        }
    }

    let mut ranking: Vec<(String, usize)> = incoming
        .into_iter()
        .map(|(id, count)| (id.to_owned(), count))
        .collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranking.truncate(top);

    GraphStats {
        file_count: graph.node_count(),
        import_edges: graph.import_edge_count(),
        call_edges: graph.call_edge_count(),
        dangling_imports,
        most_imported: ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;
    use crate::graph::node::ModuleNode;

    fn sample_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for id in ["a.ts", "b.ts", "c.ts", "d.ts"] {
            graph.add_module(ModuleNode {
                id: id.into(),
                ..ModuleNode::default()
            });
        }
        graph.add_edge(Edge::import("a.ts", "c.ts"));
        graph.add_edge(Edge::import("b.ts", "c.ts"));
        graph.add_edge(Edge::import("d.ts", "c.ts"));
        graph.add_edge(Edge::import("a.ts", "b.ts"));
        graph.add_edge(Edge::import("d.ts", "b.ts"));
        graph.add_edge(Edge::import("a.ts", "gone.ts"));
        graph.add_edge(Edge::call("b.ts", "a.ts", "run"));
        graph
    }

    #[test]
    fn test_counts() {
        let stats = project_stats(&sample_graph(), 5);
        assert_eq!(stats.file_count, 4);
        assert_eq!(stats.import_edges, 6);
        assert_eq!(stats.call_edges, 1);
        assert_eq!(stats.dangling_imports, 1);
    }

    #[test]
    fn test_most_imported_ranking() {
        let stats = project_stats(&sample_graph(), 2);
        assert_eq!(
            stats.most_imported,
            vec![("c.ts".to_string(), 3), ("b.ts".to_string(), 2)]
        );
    }

    #[test]
    fn test_ranking_includes_dangling_targets() {
        let stats = project_stats(&sample_graph(), 10);
        assert_eq!(stats.most_imported.len(), 3);
        assert_eq!(stats.most_imported[2], ("gone.ts".to_string(), 1));
    }

    #[test]
    fn test_ranking_ties_break_by_id() {
        let mut graph = DependencyGraph::new();
        graph.add_edge(Edge::import("main.ts", "z.ts"));
        graph.add_edge(Edge::import("main.ts", "m.ts"));
        graph.add_edge(Edge::import("main.ts", "a.ts"));
        let ids: Vec<_> = project_stats(&graph, 3)
            .most_imported
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["a.ts", "m.ts", "z.ts"]);
    }

    #[test]
    fn test_top_zero_yields_empty_ranking() {
        let stats = project_stats(&sample_graph(), 0);
        assert!(stats.most_imported.is_empty());
    }

    #[test]
    fn test_empty_graph() {
        let stats = project_stats(&DependencyGraph::new(), 5);
        assert_eq!(stats.file_count, 0);
        assert!(stats.most_imported.is_empty());
    }
}

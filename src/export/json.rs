use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::graph::edge::EdgeKind;
use crate::graph::node::ExportKind;

/// The JSON export document. Also deserializable, so an export can be read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonGraph {
    pub nodes: Vec<JsonNode>,
    pub edges: Vec<JsonEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonNode {
    pub id: String,
    pub label: String,
    pub exports: IndexMap<String, ExportKind>,
    pub calls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<&DependencyGraph> for JsonGraph {
    fn from(graph: &DependencyGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| JsonNode {
                id: n.id.clone(),
                label: n.label(),
                exports: n.exports.clone(),
                calls: n.calls.iter().cloned().collect(),
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|e| JsonEdge {
                source: e.source.clone(),
                target: e.target.clone(),
                kind: e.kind,
                label: e.label.clone(),
            })
            .collect();
        JsonGraph { nodes, edges }
    }
}

/// Render the graph as pretty-printed JSON.
pub fn render_json(graph: &DependencyGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonGraph::from(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;
    use crate::graph::node::ModuleNode;

    fn sample_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        let mut util = ModuleNode {
            id: "src/util.ts".into(),
            ..ModuleNode::default()
        };
        util.exports.insert("helper".into(), ExportKind::Function);
        util.exports.insert("VERSION".into(), ExportKind::Variable);
        let mut main = ModuleNode {
            id: "src/main.ts".into(),
            imports: vec!["./util".into(), "./missing".into()],
            ..ModuleNode::default()
        };
        main.calls.insert("helper".into());
        main.calls.insert("console.log".into());
        graph.add_module(util);
        graph.add_module(main);
        graph.add_edge(Edge::import("src/main.ts", "src/util.ts"));
        graph.add_edge(Edge::import("src/main.ts", "src/missing.ts"));
        graph.add_edge(Edge::call("src/main.ts", "src/util.ts", "helper"));
        graph
    }

    #[test]
    fn test_json_shape() {
        let json = render_json(&sample_graph()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let nodes = value["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["id"], "src/util.ts");
        assert_eq!(nodes[0]["label"], "util.ts");
        assert_eq!(nodes[0]["exports"]["helper"], "function");
        assert_eq!(nodes[0]["exports"]["VERSION"], "variable");
        assert_eq!(nodes[1]["calls"][1], "console.log");

        let edges = value["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0]["type"], "import");
        assert!(edges[0].get("label").is_none(), "import edges carry no label");
        assert_eq!(edges[2]["type"], "call");
        assert_eq!(edges[2]["label"], "helper");
    }

    #[test]
    fn test_round_trip_preserves_nodes_and_edges() {
        let graph = sample_graph();
        let json = render_json(&graph).unwrap();
        let parsed: JsonGraph = serde_json::from_str(&json).unwrap();

        let ids: Vec<_> = parsed.nodes.iter().map(|n| n.id.as_str()).collect();
        let expected_ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, expected_ids);

        let mut triples: Vec<_> = parsed
            .edges
            .iter()
            .map(|e| (e.source.clone(), e.target.clone(), e.kind))
            .collect();
        let mut expected: Vec<_> = graph
            .edges()
            .iter()
            .map(|e| (e.source.clone(), e.target.clone(), e.kind))
            .collect();
        triples.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        expected.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        assert_eq!(triples, expected);
        assert_eq!(parsed, JsonGraph::from(&graph));
    }

    #[test]
    fn test_empty_graph() {
        let json = render_json(&DependencyGraph::new()).unwrap();
        let parsed: JsonGraph = serde_json::from_str(&json).unwrap();
        assert!(parsed.nodes.is_empty());
        assert!(parsed.edges.is_empty());
    }
}

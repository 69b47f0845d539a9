use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::graph::edge::EdgeKind;

/// Force-layout document consumed by d3's `forceSimulation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D3Graph {
    pub nodes: Vec<D3Node>,
    pub links: Vec<D3Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D3Node {
    pub id: String,
    pub label: String,
    /// 1 for files with exports, 2 otherwise.
    pub group: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D3Link {
    pub source: String,
    pub target: String,
    /// Link strength: 2 for imports, 1 for calls.
    pub value: u8,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl From<&DependencyGraph> for D3Graph {
    /// Links to dangling targets are left out: `forceLink` rejects ids with no node.
    fn from(graph: &DependencyGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| D3Node {
                id: n.id.clone(),
                label: n.label(),
                group: if n.has_exports() { 1 } else { 2 },
            })
            .collect();
        let links = graph
            .edges()
            .iter()
            .filter(|e| graph.contains(&e.target))
            .map(|e| D3Link {
                source: e.source.clone(),
                target: e.target.clone(),
                value: match e.kind {
                    EdgeKind::Import => 2,
                    EdgeKind::Call => 1,
                },
                kind: e.kind,
            })
            .collect();
        D3Graph { nodes, links }
    }
}

/// Render the force-layout document as pretty-printed JSON.
pub fn render_d3(graph: &DependencyGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&D3Graph::from(graph))
}

use std::fmt::Write;

use crate::graph::DependencyGraph;
use crate::graph::edge::{Edge, EdgeKind};
use crate::graph::node::basename;

/// Escape a string for use inside a double-quoted DOT identifier or label.
pub fn escape_dot(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// DOT edge attributes for an edge, including the call label when present.
fn edge_attributes(edge: &Edge) -> String {
    match edge.kind {
        EdgeKind::Import => "style=solid color=black".to_string(),
        EdgeKind::Call => {
            let label = edge.label.as_deref().unwrap_or_default();
            format!("style=dashed color=blue label=\"{}\"", escape_dot(label))
        }
    }
}

/// Render the graph as a GraphViz `digraph`.
///
/// Every node is quoted with its full id and labeled by basename. Dangling
/// import targets are not declared; GraphViz creates them implicitly.
pub fn render_dot(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    writeln!(out, "digraph dependencies {{").unwrap();
    writeln!(out, "    node [shape=box];").unwrap();

    for node in graph.nodes() {
        writeln!(
            out,
            "    \"{}\" [label=\"{}\"];",
            escape_dot(&node.id),
            escape_dot(&basename(&node.id))
        )
        .unwrap();
    }

    for edge in graph.edges() {
        writeln!(
            out,
            "    \"{}\" -> \"{}\" [{}];",
            escape_dot(&edge.source),
            escape_dot(&edge.target),
            edge_attributes(edge)
        )
        .unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

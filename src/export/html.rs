use crate::graph::DependencyGraph;

use super::d3::D3Graph;

const TEMPLATE: &str = include_str!("graph.html");
const PLACEHOLDER: &str = "__GRAPH_DATA__";

/// Render a self-contained HTML page with the force-layout data inlined.
///
/// `</` in the payload is written as `<\/` so a file name like `</script>`
/// cannot close the inline script early.
pub fn render_html(graph: &DependencyGraph) -> serde_json::Result<String> {
    let data = serde_json::to_string(&D3Graph::from(graph))?;
    let data = data.replace("</", "<\\/");
    Ok(TEMPLATE.replace(PLACEHOLDER, &data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::edge::Edge;
    use crate::graph::node::ModuleNode;

    #[test]
    fn test_template_has_one_placeholder() {
        assert_eq!(TEMPLATE.matches(PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_payload_is_embedded() {
        let mut graph = DependencyGraph::new();
        for id in ["a.ts", "b.ts"] {
            graph.add_module(ModuleNode {
                id: id.into(),
                ..ModuleNode::default()
            });
        }
        graph.add_edge(Edge::import("a.ts", "b.ts"));

        let html = render_html(&graph).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains(PLACEHOLDER));
        assert!(html.contains("\"links\":[{\"source\":\"a.ts\",\"target\":\"b.ts\",\"value\":2,\"type\":\"import\"}]"));
        assert!(html.contains("d3.v7.min.js"));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let mut graph = DependencyGraph::new();
        graph.add_module(ModuleNode {
            id: "</script><b>x.ts".into(),
            ..ModuleNode::default()
        });
        let html = render_html(&graph).unwrap();
        assert!(html.contains("<\\/script><b>x.ts"));
        assert_eq!(html.matches("</script>").count(), 2, "only the template's own tags");
    }
}

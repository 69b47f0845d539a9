pub mod d3;
pub mod dot;
pub mod html;
pub mod json;
pub mod model;

use anyhow::Context;

use crate::graph::DependencyGraph;

use model::ExportFormat;

/// Render the finished graph in the requested format.
///
/// Renderers only read the graph, so the same graph can be exported any number of times.
pub fn render(graph: &DependencyGraph, format: ExportFormat) -> anyhow::Result<String> {
    let content = match format {
        ExportFormat::Json => json::render_json(graph).context("failed to serialize JSON graph")?,
        ExportFormat::Dot => dot::render_dot(graph),
        ExportFormat::D3 => d3::render_d3(graph).context("failed to serialize d3 graph")?,
        ExportFormat::Html => html::render_html(graph).context("failed to render HTML graph")?,
    };
    tracing::debug!(%format, bytes = content.len(), "graph rendered");
    Ok(content)
}

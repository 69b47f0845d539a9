use std::fmt;

/// Output format for graph export.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON with full node attributes (default).
    #[default]
    Json,
    /// Graphviz DOT.
    Dot,
    /// Force-layout JSON (`nodes` + `links`) for d3.
    D3,
    /// Self-contained HTML page rendering the force-layout data.
    Html,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "json",
            ExportFormat::Dot => "dot",
            ExportFormat::D3 => "d3",
            ExportFormat::Html => "html",
        };
        f.write_str(name)
    }
}

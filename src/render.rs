//! Graph renderers
//!
//! A renderer turns a [`RelationGraph`] into text for a human or another
//! tool. Layout is left to the consumer: Graphviz for DOT, the terminal for
//! the adjacency listing.

use std::str::FromStr;
use crate::graph::RelationGraph;

/// Something that can draw a relation graph.
pub trait GraphRenderer {
    fn render(&self, graph: &RelationGraph) -> String;
}

/// Adjacency listing, one node per line: `a -> b, c`.
///
/// Dangling targets get a trailing `?`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl GraphRenderer for TextRenderer {
    fn render(&self, graph: &RelationGraph) -> String {
        let mut out = String::new();
        for node in graph.nodes() {
            let label = text_label(graph, node);
            let targets: Vec<String> = graph
                .successors(node)
                .into_iter()
                .map(|t| text_label(graph, t))
                .collect();

            if targets.is_empty() {
                out.push_str(&format!("{}\n", label));
            } else {
                out.push_str(&format!("{} -> {}\n", label, targets.join(", ")));
            }
        }
        out
    }
}

fn text_label(graph: &RelationGraph, id: &str) -> String {
    if graph.is_dangling(id) {
        format!("{}?", id)
    } else {
        id.to_string()
    }
}

/// Graphviz DOT source. Dangling nodes are drawn dashed.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    pub graph_name: String,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            graph_name: "notes".to_string(),
        }
    }
}

impl GraphRenderer for DotRenderer {
    fn render(&self, graph: &RelationGraph) -> String {
        let mut dot = format!(
            "digraph \"{}\" {{\n  node [shape=box,style=rounded];\n",
            dot_escape(&self.graph_name)
        );
        for node in graph.nodes() {
            if graph.is_dangling(node) {
                dot.push_str(&format!("  \"{}\" [style=dashed];\n", dot_escape(node)));
            } else {
                dot.push_str(&format!("  \"{}\";\n", dot_escape(node)));
            }
        }
        for edge in graph.edges() {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                dot_escape(&edge.from),
                dot_escape(&edge.to)
            ));
        }
        dot.push_str("}\n");
        dot
    }
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Output format selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Text,
    Dot,
    Json,
}

impl GraphFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphFormat::Text => "text",
            GraphFormat::Dot => "dot",
            GraphFormat::Json => "json",
        }
    }

    /// Render with the matching renderer
    pub fn render(&self, graph: &RelationGraph) -> serde_json::Result<String> {
        match self {
            GraphFormat::Text => Ok(TextRenderer.render(graph)),
            GraphFormat::Dot => Ok(DotRenderer::default().render(graph)),
            GraphFormat::Json => serde_json::to_string_pretty(graph),
        }
    }
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(GraphFormat::Text),
            "dot" | "graphviz" => Ok(GraphFormat::Dot),
            "json" => Ok(GraphFormat::Json),
            _ => Err(format!("Unknown graph format: {} (expected text, dot or json)", s)),
        }
    }
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

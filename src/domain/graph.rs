//! Graph assembly: tree plus style to a serializable graph description.

use generational_arena::Index;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::style::{
    resolve_style, CanvasAttributes, EdgeAttributes, NodeAttributes, StyleConfig,
};

pub const DEFAULT_MAX_DEPTH: usize = 5;
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Structural filters applied while assembling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Nodes at this level or deeper are left out
    pub max_depth: usize,
    /// Drop nodes that have no deeper record right after them
    pub hide_leaf_nodes: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            hide_leaf_nodes: false,
        }
    }
}

impl GraphOptions {
    pub fn validate(&self) -> DomainResult<()> {
        if !(1..=MAX_DEPTH_LIMIT).contains(&self.max_depth) {
            return Err(DomainError::out_of_range(
                "max_depth",
                self.max_depth,
                1,
                MAX_DEPTH_LIMIT,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub level: usize,
    pub attributes: NodeAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub attributes: EdgeAttributes,
}

/// Everything the renderer needs: canvas, nodes and edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDescription {
    pub canvas: CanvasAttributes,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDescription {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Graphviz source for the whole graph.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph mapline {\n");

        let mut graph_attrs = vec![
            ("rankdir", quote(self.canvas.orientation.as_str())),
            ("bgcolor", quote(self.canvas.background.as_str())),
        ];
        if let Some(mark) = &self.canvas.watermark {
            graph_attrs.extend([
                ("label", quote(&mark.text)),
                ("labelloc", quote("b")),
                ("labeljust", quote("r")),
                ("fontcolor", quote(mark.font_color.as_str())),
                ("fontsize", mark.font_size.to_string()),
            ]);
        }
        out.push_str(&format!("  graph [{}];\n", attr_list(&graph_attrs)));

        for node in &self.nodes {
            let a = &node.attributes;
            let attrs = [
                ("label", quote(&node.label)),
                ("shape", quote(a.shape.as_str())),
                ("style", quote("filled")),
                ("fillcolor", quote(a.fill_color.as_str())),
                ("color", quote(a.border_color.as_str())),
                ("penwidth", a.border_width.to_string()),
                ("fontname", quote(&a.font_name)),
                ("fontcolor", quote(a.font_color.as_str())),
                ("fontsize", a.font_size.to_string()),
            ];
            out.push_str(&format!("  {} [{}];\n", quote(&node.id), attr_list(&attrs)));
        }

        for edge in &self.edges {
            let a = &edge.attributes;
            let attrs = [
                ("color", quote(a.color.as_str())),
                ("style", quote(a.style.as_str())),
                ("arrowsize", a.arrow_size.to_string()),
                ("fontcolor", quote(a.font_color.as_str())),
                ("fontsize", a.font_size.to_string()),
            ];
            out.push_str(&format!(
                "  {} -> {} [{}];\n",
                quote(&edge.from),
                quote(&edge.to),
                attr_list(&attrs)
            ));
        }

        out.push_str("}\n");
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn attr_list(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .join(", ")
}

/// Quote a DOT string literal.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

/// Assembles a graph description from a tree.
///
/// A node deeper than `max_depth` is dropped together with its subtree. Leaf
/// suppression looks at the complete tree: a node keeps its place when it has
/// children, even if depth filtering removes all of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphAssembler {
    options: GraphOptions,
}

impl GraphAssembler {
    pub fn new(options: GraphOptions) -> Self {
        Self { options }
    }

    #[instrument(level = "debug", skip_all, fields(max_depth = self.options.max_depth, hide_leaf_nodes = self.options.hide_leaf_nodes))]
    pub fn assemble(&self, tree: &TreeArena, style: &StyleConfig) -> GraphDescription {
        let resolved = resolve_style(style);
        let root_label = style.root_label();

        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        // (node, id of the emitted parent)
        let mut stack: Vec<(Index, Option<&str>)> =
            tree.roots().iter().rev().map(|&idx| (idx, None)).collect();

        while let Some((idx, parent_id)) = stack.pop() {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            let data = &node.data;

            if data.level >= self.options.max_depth {
                continue;
            }

            let visible = !(self.options.hide_leaf_nodes && node.children.is_empty());
            if visible {
                let label = match root_label {
                    Some(custom) if data.level == 0 => custom.to_string(),
                    _ => data.label.clone(),
                };
                nodes.push(GraphNode {
                    id: data.id.clone(),
                    label,
                    level: data.level,
                    attributes: resolved.node.clone(),
                });
                if let Some(parent_id) = parent_id {
                    edges.push(GraphEdge {
                        from: parent_id.to_string(),
                        to: data.id.clone(),
                        attributes: resolved.edge.clone(),
                    });
                }
            }

            // Hidden nodes are leaves, so nothing is pushed for them
            for &child in node.children.iter().rev() {
                stack.push((child, Some(data.id.as_str())));
            }
        }

        debug!(nodes = nodes.len(), edges = edges.len(), "assembled graph");
        GraphDescription {
            canvas: resolved.canvas,
            nodes,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_special_characters_when_quoting_then_escapes() {
        assert_eq!(quote(r#"say "hi"\now"#), r#""say \"hi\"\\now""#);
        assert_eq!(quote("two\nlines"), r#""two\nlines""#);
    }

    #[test]
    fn given_attribute_pairs_when_listing_then_joins_with_commas() {
        let attrs = [("shape", quote("box")), ("penwidth", "2".to_string())];
        assert_eq!(attr_list(&attrs), r#"shape="box", penwidth=2"#);
    }

    #[test]
    fn given_zero_max_depth_when_validating_then_rejects() {
        let options = GraphOptions {
            max_depth: 0,
            hide_leaf_nodes: false,
        };
        assert!(options.validate().is_err());
        assert!(GraphOptions::default().validate().is_ok());
    }
}

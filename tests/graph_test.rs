//! Tests for GraphAssembler and the DOT/JSON views of a graph description

use rstest::rstest;

use mapline::domain::{
    build_tree, parse_outline, Color, GraphAssembler, GraphDescription, GraphOptions, NodeShape,
    Orientation, StyleConfig,
};

const OUTLINE: &str = "\
- Root
  - A
    - A1
      - A1a
  - B
";

fn assemble(text: &str, options: GraphOptions, style: &StyleConfig) -> GraphDescription {
    let tree = build_tree(&parse_outline(text));
    GraphAssembler::new(options).assemble(&tree, style)
}

fn node_ids(graph: &GraphDescription) -> Vec<&str> {
    graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

fn edge_pairs(graph: &GraphDescription) -> Vec<(&str, &str)> {
    graph
        .edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect()
}

fn options(max_depth: usize, hide_leaf_nodes: bool) -> GraphOptions {
    GraphOptions {
        max_depth,
        hide_leaf_nodes,
    }
}

#[test]
fn given_default_options_when_assembling_then_emits_every_node_and_edge() {
    // Act
    let graph = assemble(OUTLINE, GraphOptions::default(), &StyleConfig::default());

    // Assert
    assert_eq!(node_ids(&graph), vec!["root", "a", "a1", "a1a", "b"]);
    assert_eq!(
        edge_pairs(&graph),
        vec![("root", "a"), ("a", "a1"), ("a1", "a1a"), ("root", "b")]
    );
    assert_eq!(graph.edge_count(), graph.node_count() - 1);
}

#[rstest]
#[case(1, vec!["root"])]
#[case(2, vec!["root", "a", "b"])]
#[case(3, vec!["root", "a", "a1", "b"])]
#[case(4, vec!["root", "a", "a1", "a1a", "b"])]
fn given_max_depth_when_assembling_then_omits_deeper_levels(
    #[case] max_depth: usize,
    #[case] expected: Vec<&str>,
) {
    // Act
    let graph = assemble(OUTLINE, options(max_depth, false), &StyleConfig::default());

    // Assert
    assert_eq!(node_ids(&graph), expected);
    assert!(graph.nodes.iter().all(|n| n.level < max_depth));
    assert!(graph
        .edges
        .iter()
        .all(|e| graph.node(&e.from).is_some() && graph.node(&e.to).is_some()));
}

#[test]
fn given_hide_leaf_nodes_when_assembling_then_drops_childless_nodes() {
    // Act
    let graph = assemble(OUTLINE, options(5, true), &StyleConfig::default());

    // Assert
    assert_eq!(node_ids(&graph), vec!["root", "a", "a1"]);
    assert_eq!(edge_pairs(&graph), vec![("root", "a"), ("a", "a1")]);
}

#[test]
fn given_hide_leaf_nodes_and_shallow_depth_when_assembling_then_leafness_uses_full_tree() {
    // A has children below the depth limit, so it stays; B never had any.
    let graph = assemble(OUTLINE, options(2, true), &StyleConfig::default());

    assert_eq!(node_ids(&graph), vec!["root", "a"]);
    assert_eq!(edge_pairs(&graph), vec![("root", "a")]);
}

#[test]
fn given_single_line_outline_with_hide_leaf_nodes_when_assembling_then_graph_is_empty() {
    let graph = assemble("- Alone\n", options(5, true), &StyleConfig::default());

    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn given_blank_outline_when_assembling_then_graph_is_empty() {
    // Act
    let graph = assemble("\n   \n", GraphOptions::default(), &StyleConfig::default());

    // Assert
    assert_eq!(graph.node_count(), 0);
    let dot = graph.to_dot();
    assert!(dot.starts_with("digraph mapline {"));
    assert!(!dot.contains("->"));
}

#[test]
fn given_custom_root_when_assembling_then_relabels_root_only() {
    // Arrange
    let style = StyleConfig {
        custom_root: Some("  My Topic ".to_string()),
        ..StyleConfig::default()
    };

    // Act
    let graph = assemble(OUTLINE, GraphOptions::default(), &style);

    // Assert
    let root = graph.node("root").unwrap();
    assert_eq!(root.label, "My Topic");
    assert_eq!(graph.node("a").unwrap().label, "A");
}

#[test]
fn given_blank_custom_root_when_assembling_then_keeps_original_label() {
    let style = StyleConfig {
        custom_root: Some("   ".to_string()),
        ..StyleConfig::default()
    };

    let graph = assemble(OUTLINE, GraphOptions::default(), &style);

    assert_eq!(graph.node("root").unwrap().label, "Root");
}

#[test]
fn given_watermark_when_rendering_dot_then_adds_canvas_label() {
    // Arrange
    let style = StyleConfig {
        watermark_text: Some("draft".to_string()),
        ..StyleConfig::default()
    };

    // Act
    let dot = assemble(OUTLINE, GraphOptions::default(), &style).to_dot();

    // Assert
    assert!(dot.contains(r#"label="draft""#));
    assert!(dot.contains(r#"labelloc="b""#));
}

#[test]
fn given_no_watermark_when_rendering_dot_then_graph_has_no_label() {
    let dot = assemble(OUTLINE, GraphOptions::default(), &StyleConfig::default()).to_dot();

    let graph_line = dot.lines().nth(1).unwrap();
    assert!(graph_line.starts_with("  graph ["));
    assert!(!graph_line.contains("label="));
}

#[test]
fn given_custom_style_when_rendering_dot_then_applies_attributes() {
    // Arrange
    let style = StyleConfig {
        orientation: Orientation::TopBottom,
        node_shape: NodeShape::Ellipse,
        node_color: Color::parse("#ff0000").unwrap(),
        bg_color: Color::parse("black").unwrap(),
        ..StyleConfig::default()
    };

    // Act
    let dot = assemble(OUTLINE, GraphOptions::default(), &style).to_dot();

    // Assert
    assert!(dot.contains(r#"rankdir="TB""#));
    assert!(dot.contains(r#"bgcolor="black""#));
    assert!(dot.contains(r#"shape="ellipse""#));
    assert!(dot.contains(r##"fillcolor="#ff0000""##));
    assert!(dot.contains(r#""root" -> "a""#));
}

#[test]
fn given_label_with_quotes_when_rendering_dot_then_escapes() {
    let dot = assemble(
        "- Say \"hi\"\n  - back\\slash\n",
        GraphOptions::default(),
        &StyleConfig::default(),
    )
    .to_dot();

    assert!(dot.contains(r#"label="Say \"hi\"""#));
    assert!(dot.contains(r#"label="back\\slash""#));
}

#[test]
fn given_graph_when_serializing_json_then_contains_nodes_and_edges() {
    // Arrange
    let graph = assemble(OUTLINE, options(2, false), &StyleConfig::default());

    // Act
    let json = graph.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    // Assert
    assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(value["edges"][0]["from"], "root");
    assert_eq!(value["edges"][0]["to"], "a");
    assert_eq!(value["canvas"]["orientation"], "LR");
}

//! Tests for TreeBuilder

use mapline::domain::{build_tree, parse_outline, OutlineRecord, TreeArena, TreeBuilder};

fn tree_from(text: &str) -> TreeArena {
    build_tree(&parse_outline(text))
}

fn ids(tree: &TreeArena) -> Vec<&str> {
    tree.iter().map(|(_, node)| node.data.id.as_str()).collect()
}

#[test]
fn given_nested_outline_when_building_then_links_parents() {
    // Arrange
    let text = "- A\n  - B\n    - C\n  - D\n";

    // Act
    let tree = tree_from(text);

    // Assert
    assert_eq!(ids(&tree), vec!["a", "b", "c", "d"]);
    assert_eq!(tree.edges(), vec![("a", "b"), ("a", "d"), ("b", "c")]);
}

#[test]
fn given_single_root_outline_when_building_then_edges_are_nodes_minus_one() {
    // Arrange
    let text = "- Root\n  - A\n    - A1\n    - A2\n  - B\n    - B1\n      - B1a\n  - C\n";

    // Act
    let tree = tree_from(text);

    // Assert
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.edges().len(), tree.len() - 1);
    assert_eq!(tree.depth(), 4);
}

#[test]
fn given_duplicate_labels_when_building_then_ids_are_unique() {
    // Arrange
    let text = "- x\n  - x\n  - X\n";

    // Act
    let tree = tree_from(text);

    // Assert
    assert_eq!(ids(&tree), vec!["x", "x_1", "x_2"]);
    assert_eq!(tree.edges(), vec![("x", "x_1"), ("x", "x_2")]);
}

#[test]
fn given_level_jump_when_building_then_attaches_to_nearest_shallower() {
    // Arrange
    let records = vec![
        OutlineRecord::new(0, "Root"),
        OutlineRecord::new(3, "Deep"),
        OutlineRecord::new(1, "Mid"),
        OutlineRecord::new(2, "Below mid"),
    ];

    // Act
    let tree = build_tree(&records);

    // Assert
    assert_eq!(tree.len(), 4);
    assert_eq!(
        tree.edges(),
        vec![("root", "deep"), ("root", "mid"), ("mid", "below_mid")]
    );
}

#[test]
fn given_return_to_shallower_level_when_building_then_pops_to_matching_ancestor() {
    // Arrange
    let records = vec![
        OutlineRecord::new(0, "R"),
        OutlineRecord::new(1, "A"),
        OutlineRecord::new(2, "A1"),
        OutlineRecord::new(3, "A1a"),
        OutlineRecord::new(1, "B"),
    ];

    // Act
    let tree = build_tree(&records);

    // Assert
    let (b_idx, _) = tree.find("b").unwrap();
    assert_eq!(tree.parent_id(b_idx), Some("r"));
}

#[test]
fn given_two_top_level_items_when_building_then_keeps_forest() {
    // Arrange
    let text = "- First\n  - Child\n- Second\n";

    // Act
    let tree = tree_from(text);

    // Assert
    assert_eq!(tree.roots().len(), 2);
    assert_eq!(tree.edges(), vec![("first", "child")]);
    let (second, _) = tree.find("second").unwrap();
    assert_eq!(tree.parent_id(second), None);
}

#[test]
fn given_outline_starting_deep_when_building_then_first_record_is_root() {
    // Arrange
    let records = vec![OutlineRecord::new(2, "Deep start"), OutlineRecord::new(3, "Child")];

    // Act
    let tree = build_tree(&records);

    // Assert
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.edges(), vec![("deep_start", "child")]);
}

#[test]
fn given_empty_records_when_building_then_tree_is_empty() {
    let tree = build_tree(&[]);

    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.depth(), 0);
    assert!(tree.edges().is_empty());
}

#[test]
fn given_reused_builder_when_building_twice_then_ids_start_fresh() {
    // Arrange
    let mut builder = TreeBuilder::new();
    let records = parse_outline("- Topic\n  - Topic\n");

    // Act
    let first = builder.build(&records);
    let second = builder.build(&records);

    // Assert
    assert_eq!(ids(&first), vec!["topic", "topic_1"]);
    assert_eq!(ids(&second), vec!["topic", "topic_1"]);
}

#[test]
fn given_outline_when_listing_leaves_then_returns_childless_labels() {
    // Arrange
    let text = "- Root\n  - A\n    - A1\n  - B\n";

    // Act
    let tree = tree_from(text);

    // Assert
    assert_eq!(tree.leaf_nodes(), vec!["A1".to_string(), "B".to_string()]);
}

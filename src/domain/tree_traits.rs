use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::TreeArena;

/// Conversion into a printable terminal tree.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &TreeArena, node_idx: Index) -> Option<Tree<String>> {
            let node = arena.get_node(node_idx)?;
            let leaves = node
                .children
                .iter()
                .filter_map(|&child| build_tree(arena, child));
            Some(Tree::new(format!("{} [{}]", node.data.label, node.data.id)).with_leaves(leaves))
        }

        match self.roots() {
            [] => Tree::new("(empty outline)".to_string()),
            [root] => build_tree(self, *root).unwrap_or_else(|| Tree::new(String::new())),
            roots => Tree::new("(outline)".to_string())
                .with_leaves(roots.iter().filter_map(|&root| build_tree(self, root))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::build_tree;
    use crate::domain::parser::parse_outline;

    #[test]
    fn given_nested_outline_when_converting_then_renders_hierarchy() {
        let tree = build_tree(&parse_outline("- Root\n  - Child\n    - Grandchild"));

        let rendered = tree.to_tree_string().to_string();

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Root [root]");
        assert!(lines[1].ends_with("Child [child]"));
        assert!(lines[2].ends_with("Grandchild [grandchild]"));
    }

    #[test]
    fn given_empty_tree_when_converting_then_shows_placeholder() {
        let tree = TreeArena::new();
        assert_eq!(tree.to_tree_string().root, "(empty outline)");
    }

    #[test]
    fn given_two_top_level_nodes_when_converting_then_wraps_in_synthetic_root() {
        let tree = build_tree(&parse_outline("- A\n- B"));

        let rendered = tree.to_tree_string();

        assert_eq!(rendered.root, "(outline)");
        assert_eq!(rendered.leaves.len(), 2);
    }
}

//! Domain layer: outline parsing, tree reconstruction and graph assembly
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod graph;
pub mod parser;
pub mod slug;
pub mod style;
pub mod tree_traits;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::{build_tree, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use graph::{GraphAssembler, GraphDescription, GraphEdge, GraphNode, GraphOptions};
pub use parser::{parse_outline, OutlineParser};
pub use slug::{slugify, IdAllocator};
pub use style::{resolve_style, ResolvedStyle, StyleConfig};
pub use tree_traits::TreeNodeConvert;

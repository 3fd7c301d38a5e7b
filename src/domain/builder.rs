//! Tree builder: rebuilds parent/child structure from outline levels.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::entities::OutlineRecord;
use crate::domain::slug::IdAllocator;

/// Constructs a tree from an ordered record sequence.
///
/// The parent of each record is the nearest preceding record with a strictly
/// smaller level. A jump of more than one level attaches to that ancestor
/// directly; no intermediate nodes are synthesized.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    ids: IdAllocator,
    stack: Vec<(usize, Index)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip_all, fields(records = records.len()))]
    pub fn build(&mut self, records: &[OutlineRecord]) -> TreeArena {
        // Reset state for a fresh conversion
        self.ids.clear();
        self.stack.clear();

        let mut tree = TreeArena::new();
        for record in records {
            let id = self.ids.allocate(&record.label);

            while self
                .stack
                .last()
                .is_some_and(|&(level, _)| level >= record.level)
            {
                self.stack.pop();
            }

            let parent = self.stack.last().map(|&(_, idx)| idx);
            if parent.is_none() && !tree.is_empty() {
                debug!(id = %id, level = record.level, "record has no shallower ancestor, adding top-level node");
            }
            trace!(id = %id, level = record.level, "insert");

            let idx = tree.insert_node(
                NodeData {
                    id,
                    label: record.label.clone(),
                    level: record.level,
                },
                parent,
            );
            self.stack.push((record.level, idx));
        }

        debug!("built tree with {} nodes", tree.len());
        tree
    }
}

/// Build a tree from records with a fresh builder.
pub fn build_tree(records: &[OutlineRecord]) -> TreeArena {
    TreeBuilder::new().build(records)
}

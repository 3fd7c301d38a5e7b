//! Node identifier allocation.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("static pattern compiles"));

const FALLBACK_SLUG: &str = "node";

/// Lower-case the label and collapse every run of non-word characters to `_`.
pub fn slugify(label: &str) -> String {
    NON_WORD
        .replace_all(&label.to_lowercase(), "_")
        .into_owned()
}

/// Hands out unique slugs within one conversion.
///
/// A slug that is already taken gets `_1`, `_2`, ... appended until it is
/// free, so the same label sequence always yields the same identifiers.
#[derive(Debug, Default)]
pub struct IdAllocator {
    allocated: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, label: &str) -> String {
        let mut base = slugify(label);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_string();
        }

        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.allocated.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }

        self.allocated.insert(candidate.clone());
        candidate
    }

    pub fn contains(&self, id: &str) -> bool {
        self.allocated.contains(id)
    }

    pub fn len(&self) -> usize {
        self.allocated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }

    pub fn clear(&mut self) {
        self.allocated.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_punctuation_and_spaces_when_slugifying_then_collapses_runs() {
        assert_eq!(slugify("Hello,  World!"), "hello_world_");
        assert_eq!(slugify("Rust & Go"), "rust_go");
        assert_eq!(slugify("already_snake"), "already_snake");
    }

    #[test]
    fn given_repeated_labels_when_allocating_then_appends_counter() {
        let mut ids = IdAllocator::new();

        assert_eq!(ids.allocate("X"), "x");
        assert_eq!(ids.allocate("x"), "x_1");
        assert_eq!(ids.allocate("X!"), "x_");
        assert_eq!(ids.allocate("X"), "x_2");
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn given_label_matching_suffixed_id_when_allocating_then_skips_taken_slot() {
        let mut ids = IdAllocator::new();

        assert_eq!(ids.allocate("a"), "a");
        assert_eq!(ids.allocate("a_1"), "a_1");
        assert_eq!(ids.allocate("a"), "a_2");
        assert_eq!(ids.allocate("a 1"), "a_1_1");
    }

    #[test]
    fn given_symbol_only_label_when_allocating_then_uses_fallback() {
        let mut ids = IdAllocator::new();

        assert_eq!(ids.allocate(""), "node");
        assert_eq!(ids.allocate(""), "node_1");
        assert_eq!(ids.allocate("?!"), "_");
    }
}

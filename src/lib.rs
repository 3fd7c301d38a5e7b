//! mapline: render indented text outlines as styled Graphviz trees.
//!
//! The pipeline is parse → build → assemble → render:
//! [`domain::OutlineParser`] turns text into level/label records,
//! [`domain::TreeBuilder`] links them into a tree with unique ids,
//! [`domain::GraphAssembler`] applies depth and leaf filtering plus the
//! resolved style, and [`infrastructure::GraphvizRenderer`] produces images.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

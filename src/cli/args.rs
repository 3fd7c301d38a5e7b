//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::config::Settings;
use crate::domain::{Color, EdgeStyle, ExportFormat, NodeShape, Orientation};

/// Render indented text outlines as styled Graphviz trees
#[derive(Parser, Debug)]
#[command(name = "mapline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Local config file (default: ./.mapline.toml when present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an outline and write the requested exports
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Export formats (default from config: renderer.formats)
        #[arg(short, long, value_delimiter = ',')]
        format: Vec<ExportFormat>,

        /// Output directory (default from config: output_dir)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output_dir: Option<PathBuf>,

        /// Base file name of the exports (default: input file stem or "outline")
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Print the Graphviz source of an outline
    Dot {
        #[command(flatten)]
        input: InputArgs,

        /// Print the graph description as JSON instead
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Show the reconstructed outline hierarchy
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented template config
    Template,
    /// Show config file locations
    Path,
}

/// Where the outline comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Outline file, `-` for stdin
    #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
    pub file: PathBuf,

    /// Spaces per nesting level
    #[arg(long)]
    pub indent_width: Option<usize>,
}

impl InputArgs {
    pub fn is_stdin(&self) -> bool {
        self.file.as_os_str() == "-"
    }
}

/// Per-invocation overrides for graph and style settings.
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Layout direction: LR, TB, RL, BT
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Omit nodes at this level or deeper
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Hide nodes without children
    #[arg(long)]
    pub hide_leaf_nodes: bool,

    /// Replace the root label
    #[arg(long)]
    pub custom_root: Option<String>,

    /// Annotate the canvas with this text
    #[arg(long)]
    pub watermark: Option<String>,

    #[arg(long)]
    pub node_color: Option<Color>,

    #[arg(long)]
    pub node_border_color: Option<Color>,

    #[arg(long)]
    pub node_border_width: Option<u32>,

    /// box, ellipse, circle, diamond, hexagon
    #[arg(long)]
    pub node_shape: Option<NodeShape>,

    #[arg(long)]
    pub node_font: Option<String>,

    #[arg(long)]
    pub node_font_color: Option<Color>,

    #[arg(long)]
    pub font_size: Option<u32>,

    #[arg(long)]
    pub edge_color: Option<Color>,

    /// solid, dashed, dotted, bold
    #[arg(long)]
    pub edge_style: Option<EdgeStyle>,

    #[arg(long)]
    pub edge_arrow_size: Option<f64>,

    #[arg(long)]
    pub edge_font_color: Option<Color>,

    #[arg(long)]
    pub edge_font_size: Option<u32>,

    #[arg(long)]
    pub bg_color: Option<Color>,
}

impl StyleArgs {
    /// Apply command-line overrides; flags win over every config layer.
    pub fn apply_to(&self, settings: &mut Settings) {
        let graph = &mut settings.graph;
        if let Some(v) = self.max_depth {
            graph.max_depth = v;
        }
        if self.hide_leaf_nodes {
            graph.hide_leaf_nodes = true;
        }

        let style = &mut settings.style;
        if let Some(v) = self.orientation {
            style.orientation = v;
        }
        if let Some(v) = &self.custom_root {
            style.custom_root = Some(v.clone());
        }
        if let Some(v) = &self.watermark {
            style.watermark_text = Some(v.clone());
        }
        if let Some(v) = &self.node_color {
            style.node_color = v.clone();
        }
        if let Some(v) = &self.node_border_color {
            style.node_border_color = v.clone();
        }
        if let Some(v) = self.node_border_width {
            style.node_border_width = v;
        }
        if let Some(v) = self.node_shape {
            style.node_shape = v;
        }
        if let Some(v) = &self.node_font {
            style.node_font = v.clone();
        }
        if let Some(v) = &self.node_font_color {
            style.node_font_color = v.clone();
        }
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = &self.edge_color {
            style.edge_color = v.clone();
        }
        if let Some(v) = self.edge_style {
            style.edge_style = v;
        }
        if let Some(v) = self.edge_arrow_size {
            style.edge_arrow_size = v;
        }
        if let Some(v) = &self.edge_font_color {
            style.edge_font_color = v.clone();
        }
        if let Some(v) = self.edge_font_size {
            style.edge_font_size = v;
        }
        if let Some(v) = &self.bg_color {
            style.bg_color = v.clone();
        }
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mapline/mapline.toml`
//! 3. Local config: `--config <file>` or `./.mapline.toml`
//! 4. Environment variables: `MAPLINE_*` prefix (`__` separates sections)
//!
//! Command-line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::services::ConversionOptions;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::parser::DEFAULT_INDENT_WIDTH;
use crate::domain::{ExportFormat, GraphOptions, StyleConfig};
use crate::infrastructure::renderer::DEFAULT_COMMAND;

pub const ENV_PREFIX: &str = "MAPLINE";
pub const LOCAL_CONFIG_FILE: &str = ".mapline.toml";

/// External renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RendererConfig {
    /// Graphviz executable (name on PATH or absolute path)
    pub command: String,
    /// Formats written by `render` when none are given on the command line
    pub formats: Vec<ExportFormat>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            formats: vec![ExportFormat::Png],
        }
    }
}

/// Unified configuration for mapline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory for exported files (default: current directory)
    pub output_dir: PathBuf,
    /// Spaces per outline nesting level
    pub indent_width: usize,
    /// Depth limit and leaf suppression
    pub graph: GraphOptions,
    /// Visual style
    pub style: StyleConfig,
    /// Graphviz invocation
    pub renderer: RendererConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            indent_width: DEFAULT_INDENT_WIDTH,
            graph: GraphOptions::default(),
            style: StyleConfig::default(),
            renderer: RendererConfig::default(),
        }
    }
}

/// Get the XDG config directory for mapline.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mapline").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mapline.toml"))
}

/// Local config file in the working directory.
pub fn local_config_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_FILE)
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file; it must exist when given.
    ///   Without it `./.mapline.toml` is used if present.
    pub fn load(local: Option<&Path>) -> ApplicationResult<Self> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), local)
    }

    /// Load with an explicit global file, skipping XDG discovery.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> ApplicationResult<Self> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(global_path) = global {
            debug!("global config: {}", global_path.display());
            builder = builder.add_source(
                File::from(global_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        match local {
            Some(path) => {
                debug!("local config: {}", path.display());
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                let path = local_config_path();
                if path.exists() {
                    debug!("local config: {}", path.display());
                    builder = builder.add_source(File::from(path).format(FileFormat::Toml));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("renderer.formats")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        // Expand ~ and $VAR in path-like fields
        settings.expand_paths();
        settings.validate()?;

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.output_dir.to_string_lossy().as_ref());
        self.output_dir = PathBuf::from(expanded);
        self.renderer.command = expand_env_vars(&self.renderer.command);
    }

    /// Reject out-of-range values before they reach the renderer.
    pub fn validate(&self) -> ApplicationResult<()> {
        self.conversion_options().validate()?;
        if self.renderer.command.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "renderer.command must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Options for a single conversion.
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            indent_width: self.indent_width,
            graph: self.graph,
            style: self.style.clone(),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# mapline configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/mapline/mapline.toml
#   Local:  ./.mapline.toml or --config <file>
#   Env:    MAPLINE_* environment variables, e.g. MAPLINE_STYLE__NODE_SHAPE=ellipse
#   Flags:  command-line options

# Directory for exported files
# output_dir = "."

# Spaces per nesting level in the outline (1-8)
# indent_width = 2

[graph]
# Nodes at this level or deeper are omitted (1-64)
# max_depth = 5
# Hide nodes without children
# hide_leaf_nodes = false

[style]
# LR, TB, RL or BT
# orientation = "LR"
# node_color = "#e3f2fd"
# node_border_color = "#1e88e5"
# node_border_width = 1        # 0-10
# box, ellipse, circle, diamond or hexagon
# node_shape = "box"
# node_font = "Helvetica"
# node_font_color = "#0d47a1"
# font_size = 14               # 1-96
# edge_color = "#546e7a"
# solid, dashed, dotted or bold
# edge_style = "solid"
# edge_arrow_size = 1.0        # 0.0-5.0
# edge_font_color = "#37474f"
# edge_font_size = 10          # 1-96
# bg_color = "white"
# custom_root = "My Topic"
# watermark_text = "draft"

[renderer]
# Graphviz executable
# command = "dot"
# Formats written by `mapline render`: png, svg, pdf, dot, json, outline
# formats = ["png"]
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_validating_then_passes() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn given_defaults_when_serializing_then_round_trips_through_toml() {
        let settings = Settings::default();

        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();

        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsing_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_tilde_in_output_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            output_dir: PathBuf::from("~/maps"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.output_dir.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_empty_renderer_command_when_validating_then_errors() {
        let mut settings = Settings::default();
        settings.renderer.command = "  ".to_string();

        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }
}

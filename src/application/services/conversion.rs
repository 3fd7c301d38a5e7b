//! Conversion service: outline text to graph description and exports
//!
//! Each conversion is self-contained. The returned [`Conversion`] carries the
//! original text, the options used, the tree and the graph description; the
//! export methods only read from it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::parser::DEFAULT_INDENT_WIDTH;
use crate::domain::{
    ExportFormat, GraphAssembler, GraphDescription, GraphOptions, OutlineParser, OutlineRecord,
    StyleConfig, TreeArena, TreeBuilder,
};
use crate::infrastructure::traits::{FileSystem, Renderer};
use crate::infrastructure::InfraResult;

/// All inputs to one conversion besides the outline text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub indent_width: usize,
    pub graph: GraphOptions,
    pub style: StyleConfig,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            graph: GraphOptions::default(),
            style: StyleConfig::default(),
        }
    }
}

impl ConversionOptions {
    pub fn validate(&self) -> ApplicationResult<()> {
        OutlineParser::new(self.indent_width)?;
        self.graph.validate()?;
        self.style.validate()?;
        Ok(())
    }
}

/// Result of converting one outline.
#[derive(Debug)]
pub struct Conversion {
    pub outline: String,
    pub options: ConversionOptions,
    pub records: Vec<OutlineRecord>,
    pub tree: TreeArena,
    pub graph: GraphDescription,
}

impl Conversion {
    /// Number of nodes in the emitted graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Graphviz source of the graph description.
    pub fn dot(&self) -> String {
        self.graph.to_dot()
    }
}

/// One requested export and its outcome.
#[derive(Debug)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub payload: InfraResult<Vec<u8>>,
}

impl ExportArtifact {
    pub fn is_ok(&self) -> bool {
        self.payload.is_ok()
    }
}

/// Converts outlines and produces exports.
pub struct ConversionService {
    fs: Arc<dyn FileSystem>,
    renderer: Arc<dyn Renderer>,
}

impl ConversionService {
    pub fn new(fs: Arc<dyn FileSystem>, renderer: Arc<dyn Renderer>) -> Self {
        Self { fs, renderer }
    }

    /// Parse, build and assemble in one blocking call.
    ///
    /// Only invalid options fail; any outline text converts, blank input
    /// yields an empty graph.
    #[instrument(level = "debug", skip_all, fields(bytes = outline.len()))]
    pub fn convert(&self, outline: &str, options: &ConversionOptions) -> ApplicationResult<Conversion> {
        options.validate()?;

        let parser = OutlineParser::new(options.indent_width)?;
        let records = parser.parse(outline);
        let tree = TreeBuilder::new().build(&records);
        let graph = GraphAssembler::new(options.graph).assemble(&tree, &options.style);

        if tree.roots().len() > 1 {
            warn!(
                "outline has {} top-level items, expected one root",
                tree.roots().len()
            );
        }
        info!(
            records = records.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "converted outline"
        );

        Ok(Conversion {
            outline: outline.to_string(),
            options: options.clone(),
            records,
            tree,
            graph,
        })
    }

    /// Read an outline file and convert it.
    pub fn convert_file(&self, path: &Path, options: &ConversionOptions) -> ApplicationResult<Conversion> {
        let outline = self
            .fs
            .read_to_string(path)
            .with_path_context("read outline", path)?;
        self.convert(&outline, options)
    }

    /// Produce a single export.
    ///
    /// Text formats never touch the renderer and always succeed.
    pub fn export(&self, conversion: &Conversion, format: ExportFormat) -> InfraResult<Vec<u8>> {
        match format {
            ExportFormat::Dot => Ok(conversion.dot().into_bytes()),
            ExportFormat::Json => Ok(conversion.graph.to_json()?.into_bytes()),
            ExportFormat::Outline => Ok(conversion.outline.clone().into_bytes()),
            ExportFormat::Png | ExportFormat::Svg | ExportFormat::Pdf => {
                self.renderer.render(&conversion.dot(), format)
            }
        }
    }

    /// Produce every requested export; a failing format does not stop the others.
    #[instrument(level = "debug", skip(self, conversion))]
    pub fn export_all(&self, conversion: &Conversion, formats: &[ExportFormat]) -> Vec<ExportArtifact> {
        formats
            .iter()
            .copied()
            .unique()
            .map(|format| {
                let payload = self.export(conversion, format);
                if let Err(e) = &payload {
                    warn!("export {} failed: {}", format, e);
                }
                ExportArtifact { format, payload }
            })
            .collect()
    }

    /// Write an export payload to `<dir>/<stem>.<extension>`.
    pub fn write_artifact(
        &self,
        dir: &Path,
        stem: &str,
        format: ExportFormat,
        bytes: &[u8],
    ) -> ApplicationResult<PathBuf> {
        let path = dir.join(format!("{}.{}", stem, format.extension()));
        self.fs
            .ensure_parent(&path)
            .with_path_context("create output directory", &path)?;
        self.fs
            .write_bytes(&path, bytes)
            .with_path_context("write export", &path)?;
        debug!("wrote {}", path.display());
        Ok(path)
    }
}

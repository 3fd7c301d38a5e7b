//! Graphviz renderer: runs `dot` in a scoped working directory.

use std::io;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::domain::ExportFormat;
use crate::infrastructure::traits::{CommandRunner, FileSystem, Renderer};
use crate::infrastructure::{InfraError, InfraResult};

pub const DEFAULT_COMMAND: &str = "dot";

const SOURCE_FILE: &str = "graph.dot";

/// Renders graphs by shelling out to Graphviz.
///
/// Every call gets its own temporary directory holding the source and the
/// produced image. The directory is removed when the call returns, whether
/// rendering succeeded or not.
pub struct GraphvizRenderer {
    command: String,
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
}

impl GraphvizRenderer {
    pub fn new(command: impl Into<String>, fs: Arc<dyn FileSystem>, cmd: Arc<dyn CommandRunner>) -> Self {
        Self {
            command: command.into(),
            fs,
            cmd,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Renderer for GraphvizRenderer {
    #[instrument(level = "debug", skip(self, dot_source), fields(command = %self.command))]
    fn render(&self, dot_source: &str, format: ExportFormat) -> InfraResult<Vec<u8>> {
        if !format.is_rendered() {
            return Err(InfraError::Renderer {
                format,
                message: "not an image format".to_string(),
                exit_code: None,
            });
        }

        let workdir = tempfile::Builder::new()
            .prefix("mapline-")
            .tempdir()
            .map_err(|e| InfraError::io("create renderer working directory", e))?;
        let source = workdir.path().join(SOURCE_FILE);
        let target = workdir.path().join(format!("graph.{}", format.extension()));

        self.fs
            .write(&source, dot_source)
            .map_err(|e| InfraError::io(format!("write {}", source.display()), e))?;

        let type_flag = format!("-T{}", format.as_str());
        let source_arg = source.to_string_lossy();
        let target_arg = target.to_string_lossy();
        let args = [type_flag.as_str(), source_arg.as_ref(), "-o", target_arg.as_ref()];
        debug!(?args, "invoking renderer");

        let output = match self.cmd.run(&self.command, &args) {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(InfraError::RendererUnavailable {
                    command: self.command.clone(),
                    reason: "executable not found".to_string(),
                });
            }
            Err(e) => return Err(InfraError::io(format!("run {}", self.command), e)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(InfraError::Renderer {
                format,
                message: if stderr.is_empty() {
                    format!("{} exited with {}", self.command, output.status)
                } else {
                    stderr
                },
                exit_code: output.status.code(),
            });
        }

        let bytes = self
            .fs
            .read(&target)
            .map_err(|e| InfraError::io(format!("read {}", target.display()), e))?;
        debug!(bytes = bytes.len(), "rendered {}", format);

        if let Err(e) = workdir.close() {
            warn!("cannot remove renderer working directory: {}", e);
        }
        Ok(bytes)
    }
}

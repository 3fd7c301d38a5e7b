//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ExportFormat;

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer unavailable: {command} ({reason})")]
    RendererUnavailable { command: String, reason: String },

    #[error("renderer failed for {format}: {message}")]
    Renderer {
        format: ExportFormat,
        message: String,
        exit_code: Option<i32>,
    },

    #[error("cannot serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the error comes from the external renderer.
    pub fn is_renderer(&self) -> bool {
        matches!(
            self,
            InfraError::RendererUnavailable { .. } | InfraError::Renderer { .. }
        )
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;

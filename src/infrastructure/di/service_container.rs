//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ConversionService;
use crate::config::Settings;
use crate::infrastructure::renderer::GraphvizRenderer;
use crate::infrastructure::traits::{
    CommandRunner, FileSystem, RealCommandRunner, RealFileSystem, Renderer,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Image renderer (Graphviz by default)
    pub renderer: Arc<dyn Renderer>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let cmd: Arc<dyn CommandRunner> = Arc::new(RealCommandRunner);
        let renderer = Arc::new(GraphvizRenderer::new(
            settings.renderer.command.clone(),
            Arc::clone(&fs),
            cmd,
        ));
        Self::with_deps(settings, fs, renderer)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            renderer,
        }
    }

    pub fn conversion_service(&self) -> ConversionService {
        ConversionService::new(Arc::clone(&self.fs), Arc::clone(&self.renderer))
    }
}

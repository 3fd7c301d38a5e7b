//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Renderer)
//! but are themselves concrete structs, not traits.

mod conversion;

pub use conversion::{Conversion, ConversionOptions, ConversionService, ExportArtifact};

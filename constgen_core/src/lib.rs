// constgen - exposes the enumerator constants of a C header as Python enum/flag classes

pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod registry;
pub mod scanner;

// Re-export commonly used items for convenience
pub use config::GeneratorConfig;
pub use error::{ConstgenError, Result};
pub use generator::{GenerationReport, generate, generate_to_writer, generate_with_report};
pub use registry::{CONSTANT_CLASSES, ConstantClass, EnumKind};
pub use scanner::{Constant, collect_constants, scan};

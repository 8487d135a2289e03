// Autoblob - generates the C file that includes every configured header for layout extraction

pub mod config;
pub mod error;
pub mod generator;

// Re-export commonly used items for convenience
pub use config::Configuration;
pub use error::{AutoblobError, Result};
pub use generator::{CFileGenerator, GeneratedFile, IncludeSource};

pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use error::GeneratorError;
pub use transform::document::Document;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a loaded document.
pub trait CodeGenerator {
    fn generate(
        &self,
        document: &Document,
        config: &config::TfgenConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}

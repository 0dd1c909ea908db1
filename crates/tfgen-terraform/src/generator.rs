use tfgen_core::config::TfgenConfig;
use tfgen_core::transform::name_normalizer::normalize_name;
use tfgen_core::transform::{PathResolver, SchemaResolver};
use tfgen_core::{CodeGenerator, Document, GeneratedFile, GeneratorError};

use crate::emitters::data_source::{DataSourceOptions, emit_data_source};

/// Terraform plugin framework data source generator.
pub struct TerraformGenerator;

impl CodeGenerator for TerraformGenerator {
    fn generate(
        &self,
        document: &Document,
        config: &TfgenConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let paths = PathResolver::new(document);
        let schemas = SchemaResolver::new(document);
        let options = DataSourceOptions {
            package: &config.package,
            provider: &config.provider,
        };

        config
            .data_sources
            .iter()
            .map(|data_source| -> Result<GeneratedFile, GeneratorError> {
                log::info!("generating data source {}", data_source.name);
                let path = paths.resolve_path(&data_source.path)?;
                let response = match &data_source.schema {
                    Some(schema) => schemas.resolve(schema)?,
                    None => path.get.response.clone(),
                };
                let content = emit_data_source(data_source, &path, &response, &options)?;
                Ok(GeneratedFile {
                    path: format!(
                        "{}_data_source.go",
                        normalize_name(&data_source.name).snake_case
                    ),
                    content,
                })
            })
            .collect()
    }
}

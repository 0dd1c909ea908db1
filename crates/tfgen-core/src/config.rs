use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.tfgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TfgenConfig {
    /// OpenAPI document to read.
    pub input: String,
    /// Directory generated Go files are written to.
    pub output: String,
    /// Go package name of the generated files.
    pub package: String,
    /// Terraform provider type prefix, e.g. `msgraph` in `msgraph_user`.
    pub provider: String,
    pub data_sources: Vec<DataSourceConfig>,
}

impl Default for TfgenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "internal/provider".to_string(),
            package: "provider".to_string(),
            provider: "msgraph".to_string(),
            data_sources: Vec::new(),
        }
    }
}

/// One data source to generate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSourceConfig {
    /// Resource name, e.g. `user`.
    pub name: String,
    /// GET path the data source reads, e.g. `/users/{user-id}`.
    pub path: String,
    /// Schema to resolve instead of the path's response type.
    #[serde(default)]
    pub schema: Option<String>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".tfgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<TfgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: TfgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# msgraph-tfgen configuration
input: openapi.yaml
output: internal/provider
package: provider
provider: msgraph

data_sources:
  - name: user
    path: /users/{user-id}
  # - name: site
  #   path: /sites/{site-id}
  #   schema: microsoft.graph.site   # overrides the path's response type
"#
}

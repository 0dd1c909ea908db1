use std::path::Path;

use crate::error::{Location, ParseError, ResolveError};
use crate::parse::operation::PathItem;
use crate::parse::parameter::{Parameter, ParameterOrRef};
use crate::parse::response::{Response, ResponseOrRef};
use crate::parse::schema::{Schema, SchemaOrRef};
use crate::parse::spec::{Info, OpenApiSpec};

/// A loaded OpenAPI document and its named-definition index.
///
/// Built once per run and only ever borrowed immutably by the resolvers, so
/// several documents can live side by side in one process.
#[derive(Debug, Clone)]
pub struct Document {
    spec: OpenApiSpec,
}

impl Document {
    pub fn new(spec: OpenApiSpec) -> Self {
        Self { spec }
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        crate::parse::load(path).map(Self::new)
    }

    pub fn from_yaml(input: &str) -> Result<Self, ParseError> {
        crate::parse::from_yaml(input).map(Self::new)
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn info(&self) -> &Info {
        &self.spec.info
    }

    /// Named component schema by its key, e.g. `microsoft.graph.user`.
    pub fn schema(&self, name: &str) -> Option<&SchemaOrRef> {
        self.spec
            .components
            .as_ref()
            .and_then(|c| c.schemas.get(name))
    }

    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.spec
            .components
            .iter()
            .flat_map(|c| c.schemas.keys())
            .map(String::as_str)
    }

    pub fn path_item(&self, path: &str) -> Option<&PathItem> {
        self.spec.paths.get(path)
    }

    /// Follow a parameter reference into `components.parameters`.
    pub fn parameter<'d>(
        &'d self,
        parameter: &'d ParameterOrRef,
        location: &Location,
    ) -> Result<&'d Parameter, ResolveError> {
        match parameter {
            ParameterOrRef::Parameter(p) => Ok(p),
            ParameterOrRef::Ref { ref_path } => {
                let target = parse_ref_name(ref_path, "parameters")
                    .and_then(|name| self.spec.components.as_ref()?.parameters.get(name));
                match target {
                    Some(ParameterOrRef::Parameter(p)) => Ok(p),
                    _ => Err(ResolveError::unresolvable(location.clone(), ref_path)),
                }
            }
        }
    }

    /// Follow a response reference into `components.responses`.
    pub fn response<'d>(
        &'d self,
        response: &'d ResponseOrRef,
        location: &Location,
    ) -> Result<&'d Response, ResolveError> {
        match response {
            ResponseOrRef::Response(r) => Ok(r),
            ResponseOrRef::Ref { ref_path } => {
                let target = parse_ref_name(ref_path, "responses")
                    .and_then(|name| self.spec.components.as_ref()?.responses.get(name));
                match target {
                    Some(ResponseOrRef::Response(r)) => Ok(r),
                    _ => Err(ResolveError::unresolvable(location.clone(), ref_path)),
                }
            }
        }
    }

    /// Schema behind a parameter or media type, following one `$ref` level.
    pub fn schema_of<'d>(
        &'d self,
        schema: &'d SchemaOrRef,
        location: &Location,
    ) -> Result<&'d Schema, ResolveError> {
        match schema {
            SchemaOrRef::Schema(s) => Ok(s),
            SchemaOrRef::Ref { ref_path, .. } => parse_ref_name(ref_path, "schemas")
                .and_then(|name| self.schema(name))
                .and_then(SchemaOrRef::as_schema)
                .ok_or_else(|| ResolveError::unresolvable(location.clone(), ref_path)),
        }
    }
}

/// Extract the name from a `$ref` of the form `#/components/<section>/<name>`.
pub fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Option<&'a str> {
    let stripped = ref_path.strip_prefix("#/components/")?;
    let (section, name) = stripped.split_once('/')?;
    (section == expected_section && !name.is_empty()).then_some(name)
}

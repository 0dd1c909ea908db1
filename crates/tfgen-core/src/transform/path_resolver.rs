use crate::error::{Location, ResolveError};
use crate::ir::{GetOperation, PathObject, SchemaObject};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::response::Response;
use crate::parse::schema::SchemaOrRef;

use super::document::Document;
use super::schema_resolver::{SchemaResolver, enum_strings};

const SELECT_PARAMETER: &str = "$select";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Resolves an operation path into its parameters, `$select` fields and
/// response type.
pub struct PathResolver<'a> {
    document: &'a Document,
    schemas: SchemaResolver<'a>,
}

impl<'a> PathResolver<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            schemas: SchemaResolver::new(document),
        }
    }

    pub fn resolve_path(&self, path: &str) -> Result<PathObject, ResolveError> {
        log::debug!("resolving path {path}");
        let location = Location::new(path);
        let item = self
            .document
            .path_item(path)
            .ok_or_else(|| ResolveError::unresolvable(location.clone(), path))?;

        let get = item.get.as_ref().ok_or_else(|| {
            ResolveError::unsupported(location.clone(), "path has no GET operation")
        })?;

        let parameters = self.path_parameters(item, get, &location)?;
        let select_parameters = self.select_parameters(item, get, &location)?;
        let response = self.response_schema(get, path, &location)?;

        Ok(PathObject {
            path: path.to_string(),
            description: item.description.clone(),
            parameters,
            get: GetOperation {
                summary: get.summary.clone(),
                description: get.description.clone(),
                select_parameters,
                response,
            },
        })
    }

    /// Path-level parameters first, then any the GET operation adds.
    fn path_parameters(
        &self,
        item: &PathItem,
        get: &Operation,
        location: &Location,
    ) -> Result<Vec<String>, ResolveError> {
        let mut names: Vec<String> = Vec::new();
        for parameter in self.parameters(item, get, location)? {
            if parameter.location == ParameterLocation::Path && !names.contains(&parameter.name) {
                names.push(parameter.name.clone());
            }
        }
        Ok(names)
    }

    /// The enum declared on the `$select` query parameter's item schema.
    fn select_parameters(
        &self,
        item: &PathItem,
        get: &Operation,
        location: &Location,
    ) -> Result<Vec<String>, ResolveError> {
        let select_location = location.clone().with_property(SELECT_PARAMETER);
        let select = self
            .parameters(item, get, location)?
            .into_iter()
            .find(|p| p.name == SELECT_PARAMETER && p.location == ParameterLocation::Query)
            .ok_or_else(|| {
                ResolveError::unsupported(
                    select_location.clone(),
                    "GET operation declares no $select query parameter",
                )
            })?;

        let schema = select.schema.as_ref().ok_or_else(|| {
            ResolveError::unsupported(select_location.clone(), "$select parameter has no schema")
        })?;
        let schema = self.document.schema_of(schema, &select_location)?;
        let enumerated = match schema.items.as_deref() {
            Some(items) => self.document.schema_of(items, &select_location)?,
            None => schema,
        };

        if enumerated.enum_values.is_empty() {
            return Err(ResolveError::unsupported(
                select_location,
                "$select parameter declares no enum",
            ));
        }

        Ok(enum_strings(enumerated))
    }

    fn response_schema(
        &self,
        get: &Operation,
        path: &str,
        location: &Location,
    ) -> Result<SchemaObject, ResolveError> {
        let response_location = location.clone().with_property("responses.200");
        let response = get
            .responses
            .get("200")
            .or_else(|| get.responses.get("2XX"))
            .ok_or_else(|| {
                ResolveError::unsupported(
                    response_location.clone(),
                    "GET operation declares no 200 response",
                )
            })?;
        let response = self.document.response(response, &response_location)?;

        let schema = json_schema(response).ok_or_else(|| {
            ResolveError::unsupported(
                response_location.clone(),
                "200 response has no application/json schema",
            )
        })?;

        self.schemas.resolve_inline(&format!("{path} (response)"), schema)
    }

    fn parameters<'d>(
        &'d self,
        item: &'d PathItem,
        get: &'d Operation,
        location: &Location,
    ) -> Result<Vec<&'d Parameter>, ResolveError> {
        item.parameters
            .iter()
            .chain(get.parameters.iter())
            .map(|p| self.document.parameter(p, location))
            .collect()
    }
}

fn json_schema(response: &Response) -> Option<&SchemaOrRef> {
    response
        .content
        .get(JSON_CONTENT_TYPE)
        .or_else(|| {
            response
                .content
                .iter()
                .find(|(content_type, _)| content_type.starts_with(JSON_CONTENT_TYPE))
                .map(|(_, media)| media)
        })
        .and_then(|media| media.schema.as_ref())
}

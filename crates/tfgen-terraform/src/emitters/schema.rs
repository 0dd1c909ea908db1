use minijinja::context;
use serde::Serialize;
use tfgen_core::GeneratorError;
use tfgen_core::ir::{Declaration, SchemaObject, emission_rule};

use super::{attribute_name, render};
use crate::type_mapper::{attribute_kind, element_type};

/// Indent of a top-level attribute inside `schema.Schema{Attributes: ...}`.
const ROOT_INDENT: &str = "\t\t\t";

/// One attribute declaration; nested attributes carry their children.
#[derive(Debug, Serialize)]
struct AttributeContext {
    name: String,
    kind: &'static str,
    indent: String,
    required: bool,
    element_type: Option<&'static str>,
    /// `single`, `list`, or empty for leaf attributes.
    nesting: &'static str,
    attributes: Vec<AttributeContext>,
}

/// Emit the `schema.Schema` constructor function for a data source.
///
/// Path parameters are the only required attributes; everything read from
/// the response is computed.
pub fn emit_schema(
    function_name: &str,
    description: Option<&str>,
    path_parameters: &[String],
    response: &SchemaObject,
) -> Result<String, GeneratorError> {
    let mut attributes: Vec<AttributeContext> = path_parameters
        .iter()
        .map(|p| AttributeContext {
            name: attribute_name(p),
            kind: "schema.StringAttribute",
            indent: ROOT_INDENT.to_string(),
            required: true,
            element_type: None,
            nesting: "",
            attributes: Vec::new(),
        })
        .collect();
    attributes.extend(declare(response, ROOT_INDENT));

    render(
        "schema.go.j2",
        include_str!("../../templates/schema.go.j2"),
        context! {
            function_name => function_name,
            description => description.unwrap_or_default(),
            attributes => attributes,
        },
    )
}

fn declare(schema: &SchemaObject, indent: &str) -> Vec<AttributeContext> {
    schema
        .properties
        .iter()
        .map(|property| {
            let rule = emission_rule(property);
            let nested = property.nested.as_ref();
            let (nesting, children) = match rule.declaration {
                Declaration::SingleNested => (
                    "single",
                    nested
                        .map(|n| declare(n, &format!("{indent}\t\t")))
                        .unwrap_or_default(),
                ),
                Declaration::ListNested => (
                    "list",
                    nested
                        .map(|n| declare(n, &format!("{indent}\t\t\t")))
                        .unwrap_or_default(),
                ),
                Declaration::EmptyNested => ("single", Vec::new()),
                _ => ("", Vec::new()),
            };
            let element = match rule.declaration {
                Declaration::List(element) => Some(element_type(element)),
                _ => None,
            };
            log::trace!("declaring {} as {:?}", property.name, rule.declaration);

            AttributeContext {
                name: attribute_name(&property.name),
                kind: attribute_kind(rule.declaration),
                indent: indent.to_string(),
                required: false,
                element_type: element,
                nesting,
                attributes: children,
            }
        })
        .collect()
}

use minijinja::context;
use serde::Serialize;
use tfgen_core::GeneratorError;
use tfgen_core::ir::emission_rule;

use super::{ObjectNode, attribute_name, go_field_name, render};
use crate::type_mapper::field_type;

#[derive(Debug, Serialize)]
struct ModelContext {
    name: String,
    fields: Vec<FieldContext>,
}

#[derive(Debug, Serialize)]
struct FieldContext {
    name: String,
    go_type: String,
    tag: String,
}

/// Emit one state model struct per object node.
///
/// The root struct also carries the path parameters.
pub(crate) fn emit_models(
    nodes: &[ObjectNode<'_>],
    path_parameters: &[String],
) -> Result<String, GeneratorError> {
    let models: Vec<ModelContext> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let parameters: &[String] = if i == 0 { path_parameters } else { &[] };
            let mut fields: Vec<FieldContext> = parameters
                .iter()
                .map(|p| FieldContext {
                    name: go_field_name(p),
                    go_type: "types.String".to_string(),
                    tag: attribute_name(p),
                })
                .collect();
            fields.extend(node.schema.properties.iter().map(|property| {
                let rule = emission_rule(property);
                FieldContext {
                    name: go_field_name(&property.name),
                    go_type: field_type(rule.field, &node.child_struct(property)),
                    tag: attribute_name(&property.name),
                }
            }));
            ModelContext {
                name: node.struct_name.clone(),
                fields,
            }
        })
        .collect();

    render(
        "model.go.j2",
        include_str!("../../templates/model.go.j2"),
        context! { models => models },
    )
}

use minijinja::context;
use serde::Serialize;
use tfgen_core::GeneratorError;
use tfgen_core::ir::{ElementType, Extraction, FieldType, SchemaProperty, emission_rule};

use super::{ObjectNode, accessor_name, go_field_name, render};
use crate::type_mapper::{element_type, null_value, placeholder_value, value_expression};

#[derive(Debug, Serialize)]
struct MappingContext {
    struct_name: String,
    interface: String,
    statements: Vec<StatementContext>,
}

/// One nil-guarded copy from an SDK accessor into a model field.
#[derive(Debug, Serialize)]
struct StatementContext {
    field: String,
    accessor: String,
    /// `scalar`, `list`, `nested`, `nested_list` or `placeholder`.
    extraction: &'static str,
    value: Option<String>,
    null: String,
    element_type: Option<&'static str>,
    nested_struct: Option<String>,
}

/// Emit a `fromResponse` method per object node.
///
/// Every statement checks the accessor for nil and writes the field's null
/// value otherwise, so unreported values never show up as zero values.
pub(crate) fn emit_mapping(nodes: &[ObjectNode<'_>]) -> Result<String, GeneratorError> {
    let mappings: Vec<MappingContext> = nodes
        .iter()
        .map(|node| MappingContext {
            struct_name: node.struct_name.clone(),
            interface: node.interface.clone(),
            statements: node
                .schema
                .properties
                .iter()
                .map(|property| statement(node, property))
                .collect(),
        })
        .collect();

    render(
        "mapping.go.j2",
        include_str!("../../templates/mapping.go.j2"),
        context! { mappings => mappings },
    )
}

fn statement(node: &ObjectNode<'_>, property: &SchemaProperty) -> StatementContext {
    let rule = emission_rule(property);
    let field = go_field_name(&property.name);

    let (extraction, value, element, nested_struct) = match rule.extraction {
        Extraction::Scalar(conversion) => {
            let element = scalar_element(rule.field);
            (
                "scalar",
                Some(value_expression(element, conversion, "v", true)),
                None,
                None,
            )
        }
        Extraction::List(conversion) => {
            let element = match rule.field {
                FieldType::List(element) => element,
                _ => ElementType::String,
            };
            (
                "list",
                Some(value_expression(element, conversion, "e", false)),
                Some(element_type(element)),
                None,
            )
        }
        Extraction::Nested => ("nested", None, None, Some(node.child_struct(property))),
        Extraction::NestedList => (
            "nested_list",
            None,
            None,
            Some(node.child_struct(property)),
        ),
        Extraction::Placeholder => (
            "placeholder",
            Some(placeholder_value().to_string()),
            None,
            None,
        ),
    };

    StatementContext {
        accessor: accessor_name(&property.name),
        field,
        extraction,
        value,
        null: null_value(rule.field),
        element_type: element,
        nested_struct,
    }
}

fn scalar_element(field: FieldType) -> ElementType {
    match field {
        FieldType::Bool => ElementType::Bool,
        FieldType::Int64 => ElementType::Int64,
        FieldType::Float64 => ElementType::Float64,
        _ => ElementType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::object_nodes;
    use tfgen_core::ir::{PrimitiveType, SchemaObject};

    fn emit(schema: &SchemaObject) -> String {
        let nodes = object_nodes("userDataSourceModel", "user", "Userable", schema);
        emit_mapping(&nodes).unwrap()
    }

    #[test]
    fn test_scalar_statement_has_null_branch() {
        let user = SchemaObject::object(
            "user",
            vec![SchemaProperty::primitive(
                "displayName",
                PrimitiveType::String,
                None,
            )],
        );
        let out = emit(&user);
        assert!(out.contains("func (m *userDataSourceModel) fromResponse(response models.Userable) {"));
        assert!(out.contains("if v := response.GetDisplayName(); v != nil {"));
        assert!(out.contains("m.DisplayName = types.StringValue(*v)"));
        assert!(out.contains("m.DisplayName = types.StringNull()"));
    }

    #[test]
    fn test_formatted_and_widened_scalars() {
        let user = SchemaObject::object(
            "user",
            vec![
                SchemaProperty::primitive("age", PrimitiveType::Integer, Some("int32".into())),
                SchemaProperty::primitive(
                    "createdDateTime",
                    PrimitiveType::String,
                    Some("date-time".into()),
                ),
            ],
        );
        let out = emit(&user);
        assert!(out.contains("m.Age = types.Int64Value(int64(*v))"));
        assert!(out.contains("m.Age = types.Int64Null()"));
        assert!(out.contains("m.CreatedDateTime = types.StringValue(v.String())"));
    }

    #[test]
    fn test_list_statement() {
        let user = SchemaObject::object(
            "user",
            vec![SchemaProperty::primitive_array(
                "businessPhones",
                Some(PrimitiveType::String),
                None,
            )],
        );
        let out = emit(&user);
        assert!(out.contains("elements = append(elements, types.StringValue(e))"));
        assert!(out.contains("m.BusinessPhones = types.ListValueMust(types.StringType, elements)"));
        assert!(out.contains("m.BusinessPhones = types.ListNull(types.StringType)"));
    }

    #[test]
    fn test_enum_statement_stringifies() {
        let risk = SchemaObject::enumeration("riskLevel", vec!["low".into(), "high".into()]);
        let activity = SchemaObject::object(
            "signInActivity",
            vec![SchemaProperty::enumeration("riskLevel", risk)],
        );
        let out = emit(&activity);
        assert!(out.contains("m.RiskLevel = types.StringValue(v.String())"));
    }

    #[test]
    fn test_nested_statements_recurse() {
        let profile = SchemaObject::object(
            "passwordProfile",
            vec![SchemaProperty::primitive(
                "password",
                PrimitiveType::String,
                None,
            )],
        );
        let user = SchemaObject::object(
            "user",
            vec![
                SchemaProperty::opaque("employeeOrgData"),
                SchemaProperty::object_array("history", profile.clone()),
                SchemaProperty::object("passwordProfile", profile),
            ],
        );
        let out = emit(&user);

        assert!(out.contains("m.PasswordProfile = &userPasswordProfileModel{}"));
        assert!(out.contains("m.PasswordProfile.fromResponse(v)"));
        assert!(out.contains("m.PasswordProfile = nil"));
        assert!(out.contains("var item userHistoryModel"));
        assert!(out.contains("m.History = append(m.History, item)"));
        assert!(out.contains(
            "m.EmployeeOrgData = types.ObjectValueMust(map[string]attr.Type{}, map[string]attr.Value{})"
        ));
        assert!(out.contains("m.EmployeeOrgData = types.ObjectNull(map[string]attr.Type{})"));
        assert!(out.contains(
            "func (m *userPasswordProfileModel) fromResponse(response models.PasswordProfileable) {"
        ));
        assert!(out.contains("func (m *userHistoryModel) fromResponse("));
    }

    #[test]
    fn test_acronym_accessor_matches_sdk() {
        let registration = SchemaObject::object(
            "userRegistrationDetails",
            vec![SchemaProperty::primitive(
                "isMFARegistered",
                PrimitiveType::Boolean,
                None,
            )],
        );
        let out = emit(&registration);
        assert!(out.contains("if v := response.GetIsMFARegistered(); v != nil {"));
        assert!(out.contains("m.IsMfaRegistered = types.BoolValue(*v)"));
    }

    #[test]
    fn test_every_statement_is_guarded() {
        let user = SchemaObject::object(
            "user",
            vec![
                SchemaProperty::primitive("a", PrimitiveType::Boolean, None),
                SchemaProperty::primitive("b", PrimitiveType::Number, None),
                SchemaProperty::opaque("c"),
            ],
        );
        let out = emit(&user);
        assert_eq!(out.matches("v != nil").count(), 3);
        assert_eq!(out.matches("} else {").count(), 3);
    }
}

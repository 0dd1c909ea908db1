use minijinja::context;
use tfgen_core::GeneratorError;
use tfgen_core::config::DataSourceConfig;
use tfgen_core::ir::{Classification, PathObject, SchemaObject};
use tfgen_core::transform::name_normalizer::normalize_name;

use super::{attribute_name, interface_name, object_nodes, render};
use super::{mapping::emit_mapping, model::emit_models, schema::emit_schema};

/// Settings shared by every data source file.
#[derive(Debug, Clone)]
pub struct DataSourceOptions<'a> {
    /// Go package of the generated file.
    pub package: &'a str,
    /// Terraform provider type prefix.
    pub provider: &'a str,
}

/// Emit `<name>_data_source.go` for one configured data source.
pub fn emit_data_source(
    data_source: &DataSourceConfig,
    path: &PathObject,
    response: &SchemaObject,
    options: &DataSourceOptions<'_>,
) -> Result<String, GeneratorError> {
    let name = normalize_name(&data_source.name);
    let prefix = name.camel_case.clone();
    let response = without_parameter_collisions(response, &path.parameters);

    let root_interface = interface_name(&response, &data_source.name);
    let nodes = object_nodes(
        &format!("{prefix}DataSourceModel"),
        &prefix,
        &root_interface,
        &response,
    );

    let description = path
        .get
        .description
        .as_deref()
        .or(path.get.summary.as_deref());
    let schema = emit_schema(
        &format!("{prefix}DataSourceSchema"),
        description,
        &path.parameters,
        &response,
    )?;
    let models = emit_models(&nodes, &path.parameters)?;
    let mapping = emit_mapping(&nodes)?;

    let needs_attr = nodes.iter().any(|node| {
        node.schema.properties.iter().any(|p| {
            matches!(
                p.classification,
                Classification::PrimitiveArray | Classification::OpaqueObject
            )
        })
    });

    render(
        "data_source.go.j2",
        include_str!("../../templates/data_source.go.j2"),
        context! {
            package => options.package,
            path => path.path.clone(),
            type_name => format!("{}_{}", options.provider, name.snake_case),
            prefix => prefix,
            select_parameters => path.get.select_parameters.clone(),
            needs_attr => needs_attr,
            schema => schema,
            models => models,
            mapping => mapping,
        },
    )
}

/// Drop response properties whose attribute name is taken by a path parameter.
fn without_parameter_collisions(response: &SchemaObject, parameters: &[String]) -> SchemaObject {
    let taken: Vec<String> = parameters.iter().map(|p| attribute_name(p)).collect();
    let mut response = response.clone();
    response.properties.retain(|property| {
        let keep = !taken.contains(&attribute_name(&property.name));
        if !keep {
            log::debug!(
                "{}: property collides with a path parameter, keeping the parameter",
                property.name
            );
        }
        keep
    });
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfgen_core::ir::{GetOperation, PrimitiveType, SchemaProperty};

    fn widget_path() -> PathObject {
        PathObject {
            path: "/widgets/{id}".to_string(),
            description: None,
            parameters: vec!["id".to_string()],
            get: GetOperation {
                summary: Some("Get widget".to_string()),
                description: None,
                select_parameters: vec!["id".to_string(), "name".to_string()],
                response: SchemaObject::object(
                    "Widget",
                    vec![
                        SchemaProperty::primitive("id", PrimitiveType::String, None),
                        SchemaProperty::primitive("name", PrimitiveType::String, None),
                    ],
                ),
            },
        }
    }

    fn widget_config() -> DataSourceConfig {
        DataSourceConfig {
            name: "widget".to_string(),
            path: "/widgets/{id}".to_string(),
            schema: None,
        }
    }

    const OPTIONS: DataSourceOptions<'static> = DataSourceOptions {
        package: "provider",
        provider: "acme",
    };

    #[test]
    fn test_file_header_and_select_literal() {
        let path = widget_path();
        let out =
            emit_data_source(&widget_config(), &path, &path.get.response, &OPTIONS).unwrap();

        assert!(out.starts_with("// Code generated by tfgen. DO NOT EDIT.\n"));
        assert!(out.contains("package provider\n"));
        assert!(out.contains(r#"const widgetDataSourceTypeName = "acme_widget""#));
        assert!(out.contains("var widgetSelectParameters = []string{\n\t\"id\",\n\t\"name\",\n}"));
        assert!(!out.contains("terraform-plugin-framework/attr\""));
    }

    #[test]
    fn test_path_parameter_wins_over_response_property() {
        let path = widget_path();
        let out =
            emit_data_source(&widget_config(), &path, &path.get.response, &OPTIONS).unwrap();

        assert_eq!(out.matches(r#""id": schema.StringAttribute{"#).count(), 1);
        assert!(!out.contains("response.GetId()"));
        assert!(out.contains("response.GetName()"));
    }

    #[test]
    fn test_attr_import_for_lists() {
        let mut path = widget_path();
        path.get.response.properties.push(SchemaProperty::primitive_array(
            "tags",
            Some(PrimitiveType::String),
            None,
        ));
        let out =
            emit_data_source(&widget_config(), &path, &path.get.response, &OPTIONS).unwrap();
        assert!(out.contains("\"github.com/hashicorp/terraform-plugin-framework/attr\""));
    }
}

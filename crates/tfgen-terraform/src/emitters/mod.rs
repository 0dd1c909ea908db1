pub mod data_source;
pub mod mapping;
pub mod model;
pub mod schema;

use minijinja::{Environment, Value};
use tfgen_core::GeneratorError;
use tfgen_core::ir::{Classification, SchemaObject, SchemaProperty};
use tfgen_core::transform::name_normalizer::normalize_name;

/// Quote a string as a Go interpreted string literal.
fn go_string(value: String) -> String {
    serde_json::to_string(&value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Render one embedded template with the shared environment settings.
pub(crate) fn render(
    name: &'static str,
    source: &'static str,
    ctx: Value,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("go_string", go_string);
    env.add_template(name, source)
        .map_err(|e| GeneratorError::Template(format!("{name}: {e}")))?;
    env.get_template(name)
        .and_then(|tmpl| tmpl.render(ctx))
        .map_err(|e| GeneratorError::Template(format!("{name}: {e}")))
}

/// Go struct/field name for a wire property.
pub(crate) fn go_field_name(property: &str) -> String {
    normalize_name(property).pascal_case
}

/// msgraph-sdk-go symbol for a wire name: only the first letter is
/// upper-cased, so acronyms such as `macOS` or `MFA` survive.
pub(crate) fn sdk_name(wire: &str) -> String {
    let mut chars = wire.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Getter the SDK generates for a wire property, e.g. `GetDisplayName`.
pub(crate) fn accessor_name(property: &str) -> String {
    format!("Get{}", sdk_name(property))
}

/// `tfsdk` attribute name for a wire property.
pub(crate) fn attribute_name(property: &str) -> String {
    normalize_name(property).snake_case
}

/// An object in the resolved tree that gets its own model struct.
#[derive(Debug)]
pub(crate) struct ObjectNode<'a> {
    pub struct_name: String,
    /// SDK interface the mapping method reads from, e.g. `Userable`.
    pub interface: String,
    pub schema: &'a SchemaObject,
    prefix: String,
}

impl ObjectNode<'_> {
    /// Struct name of the model generated for a nested property.
    pub fn child_struct(&self, property: &SchemaProperty) -> String {
        format!("{}Model", self.child_prefix(property))
    }

    fn child_prefix(&self, property: &SchemaProperty) -> String {
        format!("{}{}", self.prefix, go_field_name(&property.name))
    }
}

/// Walk the object tree depth-first, root first.
///
/// Struct names are derived from the property path, so two properties that
/// share a schema still get distinct structs.
pub(crate) fn object_nodes<'a>(
    root_struct: &str,
    prefix: &str,
    root_interface: &str,
    root: &'a SchemaObject,
) -> Vec<ObjectNode<'a>> {
    let mut nodes = Vec::new();
    collect(
        ObjectNode {
            struct_name: root_struct.to_string(),
            interface: root_interface.to_string(),
            schema: root,
            prefix: prefix.to_string(),
        },
        &mut nodes,
    );
    nodes
}

fn collect<'a>(node: ObjectNode<'a>, nodes: &mut Vec<ObjectNode<'a>>) {
    let children: Vec<ObjectNode<'a>> = node
        .schema
        .properties
        .iter()
        .filter(|p| {
            matches!(
                p.classification,
                Classification::Object | Classification::ObjectArray
            )
        })
        .filter_map(|p| {
            let nested = p.nested.as_ref()?;
            Some(ObjectNode {
                struct_name: node.child_struct(p),
                interface: interface_name(nested, &p.name),
                schema: nested,
                prefix: node.child_prefix(p),
            })
        })
        .collect();

    nodes.push(node);
    for child in children {
        collect(child, nodes);
    }
}

/// SDK model interface for a resolved object, falling back to `fallback`
/// when the schema is an untitled composition.
pub(crate) fn interface_name(schema: &SchemaObject, fallback: &str) -> String {
    if schema.title.is_empty() {
        format!("{}able", go_field_name(fallback))
    } else {
        format!("{}able", sdk_name(&schema.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_string_escapes() {
        assert_eq!(go_string("plain".into()), r#""plain""#);
        assert_eq!(go_string("say \"hi\"\n".into()), r#""say \"hi\"\n""#);
    }

    #[test]
    fn test_names() {
        assert_eq!(go_field_name("signInActivity"), "SignInActivity");
        assert_eq!(attribute_name("signInActivity"), "sign_in_activity");
        assert_eq!(attribute_name("user-id"), "user_id");
    }

    #[test]
    fn test_sdk_names_keep_acronyms() {
        assert_eq!(accessor_name("isMFARegistered"), "GetIsMFARegistered");
        assert_eq!(accessor_name("appleIDRequired"), "GetAppleIDRequired");
        assert_eq!(accessor_name("displayName"), "GetDisplayName");
        let policy = SchemaObject::object("macOSCompliancePolicy", Vec::new());
        assert_eq!(
            interface_name(&policy, "policy"),
            "MacOSCompliancePolicyable"
        );
    }

    #[test]
    fn test_object_nodes_follow_property_paths() {
        let profile = SchemaObject::object(
            "passwordProfile",
            vec![SchemaProperty::primitive(
                "password",
                tfgen_core::ir::PrimitiveType::String,
                None,
            )],
        );
        let root = SchemaObject::object(
            "user",
            vec![
                SchemaProperty::object("passwordProfile", profile.clone()),
                SchemaProperty::object_array("previousProfiles", profile),
                SchemaProperty::opaque("employeeOrgData"),
            ],
        );

        let nodes = object_nodes("userDataSourceModel", "user", "Userable", &root);
        let names: Vec<&str> = nodes.iter().map(|n| n.struct_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "userDataSourceModel",
                "userPasswordProfileModel",
                "userPreviousProfilesModel"
            ]
        );
        assert_eq!(nodes[1].interface, "PasswordProfileable");
    }

    #[test]
    fn test_interface_name_falls_back_for_untitled() {
        let anonymous = SchemaObject::object("", Vec::new());
        assert_eq!(interface_name(&anonymous, "child"), "Childable");
    }
}

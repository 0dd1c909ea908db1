use tfgen_core::Document;
use tfgen_core::error::{Location, ResolveError};
use tfgen_core::ir::{Classification, PrimitiveType, SchemaKind};
use tfgen_core::transform::SchemaResolver;

const SCENARIOS: &str = include_str!("fixtures/scenarios.yaml");
const GRAPH: &str = include_str!("fixtures/graph-users.yaml");

fn scenarios() -> Document {
    Document::from_yaml(SCENARIOS).expect("scenarios fixture should parse")
}

#[test]
fn resolve_object_with_array_of_refs() {
    let doc = scenarios();
    let foo = SchemaResolver::new(&doc).resolve("Foo").unwrap();

    assert_eq!(foo.title, "Foo");
    assert_eq!(foo.kind, SchemaKind::Object);
    assert_eq!(foo.property_names(), vec!["items", "name"]);

    let items = foo.property("items").unwrap();
    assert_eq!(items.classification, Classification::ObjectArray);
    let bar = items.nested.as_ref().expect("object array carries its item type");
    assert_eq!(bar.title, "Bar");
    assert_eq!(bar.property_names(), vec!["flag"]);
    assert_eq!(bar.properties[0].classification, Classification::Primitive);
    assert_eq!(bar.properties[0].primitive, Some(PrimitiveType::Boolean));

    let name = foo.property("name").unwrap();
    assert_eq!(name.classification, Classification::Primitive);
    assert_eq!(name.primitive, Some(PrimitiveType::String));
    assert!(name.nested.is_none());
}

#[test]
fn resolve_composition_appends_extension() {
    let doc = scenarios();
    let child = SchemaResolver::new(&doc).resolve("Child").unwrap();

    assert_eq!(child.title, "");
    assert_eq!(child.property_names(), vec!["base", "extra"]);
}

#[test]
fn inherited_properties_precede_own_properties() {
    let doc = scenarios();
    let resolver = SchemaResolver::new(&doc);

    let derived = resolver.resolve("Derived").unwrap();
    assert_eq!(derived.property_names(), vec!["a", "c", "b"]);

    let grand_child = resolver.resolve("GrandChild").unwrap();
    assert_eq!(grand_child.title, "GrandChild");
    assert_eq!(grand_child.property_names(), vec!["a", "c", "b", "aa"]);
}

#[test]
fn resolution_is_deterministic() {
    let doc = Document::from_yaml(GRAPH).unwrap();
    let resolver = SchemaResolver::new(&doc);

    let first = resolver.resolve("microsoft.graph.user").unwrap();
    let second = resolver.resolve("microsoft.graph.user").unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn navigation_properties_cut_cycles() {
    let doc = scenarios();
    let node = SchemaResolver::new(&doc).resolve("Node").unwrap();
    assert_eq!(node.property_names(), vec!["label"]);
}

#[test]
fn navigation_flag_beside_ref_is_skipped() {
    let doc = scenarios();
    let holder = SchemaResolver::new(&doc).resolve("Holder").unwrap();
    assert_eq!(holder.property_names(), vec!["label"]);
}

#[test]
fn non_navigation_cycle_is_rejected() {
    let doc = scenarios();
    let err = SchemaResolver::new(&doc).resolve("Ping").unwrap_err();

    match &err {
        ResolveError::UnsupportedShape { location, reason } => {
            assert_eq!(location, &Location::new("Pong").with_property("ping"));
            assert!(reason.contains("Ping -> Pong -> Ping"), "{reason}");
        }
        other => panic!("expected UnsupportedShape, got {other:?}"),
    }
}

#[test]
fn dangling_reference_names_schema_and_property() {
    let doc = scenarios();
    let err = SchemaResolver::new(&doc).resolve("Dangling").unwrap_err();

    assert_eq!(
        err,
        ResolveError::UnresolvableReference {
            location: Location::new("Dangling").with_property("ghost"),
            reference: "DoesNotExist".to_string(),
        }
    );
    assert!(err.to_string().contains("Dangling.ghost"));
}

#[test]
fn unknown_schema_name_is_unresolvable() {
    let doc = scenarios();
    let err = SchemaResolver::new(&doc).resolve("Missing").unwrap_err();
    assert!(matches!(err, ResolveError::UnresolvableReference { .. }));
    assert_eq!(err.location().subject, "Missing");
}

#[test]
fn untitled_schema_without_composition_is_unsupported() {
    let doc = scenarios();
    let err = SchemaResolver::new(&doc).resolve("Shapeless").unwrap_err();
    assert!(matches!(err, ResolveError::UnsupportedShape { .. }));
    assert_eq!(err.location(), &Location::new("Shapeless"));
}

#[test]
fn enum_values_are_copied_in_order() {
    let doc = scenarios();
    let color = SchemaResolver::new(&doc).resolve("Color").unwrap();
    assert_eq!(color.kind, SchemaKind::Enum);
    assert_eq!(color.enum_values, vec!["red", "green", "unknownFutureValue"]);
    assert!(color.properties.is_empty());
}

#[test]
fn every_classification_is_reachable() {
    let doc = scenarios();
    let everything = SchemaResolver::new(&doc).resolve("Everything").unwrap();

    let class = |name: &str| everything.property(name).unwrap().classification;
    assert_eq!(class("text"), Classification::Primitive);
    assert_eq!(class("created"), Classification::Primitive);
    assert_eq!(class("enabled"), Classification::Primitive);
    assert_eq!(class("count"), Classification::Primitive);
    assert_eq!(class("ratio"), Classification::Primitive);
    assert_eq!(class("tags"), Classification::PrimitiveArray);
    assert_eq!(class("stamps"), Classification::PrimitiveArray);
    assert_eq!(class("colors"), Classification::PrimitiveArray);
    assert_eq!(class("bar"), Classification::Object);
    assert_eq!(class("direct"), Classification::Object);
    assert_eq!(class("bars"), Classification::ObjectArray);
    assert_eq!(class("color"), Classification::Enum);
    assert_eq!(class("extension"), Classification::OpaqueObject);

    let created = everything.property("created").unwrap();
    assert_eq!(created.format.as_deref(), Some("date-time"));

    let stamps = everything.property("stamps").unwrap();
    assert_eq!(stamps.primitive, Some(PrimitiveType::String));
    assert_eq!(stamps.format.as_deref(), Some("date-time"));

    let bars = everything.property("bars").unwrap();
    assert_eq!(bars.nested.as_ref().unwrap().title, "Bar");

    let color = everything.property("color").unwrap();
    assert_eq!(color.nested.as_ref().unwrap().enum_values.len(), 3);
    assert!(everything.property("colors").unwrap().has_enum_elements());

    let extension = everything.property("extension").unwrap();
    assert!(extension.nested.as_ref().unwrap().properties.is_empty());
}

#[test]
fn properties_are_sorted_by_name() {
    let doc = scenarios();
    let everything = SchemaResolver::new(&doc).resolve("Everything").unwrap();
    let names = everything.property_names();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn discriminator_is_skipped() {
    let doc = scenarios();
    let widget = SchemaResolver::new(&doc).resolve("Widget").unwrap();
    assert_eq!(widget.property_names(), vec!["id", "name"]);
}

#[test]
fn resolve_graph_user() {
    let doc = Document::from_yaml(GRAPH).unwrap();
    let user = SchemaResolver::new(&doc)
        .resolve("microsoft.graph.user")
        .unwrap();

    assert_eq!(user.title, "user");
    assert_eq!(
        user.property_names(),
        vec![
            "id",
            "deletedDateTime",
            "accountEnabled",
            "assignedLicenses",
            "businessPhones",
            "displayName",
            "employeeOrgData",
            "identities",
            "passwordProfile",
            "signInActivity",
            "userType",
        ]
    );

    let identities = user.property("identities").unwrap();
    assert_eq!(identities.classification, Classification::ObjectArray);
    assert_eq!(identities.nested.as_ref().unwrap().title, "objectIdentity");

    let profile = user.property("passwordProfile").unwrap();
    assert_eq!(profile.classification, Classification::Object);

    let activity = user.property("signInActivity").unwrap();
    let risk = activity.nested.as_ref().unwrap().property("riskLevel").unwrap();
    assert_eq!(risk.classification, Classification::Enum);

    let org_data = user.property("employeeOrgData").unwrap();
    assert_eq!(org_data.classification, Classification::OpaqueObject);
}

#[test]
fn graph_parent_resolves_independently() {
    let doc = Document::from_yaml(GRAPH).unwrap();
    let directory_object = SchemaResolver::new(&doc)
        .resolve("microsoft.graph.directoryObject")
        .unwrap();
    assert_eq!(directory_object.title, "directoryObject");
    assert_eq!(
        directory_object.property_names(),
        vec!["id", "deletedDateTime"]
    );
}

#[test]
fn resolved_tree_serializes_compactly() {
    let doc = scenarios();
    let bar = SchemaResolver::new(&doc).resolve("Bar").unwrap();
    insta::assert_snapshot!(
        serde_json::to_string(&bar).unwrap(),
        @r#"{"title":"Bar","kind":"object","properties":[{"name":"flag","classification":"Primitive","primitive":"boolean"}]}"#
    );
}

fn unsupported_at(schema: &str, property: &str) -> String {
    let doc = scenarios();
    match SchemaResolver::new(&doc).resolve(schema).unwrap_err() {
        ResolveError::UnsupportedShape { location, reason } => {
            assert_eq!(location, Location::new(schema).with_property(property));
            reason
        }
        other => panic!("expected UnsupportedShape, got {other:?}"),
    }
}

#[test]
fn inline_object_with_properties_is_unsupported() {
    let reason = unsupported_at("InlineShape", "inline");
    assert!(reason.contains("inline object"), "{reason}");
}

#[test]
fn multi_member_unions_are_unsupported() {
    assert!(unsupported_at("Poly", "either").contains("union of 2 members"));
    assert!(unsupported_at("Numeric", "amount").contains("union of 2 members"));
    assert!(unsupported_at("PolyList", "members").contains("union of 2 members"));
}

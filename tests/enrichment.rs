//! End-to-end enrichment scenarios: registered endpoints in, enriched
//! OpenAPI document out.

use odata_openapi::{
    ApiInfo, DocumentSettings, EdmModel, EdmTypeRef, Endpoint, EntitySet, EntityType,
    NavigationProperty, ODataOpenApiGenerator, ODataRouteMetadata, PrimitiveKind,
    QueryOptionSettings, SegmentTemplate,
};
use pretty_assertions::assert_eq;
use utoipa::openapi::path::{Operation, PathItem};

fn products_model() -> EdmModel {
    EdmModel::new("Sample.Store")
        .with_entity_type(
            EntityType::new("Product")
                .with_key("Id")
                .with_property("Id", EdmTypeRef::primitive(PrimitiveKind::Int32))
                .with_property("Name", EdmTypeRef::primitive(PrimitiveKind::String))
                .with_property(
                    "Price",
                    EdmTypeRef::primitive(PrimitiveKind::Decimal).nullable(),
                )
                .with_navigation(NavigationProperty::new("Category", "Category")),
        )
        .with_entity_type(
            EntityType::new("Category")
                .with_key("Id")
                .with_property("Id", EdmTypeRef::primitive(PrimitiveKind::Int32))
                .with_property("Name", EdmTypeRef::primitive(PrimitiveKind::String)),
        )
        .with_entity_set(EntitySet::new("Products", "Product"))
}

fn products_endpoints() -> Vec<Endpoint> {
    let collection_metadata = ODataRouteMetadata::new(
        "odata",
        vec![SegmentTemplate::EntitySet("Products".into())],
    );
    let keyed_metadata = ODataRouteMetadata::new(
        "odata",
        vec![
            SegmentTemplate::EntitySet("Products".into()),
            SegmentTemplate::Key {
                entity_type: "Product".into(),
                key_mappings: vec![("Id".into(), "key".into())],
            },
        ],
    );
    vec![
        Endpoint::new("odata/Products")
            .with_metadata(collection_metadata)
            .with_method("GET"),
        Endpoint::new("odata/Products({key})")
            .with_metadata(keyed_metadata.clone())
            .with_method("GET"),
        Endpoint::new("odata/Products({key})")
            .with_metadata(keyed_metadata)
            .with_method("PUT"),
    ]
}

fn generator_with(settings: QueryOptionSettings) -> ODataOpenApiGenerator {
    ODataOpenApiGenerator::new()
        .with_document(
            "store",
            DocumentSettings::new("odata", ApiInfo::new("Store API", "1.0.0"))
                .with_query_options(settings),
        )
        .with_model("odata", products_model())
}

fn parameter_names(op: &Operation) -> Vec<&str> {
    op.parameters
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|p| p.name.as_str())
        .collect()
}

fn query_option_names(item: &PathItem) -> Vec<&str> {
    item.get
        .as_ref()
        .map(parameter_names)
        .unwrap_or_default()
        .into_iter()
        .filter(|name| name.starts_with('$'))
        .collect()
}

#[test]
fn test_products_collection_get_carries_query_options() {
    let endpoints = products_endpoints();
    let doc = generator_with(QueryOptionSettings::default())
        .generate("store", Some(&endpoints), None, None)
        .unwrap();

    let collection = doc.paths.paths.get("/Products").unwrap();
    assert_eq!(
        query_option_names(collection),
        vec![
            "$filter", "$select", "$expand", "$orderby", "$top", "$skip", "$count", "$search",
            "$format"
        ]
    );
}

#[test]
fn test_keyed_path_has_get_and_put_but_no_query_options() {
    let endpoints = products_endpoints();
    let doc = generator_with(QueryOptionSettings::default())
        .generate("store", Some(&endpoints), None, None)
        .unwrap();

    let keyed = doc.paths.paths.get("/Products({key})").unwrap();
    assert!(keyed.get.is_some());
    assert!(keyed.put.is_some());
    assert!(keyed.post.is_none());
    assert!(query_option_names(keyed).is_empty());

    // The key route variable is declared as a path parameter.
    let names = parameter_names(keyed.get.as_ref().unwrap());
    assert_eq!(names, vec!["key"]);
}

#[test]
fn test_property_and_value_paths_are_synthesized() {
    let endpoints = products_endpoints();
    let doc = generator_with(QueryOptionSettings::default())
        .generate("store", Some(&endpoints), None, None)
        .unwrap();

    for template in [
        "/Products({key})/Name",
        "/Products({key})/Name/$value",
        "/Products({key})/Price",
        "/Products({key})/$value",
        "/Products({key})/Category/$ref",
    ] {
        assert!(
            doc.paths.paths.contains_key(template),
            "missing synthesized path {}",
            template
        );
    }

    // Synthesized property access is read-only.
    let name_path = doc.paths.paths.get("/Products({key})/Name").unwrap();
    assert!(name_path.get.is_some());
    assert!(name_path.put.is_none());
}

#[test]
fn test_disabled_options_emit_no_query_parameters() {
    let endpoints = products_endpoints();
    let doc = generator_with(QueryOptionSettings::disabled())
        .generate("store", Some(&endpoints), None, None)
        .unwrap();

    let collection = doc.paths.paths.get("/Products").unwrap();
    assert!(query_option_names(collection).is_empty());
}

#[test]
fn test_top_bounds_follow_settings() {
    let endpoints = products_endpoints();
    let settings = QueryOptionSettings::default()
        .with_max_top(100)
        .with_default_top(10);
    let doc = generator_with(settings)
        .generate("store", Some(&endpoints), None, None)
        .unwrap();

    let collection = doc.paths.paths.get("/Products").unwrap();
    let get = collection.get.as_ref().unwrap();
    let top = get
        .parameters
        .as_deref()
        .unwrap()
        .iter()
        .find(|p| p.name == "$top")
        .unwrap();
    let schema = serde_json::to_value(top.schema.as_ref().unwrap()).unwrap();
    assert_eq!(schema["maximum"].as_f64(), Some(100.0));
    assert_eq!(schema["example"].as_u64(), Some(10));
}

#[test]
fn test_double_generation_is_stable() {
    let endpoints = products_endpoints();
    let generator = generator_with(QueryOptionSettings::default());
    let first = generator
        .generate("store", Some(&endpoints), None, None)
        .unwrap();
    let second = generator
        .generate("store", Some(&endpoints), None, None)
        .unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_unknown_document_is_a_configuration_error() {
    let err = generator_with(QueryOptionSettings::default())
        .generate("catalog", None, None, None)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Configuration Error"));
    assert!(message.contains("'catalog'"));
    assert!(message.contains("store"));
}

#[test]
fn test_document_serializes_to_yaml() {
    let endpoints = products_endpoints();
    let doc = generator_with(QueryOptionSettings::default())
        .generate("store", Some(&endpoints), Some("store.example.com"), None)
        .unwrap();
    let yaml = serde_yaml::to_string(&doc).unwrap();
    assert!(yaml.contains("/Products"));
    assert!(yaml.contains("https://store.example.com/odata"));
    assert!(yaml.contains("Store API"));
}

//! Endpoint collection scenarios: prefix filtering, template deduplication
//! with method union, and the pure EDM fallback path source.

use odata_openapi::{
    collect_odata_paths, model_default_paths, ApiInfo, DocumentSettings, EdmModel, EdmTypeRef,
    Endpoint, EntitySet, EntityType, ODataOpenApiGenerator, ODataRouteMetadata, PrimitiveKind,
    SegmentTemplate,
};
use pretty_assertions::assert_eq;
use utoipa::openapi::path::HttpMethod;

fn orders_model() -> EdmModel {
    EdmModel::new("Sample.Sales")
        .with_entity_type(
            EntityType::new("Order")
                .with_key("Id")
                .with_property("Id", EdmTypeRef::primitive(PrimitiveKind::Guid))
                .with_property("Total", EdmTypeRef::primitive(PrimitiveKind::Decimal)),
        )
        .with_entity_set(EntitySet::new("Orders", "Order"))
}

fn orders_endpoint(route: &str, methods: &[&str]) -> Endpoint {
    let mut endpoint = Endpoint::new(route).with_metadata(ODataRouteMetadata::new(
        "odata",
        vec![SegmentTemplate::EntitySet("Orders".into())],
    ));
    for method in methods {
        endpoint = endpoint.with_method(*method);
    }
    endpoint
}

#[test]
fn test_methods_union_across_endpoints_sharing_a_template() {
    // Same logical route registered three times with different methods and
    // different raw spellings.
    let endpoints = vec![
        orders_endpoint("odata/Orders", &["GET"]),
        orders_endpoint("/odata/Orders", &["POST"]),
        orders_endpoint("ODATA/Orders", &["get", "DELETE"]),
    ];

    let paths = collect_odata_paths(&endpoints, "odata");
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].template, "/Orders");
    assert_eq!(
        paths[0].http_methods,
        vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
    );
}

#[test]
fn test_endpoints_without_methods_default_to_get() {
    let paths = collect_odata_paths(&[orders_endpoint("odata/Orders", &[])], "odata");
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].http_methods, vec![HttpMethod::Get]);
}

#[test]
fn test_foreign_prefix_endpoints_are_ignored() {
    let foreign = Endpoint::new("api/Orders")
        .with_metadata(ODataRouteMetadata::new(
            "api",
            vec![SegmentTemplate::EntitySet("Orders".into())],
        ))
        .with_method("GET");
    let endpoints = vec![foreign, orders_endpoint("odata/Orders", &["GET"])];

    let paths = collect_odata_paths(&endpoints, "odata");
    let templates: Vec<&str> = paths.iter().map(|p| p.template.as_str()).collect();
    assert_eq!(templates, vec!["/Orders"]);
}

#[test]
fn test_union_flows_into_the_generated_document() {
    let endpoints = vec![
        orders_endpoint("odata/Orders", &["GET"]),
        orders_endpoint("odata/Orders", &["POST"]),
    ];
    let generator = ODataOpenApiGenerator::new()
        .with_document(
            "sales",
            DocumentSettings::new("odata", ApiInfo::new("Sales API", "1.0.0")),
        )
        .with_model("odata", orders_model());

    let doc = generator
        .generate("sales", Some(&endpoints), None, None)
        .unwrap();
    let item = doc.paths.paths.get("/Orders").unwrap();
    assert!(item.get.is_some());
    assert!(item.post.is_some());
    assert!(item.delete.is_none());
}

#[test]
fn test_fallback_source_covers_the_model_surface() {
    let paths = model_default_paths(&orders_model());
    let templates: Vec<&str> = paths.iter().map(|p| p.template.as_str()).collect();
    assert_eq!(templates, vec!["/Orders", "/Orders({key})", "/$metadata"]);

    let collection = &paths[0];
    assert_eq!(
        collection.http_methods,
        vec![HttpMethod::Get, HttpMethod::Post]
    );
    let keyed = &paths[1];
    assert_eq!(
        keyed.http_methods,
        vec![HttpMethod::Get, HttpMethod::Patch, HttpMethod::Delete]
    );
}

#[test]
fn test_generator_without_endpoints_uses_the_fallback_source() {
    let generator = ODataOpenApiGenerator::new()
        .with_document(
            "sales",
            DocumentSettings::new("odata", ApiInfo::new("Sales API", "1.0.0")),
        )
        .with_model("odata", orders_model());

    let doc = generator.generate("sales", None, None, None).unwrap();
    assert!(doc.paths.paths.contains_key("/Orders"));
    assert!(doc.paths.paths.contains_key("/Orders({key})"));
    assert!(doc.paths.paths.contains_key("/$metadata"));

    // The guid key flows into the path parameter schema.
    let keyed = doc.paths.paths.get("/Orders({key})").unwrap();
    let get = keyed.get.as_ref().unwrap();
    let key = &get.parameters.as_deref().unwrap()[0];
    let schema = serde_json::to_value(key.schema.as_ref().unwrap()).unwrap();
    assert_eq!(schema["format"].as_str(), Some("uuid"));
}

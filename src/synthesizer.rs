#![deny(missing_docs)]

//! # Missing-Path Synthesis
//!
//! Derives the paths relative conversion cannot produce from routing data
//! alone: property access and property `$value` paths for every structural
//! property, a raw `$value` path per entity, and a `$ref` path (GET, PUT,
//! DELETE) per navigation property, for every entity set and singleton
//! whose by-key (or singleton) path already exists in the document.
//!
//! Every insertion is guarded by "path not already present", so synthesis
//! never overwrites base-conversion or endpoint-derived paths and running
//! it twice yields the same document as running it once.

use crate::converter::{key_property_schema, path_parameter, route_variables};
use crate::edm::{EdmModel, EntityType};
use crate::type_mapping::schema_for_type;
use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, Parameter, PathItem, PathItemBuilder,
};
use utoipa::openapi::schema::{KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type};
use utoipa::openapi::{ContentBuilder, OpenApi, RefOr, Required, ResponseBuilder};

/// Injects the derivable-but-missing paths into the document.
pub fn add_missing_paths(model: &EdmModel, doc: &mut OpenApi) {
    let mut additions: Vec<(String, PathItem)> = Vec::new();

    for set in &model.entity_sets {
        let Some(entity) = model.entity_type(&set.entity_type) else {
            continue;
        };
        for base in by_key_bases(doc, &set.name) {
            synthesize_for_entity(model, entity, &base, doc, &mut additions);
        }
    }

    for singleton in &model.singletons {
        let base = format!("/{}", singleton.name);
        if !doc.paths.paths.contains_key(&base) {
            continue;
        }
        let Some(entity) = model.entity_type(&singleton.entity_type) else {
            continue;
        };
        synthesize_for_entity(model, entity, &base, doc, &mut additions);
    }

    for (template, item) in additions {
        if !doc.paths.paths.contains_key(&template) {
            doc.paths.paths.insert(template, item);
        }
    }
}

/// Document keys of the form `/{set}({...})` with nothing after the keys.
fn by_key_bases(doc: &OpenApi, set_name: &str) -> Vec<String> {
    let prefix = format!("/{}(", set_name);
    doc.paths
        .paths
        .keys()
        .filter(|key| {
            key.starts_with(&prefix) && key.ends_with(')') && !key[prefix.len()..].contains('/')
        })
        .cloned()
        .collect()
}

/// Queues the property, `$value` and `$ref` paths for one addressed entity.
fn synthesize_for_entity(
    model: &EdmModel,
    entity: &EntityType,
    base: &str,
    doc: &OpenApi,
    additions: &mut Vec<(String, PathItem)>,
) {
    let parameters = base_parameters(model, entity, base);
    let mut queue = |template: String, item: PathItem| {
        if !doc.paths.paths.contains_key(&template)
            && !additions.iter().any(|(t, _)| t == &template)
        {
            additions.push((template, item));
        }
    };

    for property in &entity.structural_properties {
        let property_path = format!("{}/{}", base, property.name);
        queue(
            property_path.clone(),
            get_item(
                OperationBuilder::new()
                    .summary(Some(format!(
                        "Get {} property from {}",
                        property.name, entity.name
                    )))
                    .response(
                        "200",
                        ResponseBuilder::new()
                            .description("The property value")
                            .content(
                                "application/json",
                                ContentBuilder::new()
                                    .schema(Some(schema_for_type(model, &property.ty)))
                                    .build(),
                            )
                            .build(),
                    ),
                &parameters,
            ),
        );
        queue(
            format!("{}/$value", property_path),
            get_item(
                OperationBuilder::new()
                    .summary(Some(format!(
                        "Get raw value of {} property from {}",
                        property.name, entity.name
                    )))
                    .response(
                        "200",
                        ResponseBuilder::new()
                            .description("The raw property value")
                            .content(
                                "text/plain",
                                ContentBuilder::new()
                                    .schema(Some(Schema::Object(
                                        ObjectBuilder::new().schema_type(Type::String).build(),
                                    )))
                                    .build(),
                            )
                            .build(),
                    ),
                &parameters,
            ),
        );
    }

    queue(
        format!("{}/$value", base),
        get_item(
            OperationBuilder::new()
                .summary(Some(format!("Get raw value from {}", entity.name)))
                .response(
                    "200",
                    ResponseBuilder::new()
                        .description("The raw entity value")
                        .content(
                            "application/octet-stream",
                            ContentBuilder::new()
                                .schema(Some(Schema::Object(
                                    ObjectBuilder::new()
                                        .schema_type(Type::String)
                                        .format(Some(SchemaFormat::KnownFormat(
                                            KnownFormat::Binary,
                                        )))
                                        .build(),
                                )))
                                .build(),
                        )
                        .build(),
                ),
            &parameters,
        ),
    );

    for navigation in &entity.navigation_properties {
        queue(
            format!("{}/{}/$ref", base, navigation.name),
            reference_item(&navigation.name, &entity.name, &parameters),
        );
    }
}

/// Path item for a navigation-property `$ref` endpoint: GET returns the
/// reference, PUT updates it, DELETE removes it (both 204 on success).
fn reference_item(navigation: &str, entity: &str, parameters: &[Parameter]) -> PathItem {
    let get = with_parameters(
        OperationBuilder::new()
            .summary(Some(format!(
                "Get reference to {} from {}",
                navigation, entity
            )))
            .response(
                "200",
                ResponseBuilder::new()
                    .description("The entity reference")
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(reference_schema()))
                            .build(),
                    )
                    .build(),
            ),
        parameters,
    );
    let put = with_parameters(
        OperationBuilder::new()
            .summary(Some(format!(
                "Update reference to {} in {}",
                navigation, entity
            )))
            .request_body(Some(
                utoipa::openapi::request_body::RequestBodyBuilder::new()
                    .description(Some("The new reference"))
                    .required(Some(Required::True))
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(reference_schema()))
                            .build(),
                    )
                    .build(),
            ))
            .response("204", ResponseBuilder::new().description("Success").build()),
        parameters,
    );
    let delete = with_parameters(
        OperationBuilder::new()
            .summary(Some(format!(
                "Delete reference to {} in {}",
                navigation, entity
            )))
            .response("204", ResponseBuilder::new().description("Success").build()),
        parameters,
    );

    PathItemBuilder::new()
        .operation(HttpMethod::Get, get)
        .operation(HttpMethod::Put, put)
        .operation(HttpMethod::Delete, delete)
        .build()
}

/// The `@odata.id` wrapper schema used by `$ref` payloads.
fn reference_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(Type::Object)
            .property(
                "@odata.id",
                Schema::Object(ObjectBuilder::new().schema_type(Type::String).build()),
            )
            .required("@odata.id")
            .build(),
    ))
}

/// Path parameters for the base template's route variables, typed from the
/// entity's key properties where the variable names line up.
fn base_parameters(model: &EdmModel, entity: &EntityType, base: &str) -> Vec<Parameter> {
    route_variables(base)
        .into_iter()
        .map(|variable| {
            let property = if entity.key.len() == 1 {
                Some(entity.key[0].as_str())
            } else {
                entity.key.iter().find(|k| **k == variable).map(|k| k.as_str())
            };
            let schema = match property {
                Some(property) => key_property_schema(model, &entity.name, property),
                None => Schema::Object(ObjectBuilder::new().schema_type(Type::String).build()),
            };
            path_parameter(&variable, schema)
        })
        .collect()
}

fn get_item(op: OperationBuilder, parameters: &[Parameter]) -> PathItem {
    PathItemBuilder::new()
        .operation(HttpMethod::Get, with_parameters(op, parameters))
        .build()
}

fn with_parameters(mut op: OperationBuilder, parameters: &[Parameter]) -> Operation {
    for parameter in parameters {
        op = op.parameter(parameter.clone());
    }
    op.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{convert_model, model_default_paths};
    use crate::edm::{EdmTypeRef, EntitySet, NavigationProperty, PrimitiveKind, Singleton};

    fn sample_model() -> EdmModel {
        EdmModel::new("Sample.NS")
            .with_entity_type(
                EntityType::new("Product")
                    .with_key("Id")
                    .with_property("Id", EdmTypeRef::primitive(PrimitiveKind::Int32))
                    .with_property("Name", EdmTypeRef::primitive(PrimitiveKind::String))
                    .with_property(
                        "Tags",
                        EdmTypeRef::primitive(PrimitiveKind::String).collection(),
                    )
                    .with_navigation(NavigationProperty::new("Supplier", "Supplier")),
            )
            .with_entity_type(
                EntityType::new("Supplier")
                    .with_key("Id")
                    .with_property("Id", EdmTypeRef::primitive(PrimitiveKind::Int32)),
            )
            .with_entity_set(EntitySet::new("Products", "Product"))
    }

    fn generated_doc(model: &EdmModel) -> OpenApi {
        let mut doc = convert_model(model, &model_default_paths(model));
        add_missing_paths(model, &mut doc);
        doc
    }

    #[test]
    fn test_property_and_value_paths_synthesized() {
        let model = sample_model();
        let doc = generated_doc(&model);
        let keys: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(keys.contains(&&"/Products({key})/Name".to_string()));
        assert!(keys.contains(&&"/Products({key})/Name/$value".to_string()));
        assert!(keys.contains(&&"/Products({key})/$value".to_string()));
        assert!(keys.contains(&&"/Products({key})/Supplier/$ref".to_string()));
    }

    #[test]
    fn test_ref_path_operations() {
        let model = sample_model();
        let doc = generated_doc(&model);
        let item = doc.paths.paths.get("/Products({key})/Supplier/$ref").unwrap();
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
        assert!(item.post.is_none());
    }

    #[test]
    fn test_collection_property_schema_is_array() {
        let model = sample_model();
        let doc = generated_doc(&model);
        let item = doc.paths.paths.get("/Products({key})/Tags").unwrap();
        let value = serde_json::to_value(item.get.as_ref().unwrap()).unwrap();
        assert_eq!(
            value["responses"]["200"]["content"]["application/json"]["schema"]["type"],
            serde_json::json!("array")
        );
    }

    #[test]
    fn test_synthesis_is_idempotent_and_never_overwrites() {
        let model = sample_model();
        let mut doc = convert_model(&model, &model_default_paths(&model));
        add_missing_paths(&model, &mut doc);
        let once = serde_json::to_value(&doc).unwrap();
        add_missing_paths(&model, &mut doc);
        let twice = serde_json::to_value(&doc).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_by_key_path_means_no_synthesis() {
        let model = sample_model();
        // Only the collection path exists; without a by-key path nothing is derived.
        let collection = {
            let mut paths = model_default_paths(&model);
            paths.retain(|p| p.template == "/Products");
            paths
        };
        let mut doc = convert_model(&model, &collection);
        add_missing_paths(&model, &mut doc);
        assert_eq!(doc.paths.paths.len(), 1);
    }

    #[test]
    fn test_singleton_paths_synthesized() {
        let model = EdmModel::new("Sample.NS")
            .with_entity_type(
                EntityType::new("Company")
                    .with_property("Name", EdmTypeRef::primitive(PrimitiveKind::String)),
            )
            .with_singleton(Singleton::new("Contoso", "Company"));
        let doc = generated_doc(&model);
        assert!(doc.paths.paths.contains_key("/Contoso/Name"));
        assert!(doc.paths.paths.contains_key("/Contoso/$value"));
    }
}

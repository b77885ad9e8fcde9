#![deny(missing_docs)]

//! # Base Conversion
//!
//! Produces the starting OpenAPI document for an EDM model: component
//! schemas for every declared type, and one path item per collected OData
//! path with operations for the method/shape combinations the model alone
//! explains (GET anywhere, POST on collections, PUT/PATCH/DELETE on paths
//! addressing a single entity). Methods outside that table are left for the
//! enricher's reconciliation step.
//!
//! When no live endpoint data is available, `model_default_paths` supplies
//! a pure EDM-driven path source.

use crate::edm::{EdmModel, EntityType};
use crate::operations::set_operation;
use crate::paths::{ODataPath, ODataSegment};
use crate::type_mapping::{generic_object, schema_for_type};
use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn,
    PathItemBuilder, PathsBuilder,
};
use utoipa::openapi::schema::{
    ArrayBuilder, ArrayItems, ObjectBuilder, Schema, SchemaFormat, Type,
};
use utoipa::openapi::{
    Components, ComponentsBuilder, ContentBuilder, OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    ResponseBuilder,
};

/// Converts the model into an OpenAPI document using the given canonical
/// paths as the path source.
pub fn convert_model(model: &EdmModel, paths: &[ODataPath]) -> OpenApi {
    let mut paths_builder = PathsBuilder::new();

    for path in paths {
        let mut item = PathItemBuilder::new().build();
        for method in &path.http_methods {
            if let Some(op) = build_operation(model, path, method) {
                set_operation(&mut item, method, op);
            }
        }
        paths_builder = paths_builder.path(path.template.clone(), item);
    }

    OpenApiBuilder::new()
        .paths(paths_builder.build())
        .components(Some(build_components(model)))
        .build()
}

/// The pure EDM-driven fallback path source: entity-set, by-key, singleton
/// and `$metadata` paths with their conventional method sets.
pub fn model_default_paths(model: &EdmModel) -> Vec<ODataPath> {
    let mut out = Vec::new();

    for set in &model.entity_sets {
        let mut collection =
            ODataPath::from_segments(vec![ODataSegment::NavigationSource(set.name.clone())]);
        collection.add_method(HttpMethod::Get);
        collection.add_method(HttpMethod::Post);
        out.push(collection);

        if let Some(key_mappings) = default_key_mappings(model, &set.entity_type) {
            let mut keyed = ODataPath::from_segments(vec![
                ODataSegment::NavigationSource(set.name.clone()),
                ODataSegment::Key {
                    entity_type: set.entity_type.clone(),
                    key_mappings,
                },
            ]);
            keyed.add_method(HttpMethod::Get);
            keyed.add_method(HttpMethod::Patch);
            keyed.add_method(HttpMethod::Delete);
            out.push(keyed);
        }
    }

    for singleton in &model.singletons {
        let mut path =
            ODataPath::from_segments(vec![ODataSegment::NavigationSource(singleton.name.clone())]);
        path.add_method(HttpMethod::Get);
        path.add_method(HttpMethod::Patch);
        out.push(path);
    }

    let mut metadata = ODataPath::from_segments(vec![ODataSegment::Metadata]);
    metadata.add_method(HttpMethod::Get);
    out.push(metadata);

    out
}

/// Key-property-to-route-variable mappings for an entity type.
///
/// A single key maps to the conventional `{key}` variable; compound keys
/// reuse the property names. `None` when the type or its key is undeclared.
fn default_key_mappings(model: &EdmModel, entity_type: &str) -> Option<Vec<(String, String)>> {
    let ty = model.entity_type(entity_type)?;
    if ty.key.is_empty() {
        return None;
    }
    if ty.key.len() == 1 {
        return Some(vec![(ty.key[0].clone(), "key".to_string())]);
    }
    Some(ty.key.iter().map(|k| (k.clone(), k.clone())).collect())
}

/// Builds component schemas for every declared entity and complex type.
fn build_components(model: &EdmModel) -> Components {
    let mut builder = ComponentsBuilder::new();
    for entity in &model.entity_types {
        builder = builder.schema(
            entity.name.clone(),
            structural_schema(model, &entity.name, &entity.structural_properties),
        );
    }
    for complex in &model.complex_types {
        builder = builder.schema(
            complex.name.clone(),
            structural_schema(model, &complex.name, &complex.properties),
        );
    }
    builder.build()
}

/// Object schema for a named structured type.
fn structural_schema(
    model: &EdmModel,
    name: &str,
    properties: &[crate::edm::StructuralProperty],
) -> Schema {
    let mut builder = ObjectBuilder::new()
        .schema_type(Type::Object)
        .description(Some(format!("{}.{}", model.namespace, name)));
    for property in properties {
        builder = builder.property(property.name.clone(), schema_for_type(model, &property.ty));
        if !property.ty.nullable {
            builder = builder.required(property.name.clone());
        }
    }
    Schema::Object(builder.build())
}

/// Builds the operation for one method on one path, or `None` when the
/// method/shape combination is outside the base conversion table.
fn build_operation(model: &EdmModel, path: &ODataPath, method: &HttpMethod) -> Option<Operation> {
    let entity = target_entity_type(model, &path.segments);
    let source = navigation_source_name(&path.segments);
    let is_collection = path.is_collection();

    let op = match method {
        HttpMethod::Get => get_operation(model, path, entity, source, is_collection),
        HttpMethod::Post if is_collection => create_operation(entity, source),
        HttpMethod::Put | HttpMethod::Patch if !is_collection && entity.is_some() => {
            update_operation(entity, source)
        }
        HttpMethod::Delete if !is_collection => delete_operation(source),
        _ => return None,
    };

    Some(attach_route_parameters(op, model, path).build())
}

/// Declares a path parameter for every route variable in the template.
fn attach_route_parameters(
    mut op: OperationBuilder,
    model: &EdmModel,
    path: &ODataPath,
) -> OperationBuilder {
    for parameter in route_parameters(model, path) {
        op = op.parameter(parameter);
    }
    op
}

/// Path parameters derived from key segments and any leftover template
/// variables (the latter default to string schemas).
fn route_parameters(model: &EdmModel, path: &ODataPath) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    let mut covered = Vec::new();

    for segment in &path.segments {
        if let ODataSegment::Key {
            entity_type,
            key_mappings,
        } = segment
        {
            for (property, variable) in key_mappings {
                let schema = key_property_schema(model, entity_type, property);
                parameters.push(path_parameter(variable, schema));
                covered.push(variable.clone());
            }
        }
    }

    for variable in route_variables(&path.template) {
        if !covered.contains(&variable) {
            parameters.push(path_parameter(
                &variable,
                Schema::Object(ObjectBuilder::new().schema_type(Type::String).build()),
            ));
        }
    }

    parameters
}

/// Schema of a key property, string when the model does not declare it.
pub(crate) fn key_property_schema(model: &EdmModel, entity_type: &str, property: &str) -> Schema {
    let declared = model.entity_type(entity_type).and_then(|ty| {
        ty.structural_properties
            .iter()
            .find(|p| p.name == property)
            .map(|p| &p.ty)
    });
    match declared {
        Some(ty) => match schema_for_type(model, ty) {
            RefOr::T(schema) => schema,
            // Key properties are primitive; a reference here means the model
            // is inconsistent, so fall back to string.
            RefOr::Ref(_) => Schema::Object(ObjectBuilder::new().schema_type(Type::String).build()),
        },
        None => Schema::Object(ObjectBuilder::new().schema_type(Type::String).build()),
    }
}

pub(crate) fn path_parameter(name: &str, schema: Schema) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(schema))
        .build()
}

/// Extracts `{variable}` names from a path template, in order.
pub(crate) fn route_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        rest = &rest[start + 1..];
        let Some(end) = rest.find('}') else {
            break;
        };
        variables.push(rest[..end].to_string());
        rest = &rest[end + 1..];
    }
    variables
}

fn get_operation(
    model: &EdmModel,
    path: &ODataPath,
    entity: Option<&EntityType>,
    source: Option<&str>,
    is_collection: bool,
) -> OperationBuilder {
    match path.segments.last() {
        Some(ODataSegment::Count) => {
            return OperationBuilder::new()
                .summary(Some(count_summary(source)))
                .response(
                    "200",
                    ResponseBuilder::new()
                        .description("The count of the resource")
                        .content(
                            "text/plain",
                            ContentBuilder::new()
                                .schema(Some(Schema::Object(
                                    ObjectBuilder::new()
                                        .schema_type(Type::Integer)
                                        .format(Some(SchemaFormat::KnownFormat(
                                            utoipa::openapi::schema::KnownFormat::Int64,
                                        )))
                                        .build(),
                                )))
                                .build(),
                        )
                        .build(),
                );
        }
        Some(ODataSegment::Metadata) => {
            return OperationBuilder::new()
                .summary(Some("Get the service metadata document"))
                .response(
                    "200",
                    ResponseBuilder::new()
                        .description("The CSDL metadata document")
                        .content(
                            "application/xml",
                            ContentBuilder::new()
                                .schema(Some(Schema::Object(
                                    ObjectBuilder::new().schema_type(Type::String).build(),
                                )))
                                .build(),
                        )
                        .build(),
                );
        }
        _ => {}
    }

    let entity_schema = entity_ref_schema(model, entity);
    let (summary, schema) = if is_collection {
        (
            match source {
                Some(name) => format!("Get entities from {}", name),
                None => format!("Get {}", path.template),
            },
            RefOr::T(Schema::Array(
                ArrayBuilder::new()
                    .items(ArrayItems::RefOrSchema(Box::new(entity_schema)))
                    .build(),
            )),
        )
    } else {
        (
            match source {
                Some(name) => format!("Get entity from {}", name),
                None => format!("Get {}", path.template),
            },
            entity_schema,
        )
    };

    OperationBuilder::new().summary(Some(summary)).response(
        "200",
        ResponseBuilder::new()
            .description("Retrieved entities")
            .content(
                "application/json",
                ContentBuilder::new().schema(Some(schema)).build(),
            )
            .build(),
    )
}

fn create_operation(entity: Option<&EntityType>, source: Option<&str>) -> OperationBuilder {
    let schema = match entity {
        Some(ty) => RefOr::Ref(Ref::from_schema_name(ty.name.as_str())),
        None => RefOr::T(generic_object()),
    };
    OperationBuilder::new()
        .summary(Some(match source {
            Some(name) => format!("Add new entity to {}", name),
            None => "Add new entity".to_string(),
        }))
        .request_body(Some(
            utoipa::openapi::request_body::RequestBodyBuilder::new()
                .description(Some("New entity"))
                .required(Some(Required::True))
                .content(
                    "application/json",
                    ContentBuilder::new().schema(Some(schema.clone())).build(),
                )
                .build(),
        ))
        .response(
            "201",
            ResponseBuilder::new()
                .description("Created entity")
                .content(
                    "application/json",
                    ContentBuilder::new().schema(Some(schema)).build(),
                )
                .build(),
        )
}

fn update_operation(entity: Option<&EntityType>, source: Option<&str>) -> OperationBuilder {
    let schema = match entity {
        Some(ty) => RefOr::Ref(Ref::from_schema_name(ty.name.as_str())),
        None => RefOr::T(generic_object()),
    };
    OperationBuilder::new()
        .summary(Some(match source {
            Some(name) => format!("Update entity in {}", name),
            None => "Update entity".to_string(),
        }))
        .request_body(Some(
            utoipa::openapi::request_body::RequestBodyBuilder::new()
                .description(Some("New property values"))
                .required(Some(Required::True))
                .content(
                    "application/json",
                    ContentBuilder::new().schema(Some(schema)).build(),
                )
                .build(),
        ))
        .response("204", ResponseBuilder::new().description("Success").build())
}

fn delete_operation(source: Option<&str>) -> OperationBuilder {
    OperationBuilder::new()
        .summary(Some(match source {
            Some(name) => format!("Delete entity from {}", name),
            None => "Delete entity".to_string(),
        }))
        .response("204", ResponseBuilder::new().description("Success").build())
}

fn count_summary(source: Option<&str>) -> String {
    match source {
        Some(name) => format!("Get the number of entities in {}", name),
        None => "Get the count of the resource".to_string(),
    }
}

fn entity_ref_schema(model: &EdmModel, entity: Option<&EntityType>) -> RefOr<Schema> {
    match entity {
        Some(ty) if model.entity_type(&ty.name).is_some() => {
            RefOr::Ref(Ref::from_schema_name(ty.name.as_str()))
        }
        _ => RefOr::T(generic_object()),
    }
}

/// Name of the first navigation source on the path, if any.
fn navigation_source_name(segments: &[ODataSegment]) -> Option<&str> {
    segments.iter().find_map(|segment| match segment {
        ODataSegment::NavigationSource(name) => Some(name.as_str()),
        _ => None,
    })
}

/// Resolves the entity type the path ultimately addresses by walking
/// navigation-source, navigation-property and cast segments.
fn target_entity_type<'a>(model: &'a EdmModel, segments: &[ODataSegment]) -> Option<&'a EntityType> {
    let mut current: Option<&EntityType> = None;
    for segment in segments {
        match segment {
            ODataSegment::NavigationSource(name) => {
                let type_name = model
                    .entity_set(name)
                    .map(|s| s.entity_type.as_str())
                    .or_else(|| model.singleton(name).map(|s| s.entity_type.as_str()));
                current = type_name.and_then(|n| model.entity_type(n));
            }
            ODataSegment::NavigationProperty(name) => {
                current = current
                    .and_then(|ty| ty.navigation_properties.iter().find(|p| &p.name == name))
                    .and_then(|nav| model.entity_type(&nav.target_type));
            }
            ODataSegment::TypeCast(qualified) => {
                let unqualified = qualified.rsplit('.').next().unwrap_or(qualified);
                if let Some(cast) = model.entity_type(unqualified) {
                    current = Some(cast);
                }
            }
            ODataSegment::ComplexProperty(_) => {
                // Complex values carry no entity context.
                current = None;
            }
            _ => {}
        }
    }
    current
}

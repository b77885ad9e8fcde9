#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts EDM type references into OpenAPI schemas. Primitive kinds map
//! to type/format pairs; declared complex and entity types map to component
//! references; collections wrap the recursively derived element schema in
//! an array. Unmapped kinds default to a generic object, never an error.

use crate::edm::{EdmModel, EdmTypeKind, EdmTypeRef, PrimitiveKind};
use utoipa::openapi::schema::{
    ArrayBuilder, ArrayItems, KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type,
};
use utoipa::openapi::{Ref, RefOr};

/// Maps an EDM type reference to an OpenAPI schema.
///
/// Collection-valued references become arrays of the element schema.
pub fn schema_for_type(model: &EdmModel, ty: &EdmTypeRef) -> RefOr<Schema> {
    let element = element_schema(model, &ty.kind);
    if ty.is_collection {
        RefOr::T(Schema::Array(
            ArrayBuilder::new()
                .items(ArrayItems::RefOrSchema(Box::new(element)))
                .build(),
        ))
    } else {
        element
    }
}

/// Maps the single-valued element of a type reference.
fn element_schema(model: &EdmModel, kind: &EdmTypeKind) -> RefOr<Schema> {
    match kind {
        EdmTypeKind::Primitive(primitive) => RefOr::T(primitive_schema(*primitive)),
        EdmTypeKind::Complex(name) => {
            if model.complex_type(name).is_some() {
                RefOr::Ref(Ref::from_schema_name(name))
            } else {
                RefOr::T(generic_object())
            }
        }
        EdmTypeKind::Entity(name) => {
            if model.entity_type(name).is_some() {
                RefOr::Ref(Ref::from_schema_name(name))
            } else {
                RefOr::T(generic_object())
            }
        }
    }
}

/// Maps a primitive EDM kind to its OpenAPI type/format pair.
///
/// Kinds with no mapping (streams, geography) default to a generic object.
pub fn primitive_schema(kind: PrimitiveKind) -> Schema {
    let schema = match kind {
        PrimitiveKind::Boolean => ObjectBuilder::new().schema_type(Type::Boolean),
        PrimitiveKind::Byte => ObjectBuilder::new()
            .schema_type(Type::Integer)
            .format(Some(SchemaFormat::Custom("uint8".into()))),
        PrimitiveKind::SByte => ObjectBuilder::new()
            .schema_type(Type::Integer)
            .format(Some(SchemaFormat::Custom("int8".into()))),
        PrimitiveKind::Int16 => ObjectBuilder::new()
            .schema_type(Type::Integer)
            .format(Some(SchemaFormat::Custom("int16".into()))),
        PrimitiveKind::Int32 => ObjectBuilder::new()
            .schema_type(Type::Integer)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int32))),
        PrimitiveKind::Int64 => ObjectBuilder::new()
            .schema_type(Type::Integer)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int64))),
        PrimitiveKind::Single => ObjectBuilder::new()
            .schema_type(Type::Number)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Float))),
        PrimitiveKind::Double => ObjectBuilder::new()
            .schema_type(Type::Number)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Double))),
        PrimitiveKind::Decimal => ObjectBuilder::new()
            .schema_type(Type::Number)
            .format(Some(SchemaFormat::Custom("decimal".into()))),
        PrimitiveKind::String => ObjectBuilder::new().schema_type(Type::String),
        PrimitiveKind::Date => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Date))),
        PrimitiveKind::DateTimeOffset => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::DateTime))),
        PrimitiveKind::TimeOfDay => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::Custom("time".into()))),
        PrimitiveKind::Duration => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::Custom("duration".into()))),
        PrimitiveKind::Guid => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid))),
        PrimitiveKind::Binary => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Byte))),
        // No sensible mapping: fall back to a generic object.
        PrimitiveKind::Stream | PrimitiveKind::Geography => {
            return generic_object();
        }
    };
    Schema::Object(schema.build())
}

/// The untyped fallback schema.
pub fn generic_object() -> Schema {
    Schema::Object(ObjectBuilder::new().schema_type(Type::Object).build())
}

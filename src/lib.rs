#![deny(missing_docs)]

//! # OData OpenAPI
//!
//! Library for turning an OData Entity Data Model plus a set of registered
//! HTTP endpoints into an enriched OpenAPI document: OData query-option
//! parameters on collection reads, canonical path templates deduplicated
//! across endpoints, and the property / `$value` / `$ref` paths a plain
//! EDM-to-OpenAPI conversion omits.

/// Shared error types.
pub mod error;

/// EDM input model.
pub mod edm;

/// Endpoint input model and abstract segment templates.
pub mod endpoints;

/// Canonical OData segments, path templates and segment translation.
pub mod paths;

/// Collection vs. non-collection path classification.
pub mod classifier;

/// Endpoint path collection.
pub mod collector;

/// Query-option catalog and injection.
pub mod query_options;

/// EDM type to OpenAPI schema mapping.
pub mod type_mapping;

/// HTTP-method parsing and path-item operation access.
pub mod operations;

/// Base EDM-to-OpenAPI conversion.
pub mod converter;

/// Missing-path synthesis.
pub mod synthesizer;

/// Document generation and registries.
pub mod generator;

pub use classifier::is_collection_path;
pub use collector::{collect_odata_paths, normalize_route_pattern};
pub use converter::{convert_model, model_default_paths};
pub use edm::{
    ComplexType, EdmModel, EdmTypeKind, EdmTypeRef, EntitySet, EntityType, NavigationProperty,
    PrimitiveKind, Singleton, StructuralProperty,
};
pub use endpoints::{Endpoint, ODataRouteMetadata, SegmentTemplate};
pub use error::{AppError, AppResult};
pub use generator::{ApiInfo, DocumentSettings, ODataOpenApiGenerator};
pub use paths::{translate_route, translate_segment, ODataPath, ODataSegment};
pub use query_options::{apply_query_options, query_option_parameters, QueryOptionSettings};
pub use synthesizer::add_missing_paths;
pub use type_mapping::schema_for_type;

#![deny(missing_docs)]

//! # Endpoint Metadata
//!
//! The live routing input: an unordered collection of registered HTTP
//! endpoints, each optionally tagged with OData routing metadata (a route
//! prefix plus an ordered sequence of abstract segment templates).
//!
//! Segment templates are a closed tagged union rather than a runtime type
//! switch; kinds the translator does not recognize are simply skipped.

/// One abstract OData path-segment descriptor, as declared by the routing
/// layer for a registered endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentTemplate {
    /// An entity-set segment, e.g. `Products`.
    EntitySet(String),
    /// A singleton segment, e.g. `Me`.
    Singleton(String),
    /// A key segment addressing one entity of the given type.
    Key {
        /// Name of the entity type the key addresses.
        entity_type: String,
        /// Key-property-to-route-variable mappings, e.g. `("Id", "key")`.
        key_mappings: Vec<(String, String)>,
    },
    /// A type-cast segment carrying a qualified type name.
    Cast(String),
    /// A navigation-property segment.
    Navigation(String),
    /// A navigation-link (`$ref`-style) segment.
    NavigationLink(String),
    /// A bound function segment carrying a qualified name.
    Function(String),
    /// A bound action segment carrying a qualified name.
    Action(String),
    /// An unbound function import.
    FunctionImport {
        /// Function import name.
        name: String,
        /// Parameter-to-route-variable mappings.
        parameter_mappings: Vec<(String, String)>,
    },
    /// An unbound action import.
    ActionImport(String),
    /// A structural property segment.
    Property {
        /// Property name.
        name: String,
        /// Whether the property's declared type is a complex type.
        is_complex: bool,
    },
    /// A raw `$value` segment.
    Value,
    /// A `$count` segment.
    Count,
    /// A `$metadata` segment.
    Metadata,
    /// A dynamic or otherwise unrecognized template kind.
    Dynamic(String),
}

/// OData routing metadata attached to a registered endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ODataRouteMetadata {
    /// The route prefix the endpoint was registered under, e.g. `odata`.
    pub route_prefix: String,
    /// Ordered segment templates describing the route.
    pub segments: Vec<SegmentTemplate>,
}

impl ODataRouteMetadata {
    /// Creates metadata for the given prefix and segments.
    pub fn new(route_prefix: impl Into<String>, segments: Vec<SegmentTemplate>) -> Self {
        ODataRouteMetadata {
            route_prefix: route_prefix.into(),
            segments,
        }
    }
}

/// One registered HTTP endpoint as seen by the hosting framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// The raw route-pattern text, e.g. `odata/Products({key})`.
    pub route_pattern: String,
    /// OData routing metadata; absent for non-OData endpoints.
    pub metadata: Option<ODataRouteMetadata>,
    /// Declared HTTP method names; empty means "not constrained".
    pub http_methods: Vec<String>,
}

impl Endpoint {
    /// Creates an endpoint without OData metadata.
    pub fn new(route_pattern: impl Into<String>) -> Self {
        Endpoint {
            route_pattern: route_pattern.into(),
            metadata: None,
            http_methods: Vec::new(),
        }
    }

    /// Attaches OData routing metadata.
    pub fn with_metadata(mut self, metadata: ODataRouteMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Appends a declared HTTP method name.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.http_methods.push(method.into());
        self
    }
}

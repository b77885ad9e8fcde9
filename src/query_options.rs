#![deny(missing_docs)]

//! # Query-Option Parameters
//!
//! Static knowledge of the standard OData query options (`$filter`,
//! `$select`, `$expand`, `$orderby`, `$top`, `$skip`, `$count`, `$search`,
//! `$format`) and their OpenAPI parameter shapes, driven by a flat settings
//! record. Injection into an operation is idempotent: a parameter is added
//! only when no existing parameter shares its name, so enriching the same
//! document twice yields the same parameter set as enriching it once.

use utoipa::openapi::path::{Operation, Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::{RefOr, Required};

/// The `$format` values advertised for OData JSON payloads.
const FORMAT_VALUES: [&str; 4] = [
    "application/json;odata.metadata=minimal",
    "application/json;odata.metadata=full",
    "application/json;odata.metadata=none",
    "application/json",
];

/// Configuration for query-option enrichment of one document.
///
/// Immutable once handed to the enrichment pipeline for a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptionSettings {
    /// Emit a `$filter` parameter on collection GETs.
    pub enable_filter: bool,
    /// Emit a `$select` parameter.
    pub enable_select: bool,
    /// Emit an `$expand` parameter.
    pub enable_expand: bool,
    /// Emit an `$orderby` parameter.
    pub enable_order_by: bool,
    /// Emit a `$top` parameter.
    pub enable_top: bool,
    /// Emit a `$skip` parameter.
    pub enable_skip: bool,
    /// Emit a `$count` parameter.
    pub enable_count: bool,
    /// Emit a `$search` parameter.
    pub enable_search: bool,
    /// Emit a `$format` parameter.
    pub enable_format: bool,
    /// Annotate paged collection responses with count/next-link metadata.
    pub enable_pagination: bool,
    /// Upper bound advertised on `$top`.
    pub max_top: u64,
    /// Example value advertised on `$top`.
    pub default_top: u64,
    /// Example for `$filter`.
    pub filter_example: Option<String>,
    /// Example for `$select`.
    pub select_example: Option<String>,
    /// Example for `$expand`.
    pub expand_example: Option<String>,
    /// Example for `$orderby`.
    pub order_by_example: Option<String>,
    /// Example for `$search`.
    pub search_example: Option<String>,
}

impl Default for QueryOptionSettings {
    fn default() -> Self {
        QueryOptionSettings {
            enable_filter: true,
            enable_select: true,
            enable_expand: true,
            enable_order_by: true,
            enable_top: true,
            enable_skip: true,
            enable_count: true,
            enable_search: true,
            enable_format: true,
            enable_pagination: true,
            max_top: 1000,
            default_top: 50,
            filter_example: None,
            select_example: None,
            expand_example: None,
            order_by_example: None,
            search_example: None,
        }
    }
}

impl QueryOptionSettings {
    /// Settings with every option (and pagination) disabled.
    pub fn disabled() -> Self {
        QueryOptionSettings {
            enable_filter: false,
            enable_select: false,
            enable_expand: false,
            enable_order_by: false,
            enable_top: false,
            enable_skip: false,
            enable_count: false,
            enable_search: false,
            enable_format: false,
            enable_pagination: false,
            ..QueryOptionSettings::default()
        }
    }

    /// Sets the `$top` maximum bound.
    pub fn with_max_top(mut self, max_top: u64) -> Self {
        self.max_top = max_top;
        self
    }

    /// Sets the `$top` example value.
    pub fn with_default_top(mut self, default_top: u64) -> Self {
        self.default_top = default_top;
        self
    }

    /// Sets the `$filter` example string.
    pub fn with_filter_example(mut self, example: impl Into<String>) -> Self {
        self.filter_example = Some(example.into());
        self
    }
}

/// Builds the enabled query-option parameters in catalog order.
pub fn query_option_parameters(settings: &QueryOptionSettings) -> Vec<Parameter> {
    let mut parameters = Vec::new();

    if settings.enable_filter {
        parameters.push(string_option(
            "$filter",
            "Filter items by property values",
            settings.filter_example.as_deref(),
        ));
    }
    if settings.enable_select {
        parameters.push(string_option(
            "$select",
            "Select properties to be returned",
            settings.select_example.as_deref(),
        ));
    }
    if settings.enable_expand {
        parameters.push(string_option(
            "$expand",
            "Expand related entities",
            settings.expand_example.as_deref(),
        ));
    }
    if settings.enable_order_by {
        parameters.push(string_option(
            "$orderby",
            "Order items by property values",
            settings.order_by_example.as_deref(),
        ));
    }
    if settings.enable_top {
        let schema = ObjectBuilder::new()
            .schema_type(Type::Integer)
            .minimum(Some(0.0))
            .maximum(Some(settings.max_top as f64))
            .example(Some(serde_json::json!(settings.default_top)))
            .build();
        parameters.push(query_parameter(
            "$top",
            "Show only the first n items",
            Schema::Object(schema),
        ));
    }
    if settings.enable_skip {
        let schema = ObjectBuilder::new()
            .schema_type(Type::Integer)
            .minimum(Some(0.0))
            .build();
        parameters.push(query_parameter(
            "$skip",
            "Skip the first n items",
            Schema::Object(schema),
        ));
    }
    if settings.enable_count {
        let schema = ObjectBuilder::new().schema_type(Type::Boolean).build();
        parameters.push(query_parameter(
            "$count",
            "Include count of items",
            Schema::Object(schema),
        ));
    }
    if settings.enable_search {
        parameters.push(string_option(
            "$search",
            "Search items by search phrases",
            settings.search_example.as_deref(),
        ));
    }
    if settings.enable_format {
        let schema = ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(FORMAT_VALUES))
            .build();
        parameters.push(query_parameter(
            "$format",
            "Response format",
            Schema::Object(schema),
        ));
    }

    parameters
}

/// Injects the enabled query-option parameters into an operation.
///
/// Parameters already present by name are left untouched; when pagination is
/// enabled, the `200` array response (if any) gets a paging annotation on
/// its description unless one already exists.
pub fn apply_query_options(op: &mut Operation, settings: &QueryOptionSettings) {
    for parameter in query_option_parameters(settings) {
        add_parameter_if_absent(op, parameter);
    }
    if settings.enable_pagination {
        annotate_paged_response(op);
    }
}

/// Adds a parameter unless one with the same name already exists.
fn add_parameter_if_absent(op: &mut Operation, parameter: Parameter) {
    let parameters = op.parameters.get_or_insert_with(Vec::new);
    if parameters.iter().any(|p| p.name == parameter.name) {
        return;
    }
    parameters.push(parameter);
}

/// Marks the `200` array response as carrying paging metadata.
///
/// Existing descriptions are never overwritten.
fn annotate_paged_response(op: &mut Operation) {
    let Some(RefOr::T(response)) = op.responses.responses.get_mut("200") else {
        return;
    };
    for (_, content) in response.content.iter_mut() {
        if let Some(RefOr::T(Schema::Array(array))) = content.schema.as_mut() {
            if array.description.is_none() {
                array.description = Some(
                    "The collection result; @odata.count and @odata.nextLink annotations \
                     describe the total count and the next page when server-side paging applies."
                        .to_string(),
                );
            }
        }
    }
}

fn string_option(name: &str, description: &str, example: Option<&str>) -> Parameter {
    let mut schema = ObjectBuilder::new().schema_type(Type::String);
    if let Some(example) = example {
        schema = schema.example(Some(serde_json::json!(example)));
    }
    query_parameter(name, description, Schema::Object(schema.build()))
}

fn query_parameter(name: &str, description: &str, schema: Schema) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(schema))
        .build()
}

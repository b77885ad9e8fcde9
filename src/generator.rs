#![deny(missing_docs)]

//! # Document Generation
//!
//! The enrichment pipeline's front door. A generator holds two registries:
//! named document configurations and route-prefix-to-EDM-model mappings.
//! `generate` resolves both, runs base conversion with the collected
//! endpoint paths (or the pure EDM fallback when no endpoint data is
//! supplied), then reconciles declared methods, injects query-option
//! parameters into collection GETs, and synthesizes the derivable paths
//! base conversion cannot produce.
//!
//! Only unknown registry keys are errors; every per-endpoint or per-segment
//! anomaly downstream degrades to a skip.

use crate::classifier::is_collection_path;
use crate::collector::collect_odata_paths;
use crate::converter::{convert_model, model_default_paths};
use crate::edm::EdmModel;
use crate::endpoints::Endpoint;
use crate::error::{AppError, AppResult};
use crate::operations::{method_name, operation, set_operation};
use crate::paths::ODataPath;
use crate::query_options::{apply_query_options, QueryOptionSettings};
use crate::synthesizer::add_missing_paths;
use indexmap::IndexMap;
use url::Url;
use utoipa::openapi::path::{HttpMethod, Operation, OperationBuilder};
use utoipa::openapi::server::ServerBuilder;
use utoipa::openapi::{InfoBuilder, OpenApi, ResponseBuilder};

/// Title, version and optional description for a generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    /// Document title.
    pub title: String,
    /// Document version string.
    pub version: String,
    /// Optional document description.
    pub description: Option<String>,
}

impl ApiInfo {
    /// Creates an info record with the given title and version.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        ApiInfo {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }

    /// Sets the document description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Per-document generation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSettings {
    /// Route prefix the document covers; also the model-registry key.
    pub route_prefix: String,
    /// Document info.
    pub info: ApiInfo,
    /// Query-option enrichment configuration.
    pub query_options: QueryOptionSettings,
}

impl DocumentSettings {
    /// Creates settings with default query options.
    pub fn new(route_prefix: impl Into<String>, info: ApiInfo) -> Self {
        DocumentSettings {
            route_prefix: route_prefix.into(),
            info,
            query_options: QueryOptionSettings::default(),
        }
    }

    /// Replaces the query-option configuration.
    pub fn with_query_options(mut self, query_options: QueryOptionSettings) -> Self {
        self.query_options = query_options;
        self
    }
}

/// Registry of configured documents and EDM models, and the entry point for
/// producing enriched OpenAPI documents from them.
#[derive(Debug, Clone, Default)]
pub struct ODataOpenApiGenerator {
    documents: IndexMap<String, DocumentSettings>,
    models: IndexMap<String, EdmModel>,
}

impl ODataOpenApiGenerator {
    /// Creates an empty generator.
    pub fn new() -> Self {
        ODataOpenApiGenerator::default()
    }

    /// Registers a named document configuration.
    pub fn with_document(mut self, name: impl Into<String>, settings: DocumentSettings) -> Self {
        self.documents.insert(name.into(), settings);
        self
    }

    /// Registers an EDM model under a route prefix.
    pub fn with_model(mut self, route_prefix: impl Into<String>, model: EdmModel) -> Self {
        self.models.insert(route_prefix.into(), model);
        self
    }

    /// Generates the enriched OpenAPI document for a configured name.
    ///
    /// When `endpoints` is supplied the collected endpoint paths drive the
    /// document; otherwise the pure EDM default paths do. `host` and
    /// `base_path` shape the single server entry; absent or unparseable
    /// values degrade to `https://localhost/{prefix}`.
    pub fn generate(
        &self,
        name: &str,
        endpoints: Option<&[Endpoint]>,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> AppResult<OpenApi> {
        let settings = self.document_settings(name)?;
        let model = self.model_for_prefix(&settings.route_prefix)?;

        let paths = match endpoints {
            Some(endpoints) => collect_odata_paths(endpoints, &settings.route_prefix),
            None => model_default_paths(model),
        };

        let mut doc = convert_model(model, &paths);

        doc.info = InfoBuilder::new()
            .title(settings.info.title.clone())
            .version(settings.info.version.clone())
            .description(settings.info.description.clone())
            .build();
        doc.servers = Some(vec![ServerBuilder::new()
            .url(service_root(host, base_path, &settings.route_prefix))
            .build()]);

        if endpoints.is_some() {
            reconcile_declared_methods(&mut doc, &paths);
        }
        enrich_collection_operations(&mut doc, &settings.query_options);
        add_missing_paths(model, &mut doc);

        Ok(doc)
    }

    fn document_settings(&self, name: &str) -> AppResult<&DocumentSettings> {
        self.documents.get(name).ok_or_else(|| {
            AppError::Configuration(format!(
                "No OpenAPI document named '{}' is configured; known documents: [{}]",
                name,
                join_keys(self.documents.keys())
            ))
        })
    }

    fn model_for_prefix(&self, route_prefix: &str) -> AppResult<&EdmModel> {
        self.models
            .iter()
            .find(|(prefix, _)| prefix.eq_ignore_ascii_case(route_prefix))
            .map(|(_, model)| model)
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "No EDM model is registered for route prefix '{}'; known prefixes: [{}]",
                    route_prefix,
                    join_keys(self.models.keys())
                ))
            })
    }
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    keys.map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Server URL for the document: `https://{host}{base_path}/{prefix}`.
///
/// A missing or unparseable host falls back to the localhost default.
fn service_root(host: Option<&str>, base_path: Option<&str>, route_prefix: &str) -> String {
    let fallback = format!("https://localhost/{}", route_prefix);
    let Some(host) = host else {
        return fallback;
    };
    let candidate = format!(
        "https://{}{}/{}",
        host,
        base_path.unwrap_or(""),
        route_prefix
    );
    match Url::parse(&candidate) {
        Ok(url) => url.to_string(),
        Err(_) => fallback,
    }
}

/// Ensures every declared method on every collected path has an operation.
///
/// Methods outside the base conversion table get a minimal default
/// operation; operations base conversion produced are left untouched.
fn reconcile_declared_methods(doc: &mut OpenApi, paths: &[ODataPath]) {
    for path in paths {
        let Some(item) = doc.paths.paths.get_mut(&path.template) else {
            continue;
        };
        for method in &path.http_methods {
            if operation(item, method).is_none() {
                set_operation(item, method, default_operation(method, &path.template));
            }
        }
    }
}

fn default_operation(method: &HttpMethod, template: &str) -> Operation {
    OperationBuilder::new()
        .summary(Some(format!("{} {}", method_name(method), template)))
        .response("200", ResponseBuilder::new().description("Success").build())
        .build()
}

/// Applies query-option enrichment to every collection-classified GET.
fn enrich_collection_operations(doc: &mut OpenApi, settings: &QueryOptionSettings) {
    for (template, item) in doc.paths.paths.iter_mut() {
        if !is_collection_path(template) {
            continue;
        }
        if let Some(get) = item.get.as_mut() {
            apply_query_options(get, settings);
        }
    }
}

#![deny(missing_docs)]

//! # Endpoint Path Collection
//!
//! One pass over the registered endpoints: filter to the target route
//! prefix, normalize the route text, union HTTP methods across endpoints
//! that reduce to the same template, and translate each distinct template
//! into a canonical `ODataPath`.
//!
//! The accumulator is function-local and insertion-ordered, so result order
//! follows endpoint iteration order and concurrent document-generation
//! calls never share state.

use crate::endpoints::Endpoint;
use crate::operations::parse_http_method;
use crate::paths::{translate_route, ODataPath};
use indexmap::IndexMap;
use utoipa::openapi::path::HttpMethod;

/// Collects the canonical OData paths for all endpoints registered under
/// the given route prefix.
///
/// Endpoints without OData metadata, with a different prefix, or whose
/// segment templates translate to nothing are silently skipped; a malformed
/// endpoint never aborts collection.
pub fn collect_odata_paths(endpoints: &[Endpoint], route_prefix: &str) -> Vec<ODataPath> {
    let mut by_template: IndexMap<String, ODataPath> = IndexMap::new();

    for endpoint in endpoints {
        let Some(metadata) = &endpoint.metadata else {
            continue;
        };
        if !metadata.route_prefix.eq_ignore_ascii_case(route_prefix) {
            continue;
        }

        let template = normalize_route_pattern(&endpoint.route_pattern, route_prefix);
        let methods = declared_methods(endpoint);

        // Same template as an earlier endpoint: union methods, no re-translation.
        if let Some(existing) = by_template.get_mut(&template) {
            for method in methods {
                existing.add_method(method);
            }
            continue;
        }

        let Some(mut path) = translate_route(&metadata.segments) else {
            continue;
        };
        path.template = template.clone();
        for method in methods {
            path.add_method(method);
        }
        by_template.insert(template, path);
    }

    by_template.into_values().collect()
}

/// Normalizes an endpoint's raw route text relative to the route prefix.
///
/// Ensures a leading `/`, then strips the prefix segment: the bare prefix
/// (with or without a trailing slash) becomes `/`, a prefixed path keeps its
/// remainder, and anything else is returned unchanged. This never fails; an
/// endpoint with unexpected text simply keeps that text.
pub fn normalize_route_pattern(raw: &str, route_prefix: &str) -> String {
    let rooted = if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{}", raw)
    };

    let prefix = format!("/{}", route_prefix);
    let lower = rooted.to_ascii_lowercase();
    let prefix_lower = prefix.to_ascii_lowercase();

    if lower == prefix_lower || lower == format!("{}/", prefix_lower) {
        return "/".to_string();
    }
    if lower.starts_with(&format!("{}/", prefix_lower)) {
        return rooted[prefix.len()..].to_string();
    }
    rooted
}

/// Parses an endpoint's declared methods; `GET` when none are declared.
///
/// Individual unparseable method strings are skipped.
fn declared_methods(endpoint: &Endpoint) -> Vec<HttpMethod> {
    if endpoint.http_methods.is_empty() {
        return vec![HttpMethod::Get];
    }
    endpoint
        .http_methods
        .iter()
        .filter_map(|raw| parse_http_method(raw))
        .collect()
}

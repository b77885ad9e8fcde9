#![deny(missing_docs)]

//! # Canonical OData Paths
//!
//! Canonical segments, the segment translator, and the `ODataPath` value the
//! collector accumulates. Translation maps each abstract segment template to
//! at most one canonical segment; kinds with no canonical representation are
//! skipped, and a route whose translation yields zero segments is discarded.

use crate::endpoints::SegmentTemplate;
use utoipa::openapi::path::HttpMethod;

/// One canonical OData path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ODataSegment {
    /// An entity set or singleton (both are navigation sources).
    NavigationSource(String),
    /// A key segment addressing one entity.
    Key {
        /// Name of the addressed entity type.
        entity_type: String,
        /// Key-property-to-route-variable mappings.
        key_mappings: Vec<(String, String)>,
    },
    /// A type cast to a qualified type name.
    TypeCast(String),
    /// A navigation property.
    NavigationProperty(String),
    /// A bound function or action, by qualified name.
    Operation(String),
    /// An unbound function or action import.
    OperationImport {
        /// Import name.
        name: String,
        /// Parameter-to-route-variable mappings (functions only).
        parameter_mappings: Vec<(String, String)>,
    },
    /// A `$count` segment.
    Count,
    /// A `$metadata` segment.
    Metadata,
    /// A complex-typed structural property.
    ComplexProperty(String),
}

impl ODataSegment {
    /// Renders this segment into the path template being built.
    ///
    /// Key segments render inline on the preceding segment (`({key})`);
    /// everything else appends a `/`-separated segment.
    fn render(&self, template: &mut String) {
        match self {
            ODataSegment::NavigationSource(name)
            | ODataSegment::NavigationProperty(name)
            | ODataSegment::ComplexProperty(name)
            | ODataSegment::TypeCast(name)
            | ODataSegment::Operation(name) => {
                template.push('/');
                template.push_str(name);
            }
            ODataSegment::OperationImport { name, .. } => {
                template.push('/');
                template.push_str(name);
            }
            ODataSegment::Key { key_mappings, .. } => {
                template.push('(');
                if key_mappings.len() == 1 {
                    template.push('{');
                    template.push_str(&key_mappings[0].1);
                    template.push('}');
                } else {
                    let parts: Vec<String> = key_mappings
                        .iter()
                        .map(|(prop, var)| format!("{}={{{}}}", prop, var))
                        .collect();
                    template.push_str(&parts.join(","));
                }
                template.push(')');
            }
            ODataSegment::Count => template.push_str("/$count"),
            ODataSegment::Metadata => template.push_str("/$metadata"),
        }
    }
}

/// A canonical OData path: ordered segments, the derived string template,
/// and the HTTP methods accumulated from one or more endpoints.
///
/// Identity is the string template: paths with equal templates are the same
/// logical path and their method sets are unioned by the collector.
#[derive(Debug, Clone, PartialEq)]
pub struct ODataPath {
    /// Ordered canonical segments.
    pub segments: Vec<ODataSegment>,
    /// The `/`-rooted string template, e.g. `/Products({key})`.
    pub template: String,
    /// Accumulated HTTP methods (insertion order, no duplicates).
    pub http_methods: Vec<HttpMethod>,
}

impl ODataPath {
    /// Builds a path from canonical segments, deriving the string template.
    pub fn from_segments(segments: Vec<ODataSegment>) -> Self {
        let mut template = String::new();
        for segment in &segments {
            segment.render(&mut template);
        }
        if template.is_empty() {
            template.push('/');
        }
        ODataPath {
            segments,
            template,
            http_methods: Vec::new(),
        }
    }

    /// Adds a method if it is not already present.
    pub fn add_method(&mut self, method: HttpMethod) {
        if !self.http_methods.contains(&method) {
            self.http_methods.push(method);
        }
    }

    /// Whether this path addresses a collection of entities, per the
    /// template-string classification rules.
    pub fn is_collection(&self) -> bool {
        crate::classifier::is_collection_path(&self.template)
    }
}

/// Translates one abstract segment template into its canonical segment.
///
/// Returns `None` for kinds with no canonical representation (`$value`,
/// non-complex properties, dynamic segments); callers skip those.
pub fn translate_segment(template: &SegmentTemplate) -> Option<ODataSegment> {
    match template {
        SegmentTemplate::EntitySet(name) | SegmentTemplate::Singleton(name) => {
            Some(ODataSegment::NavigationSource(name.clone()))
        }
        SegmentTemplate::Key {
            entity_type,
            key_mappings,
        } => Some(ODataSegment::Key {
            entity_type: entity_type.clone(),
            key_mappings: key_mappings.clone(),
        }),
        SegmentTemplate::Cast(type_name) => Some(ODataSegment::TypeCast(type_name.clone())),
        SegmentTemplate::Navigation(name) | SegmentTemplate::NavigationLink(name) => {
            Some(ODataSegment::NavigationProperty(name.clone()))
        }
        SegmentTemplate::Function(name) | SegmentTemplate::Action(name) => {
            Some(ODataSegment::Operation(name.clone()))
        }
        SegmentTemplate::FunctionImport {
            name,
            parameter_mappings,
        } => Some(ODataSegment::OperationImport {
            name: name.clone(),
            parameter_mappings: parameter_mappings.clone(),
        }),
        SegmentTemplate::ActionImport(name) => Some(ODataSegment::OperationImport {
            name: name.clone(),
            parameter_mappings: Vec::new(),
        }),
        SegmentTemplate::Count => Some(ODataSegment::Count),
        SegmentTemplate::Metadata => Some(ODataSegment::Metadata),
        SegmentTemplate::Property { name, is_complex } => {
            if *is_complex {
                Some(ODataSegment::ComplexProperty(name.clone()))
            } else {
                None
            }
        }
        // $value and dynamic segments have no canonical representation.
        SegmentTemplate::Value | SegmentTemplate::Dynamic(_) => None,
    }
}

/// Translates a full segment-template sequence, discarding skipped segments.
///
/// Returns `None` when no segment translates; such a route contributes no
/// path to the result set.
pub fn translate_route(templates: &[SegmentTemplate]) -> Option<ODataPath> {
    let segments: Vec<ODataSegment> = templates.iter().filter_map(translate_segment).collect();
    if segments.is_empty() {
        return None;
    }
    Some(ODataPath::from_segments(segments))
}

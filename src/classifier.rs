#![deny(missing_docs)]

//! # Path Classification
//!
//! Decides whether a path string (already relative to the OData route
//! prefix) addresses a collection of entities. Only collection paths are
//! eligible for query-option parameters.

/// Returns `true` when the path denotes a collection-style endpoint.
///
/// Rules, first match wins:
/// 1. A path containing `(` carries a key, cast, or parameterized operation
///    segment and is not a collection. An unbalanced `(` (malformed) is
///    classified the same way; this is defined behavior, not an error.
/// 2. A path ending in `/$value`, `/$ref`, or `/$count` is not a collection.
/// 3. Everything else is a collection.
pub fn is_collection_path(path: &str) -> bool {
    if path.contains('(') {
        return false;
    }
    if path.ends_with("/$value") || path.ends_with("/$ref") || path.ends_with("/$count") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        assert!(is_collection_path("/Products"));
        assert!(is_collection_path("/Products/Sample.NS.Discontinued"));
        assert!(is_collection_path("/Me/Orders"));
        assert!(is_collection_path("/"));
    }

    #[test]
    fn test_keyed_paths_are_not_collections() {
        assert!(!is_collection_path("/Products({key})"));
        assert!(!is_collection_path("/Products(1)/Supplier"));
        assert!(!is_collection_path("/OrderLines(OrderId={o},LineNo={l})"));
    }

    #[test]
    fn test_dollar_suffixes_are_not_collections() {
        assert!(!is_collection_path("/Products/$count"));
        assert!(!is_collection_path("/Me/$value"));
        assert!(!is_collection_path("/Products({key})/Supplier/$ref"));
    }

    #[test]
    fn test_unbalanced_paren_is_not_a_collection() {
        // Malformed, but defined: rule 1 is a plain substring test.
        assert!(!is_collection_path("/Products(1"));
    }
}

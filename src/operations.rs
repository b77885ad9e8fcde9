#![deny(missing_docs)]

//! # Operation Access
//!
//! Helpers for reading declared HTTP method names and for addressing the
//! operation slots of a `PathItem` by method. Method parsing is lenient:
//! strings that are not valid HTTP methods are skipped, never an error.

use utoipa::openapi::path::{HttpMethod, Operation, PathItem};

/// Parses an HTTP method name, case-insensitively.
///
/// Returns `None` for anything that is not one of the eight standard
/// methods; callers treat that as "skip".
pub fn parse_http_method(raw: &str) -> Option<HttpMethod> {
    match raw.to_ascii_uppercase().as_str() {
        "GET" => Some(HttpMethod::Get),
        "POST" => Some(HttpMethod::Post),
        "PUT" => Some(HttpMethod::Put),
        "DELETE" => Some(HttpMethod::Delete),
        "PATCH" => Some(HttpMethod::Patch),
        "HEAD" => Some(HttpMethod::Head),
        "OPTIONS" => Some(HttpMethod::Options),
        "TRACE" => Some(HttpMethod::Trace),
        _ => None,
    }
}

/// Renders a method for use in summaries and messages.
pub fn method_name(method: &HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Put => "PUT",
        HttpMethod::Delete => "DELETE",
        HttpMethod::Patch => "PATCH",
        HttpMethod::Head => "HEAD",
        HttpMethod::Options => "OPTIONS",
        HttpMethod::Trace => "TRACE",
    }
}

/// Borrows the operation registered for a method, if any.
pub fn operation<'a>(item: &'a PathItem, method: &HttpMethod) -> Option<&'a Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
        HttpMethod::Trace => item.trace.as_ref(),
    }
}

/// Mutably borrows the operation registered for a method, if any.
pub fn operation_mut<'a>(item: &'a mut PathItem, method: &HttpMethod) -> Option<&'a mut Operation> {
    match method {
        HttpMethod::Get => item.get.as_mut(),
        HttpMethod::Post => item.post.as_mut(),
        HttpMethod::Put => item.put.as_mut(),
        HttpMethod::Delete => item.delete.as_mut(),
        HttpMethod::Patch => item.patch.as_mut(),
        HttpMethod::Head => item.head.as_mut(),
        HttpMethod::Options => item.options.as_mut(),
        HttpMethod::Trace => item.trace.as_mut(),
    }
}

/// Registers an operation for a method, replacing any existing one.
pub fn set_operation(item: &mut PathItem, method: &HttpMethod, op: Operation) {
    match method {
        HttpMethod::Get => item.get = Some(op),
        HttpMethod::Post => item.post = Some(op),
        HttpMethod::Put => item.put = Some(op),
        HttpMethod::Delete => item.delete = Some(op),
        HttpMethod::Patch => item.patch = Some(op),
        HttpMethod::Head => item.head = Some(op),
        HttpMethod::Options => item.options = Some(op),
        HttpMethod::Trace => item.trace = Some(op),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::path::{OperationBuilder, PathItemBuilder};
    use utoipa::openapi::ResponseBuilder;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_http_method("get"), Some(HttpMethod::Get));
        assert_eq!(parse_http_method("Delete"), Some(HttpMethod::Delete));
        assert_eq!(parse_http_method("MERGE"), None);
        assert_eq!(parse_http_method(""), None);
    }

    #[test]
    fn test_set_and_read_operation() {
        let mut item = PathItemBuilder::new().build();
        let op = OperationBuilder::new()
            .summary(Some("probe"))
            .response("200", ResponseBuilder::new().description("OK").build())
            .build();

        assert!(operation(&item, &HttpMethod::Put).is_none());
        set_operation(&mut item, &HttpMethod::Put, op);
        let put = operation(&item, &HttpMethod::Put).unwrap();
        assert_eq!(put.summary.as_deref(), Some("probe"));
        assert!(operation_mut(&mut item, &HttpMethod::Put).is_some());
    }
}

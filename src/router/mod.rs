//! Route dispatch.
//!
//! A fixed, ordered table of `(predicate, route)` pairs, evaluated top to
//! bottom; the first match wins and an unmatched path gets a generic 400.
//! Predicates are substring/equality based on purpose: a path containing a
//! route marker anywhere — even inside a later query value — selects that
//! route, and marker stripping removes every occurrence. This loose matching
//! is observable behavior and is kept as-is.

use tracing::debug;

use crate::context::Context;
use crate::handlers;
use crate::http::{RequestHead, Response, StatusCode};

/// Body written when no request line could be parsed. Sent as-is, with no
/// status-line framing: a best-effort diagnostic, not a proper HTTP error.
pub const ILLEGAL_REQUEST: &str = "<html>Illegal request: no GET</html>";

const UNRECOGNIZED: &str = "I am not sure what you want me to do...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Predicate {
    /// The empty path (a request for `/`).
    Empty,
    /// Case-insensitive equality with the whole path.
    EqualsIgnoreCase(&'static str),
    /// Substring containment anywhere in the path.
    Contains(&'static str),
}

impl Predicate {
    fn matches(&self, path: &str) -> bool {
        match self {
            Predicate::Empty => path.is_empty(),
            Predicate::EqualsIgnoreCase(s) => path.eq_ignore_ascii_case(s),
            Predicate::Contains(marker) => path.contains(marker),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteKind {
    Root,
    JsonImage,
    RandomImage,
    File,
    Multiply,
    Github,
    Greet,
    Weather,
}

/// The route table, in priority order.
const ROUTES: &[(Predicate, RouteKind)] = &[
    (Predicate::Empty, RouteKind::Root),
    (Predicate::EqualsIgnoreCase("json"), RouteKind::JsonImage),
    (Predicate::EqualsIgnoreCase("random"), RouteKind::RandomImage),
    (Predicate::Contains("file/"), RouteKind::File),
    (Predicate::Contains("multiply?"), RouteKind::Multiply),
    (Predicate::Contains("github?"), RouteKind::Github),
    (Predicate::Contains("greet?"), RouteKind::Greet),
    (Predicate::Contains("weather?"), RouteKind::Weather),
];

// Removes every occurrence of the route marker before the remainder is
// handed to the handler.
fn strip_marker(path: &str, marker: &str) -> String {
    path.replace(marker, "")
}

/// Dispatches a decoded path to the first matching route.
pub async fn dispatch(ctx: &Context, path: &str) -> Response {
    for (predicate, kind) in ROUTES {
        if predicate.matches(path) {
            debug!(route = ?kind, path, "route matched");
            return run(ctx, *kind, path).await;
        }
    }

    debug!(path, "no route matched");
    Response::html(StatusCode::BadRequest, UNRECOGNIZED)
}

async fn run(ctx: &Context, kind: RouteKind, path: &str) -> Response {
    match kind {
        RouteKind::Root => handlers::root(ctx).await,
        RouteKind::JsonImage => handlers::json_image(),
        RouteKind::RandomImage => handlers::random_image(ctx),
        RouteKind::File => handlers::file_lookup(ctx, &strip_marker(path, "file/")),
        RouteKind::Multiply => handlers::multiply(&strip_marker(path, "multiply?")),
        RouteKind::Github => handlers::github(ctx, &strip_marker(path, "github?")).await,
        RouteKind::Greet => handlers::greet(&strip_marker(path, "greet?")),
        RouteKind::Weather => handlers::weather(ctx, &strip_marker(path, "weather?")).await,
    }
}

/// The bytes-in/bytes-out core: raw request-head bytes to response bytes.
///
/// A head with no parseable request line yields the fixed
/// [`ILLEGAL_REQUEST`] body without any status-line framing.
pub async fn respond(buf: &[u8], ctx: &Context) -> Vec<u8> {
    match RequestHead::parse(buf) {
        Some(head) => dispatch(ctx, head.path()).await.into_bytes().to_vec(),
        None => ILLEGAL_REQUEST.as_bytes().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{context, empty_context};
    use crate::config::Config;
    use crate::fetch::ScriptedFetch;
    use crate::files::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn unrecognized_path_is_400_with_fixed_message() {
        let ctx = empty_context();
        let response = dispatch(&ctx, "doesnotexist").await;
        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(response.body_text().contains("not sure"));
    }

    #[tokio::test]
    async fn multiply_route_dispatches() {
        let ctx = empty_context();
        let response = dispatch(&ctx, "multiply?num1=6&num2=7").await;
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body_text().contains("Result is: 42"));
    }

    #[tokio::test]
    async fn json_route_matches_case_insensitively() {
        let ctx = empty_context();
        assert_eq!(dispatch(&ctx, "JSON").await.status(), StatusCode::Ok);
    }

    #[tokio::test]
    async fn marker_in_query_value_still_selects_route() {
        // "multiply?" sits in a later query value of a greet path, but the
        // multiply route is tested first and containment matches it.
        let ctx = empty_context();
        let response = dispatch(&ctx, "greet?name=multiply?&lang=en").await;
        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(response.body_text().contains("Missing parameters"));
    }

    #[tokio::test]
    async fn earlier_route_wins_over_later_marker() {
        // Contains both "file/" and "greet?"; the file route is tested first.
        let ctx = empty_context();
        let response = dispatch(&ctx, "file/greet?name=x&lang=en").await;
        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body_text().contains("File not found"));
    }

    #[tokio::test]
    async fn root_route_on_empty_path() {
        let mut store = MemoryStore::new();
        store.insert("www/root.html", "<html>${links}</html>");
        let ctx = context(Config::mock(), Arc::new(ScriptedFetch::default()), store);
        let response = dispatch(&ctx, "").await;
        assert_eq!(response.status(), StatusCode::Ok);
    }

    #[tokio::test]
    async fn respond_serializes_dispatch_result() {
        let ctx = empty_context();
        let raw = b"GET /multiply?num1=3&num2=4 HTTP/1.1\r\n\r\n";
        let reply = String::from_utf8(respond(raw, &ctx).await).unwrap();
        assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(reply.contains("Result is: 12"));
    }

    #[tokio::test]
    async fn respond_without_request_line_is_unframed_diagnostic() {
        let ctx = empty_context();
        let reply = respond(b"Host: localhost\r\n\r\n", &ctx).await;
        assert_eq!(reply, ILLEGAL_REQUEST.as_bytes());
    }
}

//! End-to-end tests of the bytes-in/bytes-out core.
//!
//! Requests are built as raw head bytes and pushed through
//! [`minihttpd::router::respond`], the same entry point the connection
//! handler uses, with in-memory collaborators standing in for the file
//! system and the outbound fetcher.

use std::sync::Arc;

use tokio::time::Duration;

use minihttpd::cache::ResponseCache;
use minihttpd::config::Config;
use minihttpd::context::Context;
use minihttpd::fetch::ScriptedFetch;
use minihttpd::files::MemoryStore;
use minihttpd::router::{self, ILLEGAL_REQUEST};

fn test_context(fetch: Arc<ScriptedFetch>) -> Context {
    let mut store = MemoryStore::new();
    store.insert("www/root.html", "<html><body>${links}</body></html>");
    store.insert("www/index.html", "<html>static page</html>");

    Context {
        config: Config::mock(),
        cache: ResponseCache::new(Duration::from_secs(600)),
        fetcher: fetch,
        files: Arc::new(store),
    }
}

async fn get(ctx: &Context, path: &str) -> String {
    let raw = format!("GET /{path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
    String::from_utf8(router::respond(raw.as_bytes(), ctx).await).unwrap()
}

#[tokio::test]
async fn root_page_lists_files() {
    let ctx = test_context(Arc::new(ScriptedFetch::default()));
    let reply = get(&ctx, "").await;
    assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(reply.contains("Content-Type: text/html; charset=utf-8\r\n"));
    assert!(reply.contains("<li>index.html</li>"));
    assert!(reply.contains("<li>root.html</li>"));
}

#[tokio::test]
async fn multiply_end_to_end() {
    let ctx = test_context(Arc::new(ScriptedFetch::default()));
    let reply = get(&ctx, "multiply?num1=6&num2=7").await;
    assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(reply.contains("Result is: 42"));
}

#[tokio::test]
async fn multiply_bad_input_is_400() {
    let ctx = test_context(Arc::new(ScriptedFetch::default()));
    let reply = get(&ctx, "multiply?num1=abc&num2=2").await;
    assert!(reply.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[tokio::test]
async fn greet_end_to_end() {
    let ctx = test_context(Arc::new(ScriptedFetch::default()));
    let reply = get(&ctx, "greet?name=Ana&lang=es").await;
    assert!(reply.ends_with("Hola, Ana!"));
}

#[tokio::test]
async fn unknown_path_is_400_with_fixed_message() {
    let ctx = test_context(Arc::new(ScriptedFetch::default()));
    let reply = get(&ctx, "doesnotexist").await;
    assert!(reply.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(reply.contains("I am not sure what you want me to do..."));
}

#[tokio::test]
async fn missing_request_line_gets_unframed_diagnostic() {
    let ctx = test_context(Arc::new(ScriptedFetch::default()));
    let reply = router::respond(b"Host: localhost\r\n\r\n", &ctx).await;
    assert_eq!(reply, ILLEGAL_REQUEST.as_bytes());
}

#[tokio::test]
async fn weather_mock_flow_caches_across_requests() {
    let fetch = Arc::new(ScriptedFetch::default());
    let ctx = test_context(Arc::clone(&fetch));

    let first = get(&ctx, "weather?city=Paris&unit=c").await;
    assert!(first.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(first.contains("The current temperature in Paris is 20.0°C."));

    // Same city, different case: same cache entry, still no fetches.
    let second = get(&ctx, "weather?city=PARIS&unit=c").await;
    assert!(second.contains("20.0°C"));
    assert_eq!(fetch.calls(), 0);
}

#[tokio::test]
async fn github_non_array_payload_is_500() {
    let fetch = Arc::new(ScriptedFetch::always(r#"{"message":"rate limited"}"#));
    let ctx = test_context(fetch);
    let reply = get(&ctx, "github?query=users/octo/repos").await;
    assert!(reply.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
    assert!(reply.contains("Error fetching or parsing GitHub response"));
}

#[tokio::test]
async fn file_route_existence_check() {
    let fetch = Arc::new(ScriptedFetch::default());
    let ctx = test_context(fetch);

    let found = get(&ctx, "file/www/index.html").await;
    assert!(found.starts_with("HTTP/1.1 200 OK\r\n"));

    let missing = get(&ctx, "file/nope.txt").await;
    assert!(missing.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(missing.contains("File not found: nope.txt"));
}

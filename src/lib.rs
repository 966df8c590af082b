//! # minihttpd
//!
//! A minimal HTTP origin server: raw TCP in, hand-parsed request head,
//! a fixed ordered route table, and a time-bounded response cache on the
//! weather path. One request per connection; the connection close delimits
//! the response body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use minihttpd::config::Config;
//! use minihttpd::context::Context;
//! use minihttpd::fetch::HttpFetcher;
//! use minihttpd::files::DiskStore;
//! use minihttpd::server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let addr = config.listen_addr.clone();
//!     let ctx = Arc::new(Context::new(
//!         config,
//!         Arc::new(HttpFetcher::new()?),
//!         Arc::new(DiskStore::new(".")),
//!     ));
//!     Server::bind(&addr).await?.run(ctx).await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod fetch;
pub mod files;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use context::Context;
pub use http::{QueryParams, RequestHead, Response, StatusCode};
pub use server::{Server, ServerError};

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use minihttpd::config::Config;
use minihttpd::context::Context;
use minihttpd::fetch::HttpFetcher;
use minihttpd::files::DiskStore;
use minihttpd::server::Server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let addr = config.listen_addr.clone();

    let ctx = Arc::new(Context::new(
        config,
        Arc::new(HttpFetcher::new()?),
        Arc::new(DiskStore::new(".")),
    ));

    let server = Server::bind(&addr).await?;
    server.run(ctx).await?;
    Ok(())
}

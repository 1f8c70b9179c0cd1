//! Service entry-point: initialises tracing and runs the bootstrap sequence.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use faq_backend::server::launch;

/// Application bootstrap. Exits non-zero when any startup phase fails.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let server = launch().await.map_err(std::io::Error::other)?;
    server.run().await
}

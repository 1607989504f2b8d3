use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file; the process environment wins
    let env_file = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }

    let ax = dogs_api::build().await?;

    let host = dogs_api::config::http_host(&ax.app);
    let port = dogs_api::config::http_port(&ax.app)?;
    let addr = format!("{host}:{port}");

    tracing::info!("Server ready at http://{addr}");

    ax.listen(addr).await
}

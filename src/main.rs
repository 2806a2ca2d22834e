use anyhow::Context;
use factz::api::{AppState, create_router};
use factz::config::Config;
use factz::fetcher::FactCheckClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env()?;

    let client = FactCheckClient::new(&config.api_url, config.api_key.clone())
        .context("Invalid FACTCHECK_API_URL")?
        .with_language_code(config.language_code.clone());

    let app = create_router(AppState::new(client), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

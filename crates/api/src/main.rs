use anyhow::Context;

use phonebook_infra::PhonebookConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` may carry RUST_LOG / LOG_FORMAT, so it goes in before the subscriber.
    phonebook_infra::config::load_dotenv().context("invalid .env file")?;
    phonebook_observability::init();

    let config = PhonebookConfig::from_env().context("invalid configuration")?;

    let app = phonebook_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind 0.0.0.0:{}", config.port))?;

    tracing::info!("Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

mod api;
mod middleware;

use std::sync::Arc;

use shopintel_scraper::{BrandAssembler, CompetitorDiscoverer, StorefrontClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopintel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = shopintel_db::PoolConfig::from_app_config(&config);
    let pool = shopintel_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = shopintel_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let selectors = config.selector_config()?;
    let client = StorefrontClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )?;
    let assembler = BrandAssembler::new(client, &selectors)?;
    let discoverer = config.competitors_enabled.then(|| {
        Arc::new(CompetitorDiscoverer::new(
            selectors.discovery.clone(),
            config.competitor_delay(),
        ))
    });

    let app = build_app(AppState {
        pool,
        assembler: Arc::new(assembler),
        discoverer,
    });

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "shopintel-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

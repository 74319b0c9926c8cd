//! Bookshelf Server - book and member management
//!
//! REST API over Postgres with a Meilisearch mirror for keyword search.

use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::{search::SearchClient, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations completed");
    }

    // The index is derived data: an unreachable engine degrades search only
    let search = SearchClient::new(&config.search)?;
    match search.health().await {
        Ok(()) => tracing::info!("Connected to search engine at {}", config.search.url),
        Err(e) => tracing::warn!(
            "Search engine at {} is unreachable, search results will lag: {}",
            config.search.url,
            e
        ),
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let graceful_timeout = config.server.graceful_timeout();

    let repository = Repository::new(pool.clone());
    let services = Arc::new(Services::new(repository, search, &config));

    let state = AppState {
        config: Arc::new(config),
        services: services.clone(),
    };

    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Detached index writes may still be running
    if !services.tasks.shutdown(graceful_timeout).await {
        tracing::warn!(
            "{} background task(s) still running after {:?}, abandoning them",
            services.tasks.pending(),
            graceful_timeout
        );
    }

    pool.close().await;
    tracing::info!("Shutting down server gracefully");

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bookshelf_server={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

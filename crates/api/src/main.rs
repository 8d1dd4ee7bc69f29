//! API server entry point.

use std::sync::Arc;

use api::AppState;
use api::config::Config;
use host_store::{
    InMemoryOrderStore, InMemorySettingsRepository, OrderDataSource, PostgresOrderStore,
    PostgresSettingsRepository, SettingsRepository,
};
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing, before anything that may log
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(Config::default().log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Connect to the host database, or serve demo data
    let (orders, settings, store): (Arc<dyn OrderDataSource>, Arc<dyn SettingsRepository>, _) =
        match &config.database_url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect(url)
                    .await
                    .expect("failed to connect to the host database");
                let orders: Arc<dyn OrderDataSource> =
                    Arc::new(PostgresOrderStore::new(pool.clone()));
                let settings: Arc<dyn SettingsRepository> =
                    Arc::new(PostgresSettingsRepository::new(pool));
                (orders, settings, "postgres")
            }
            None => {
                let orders = InMemoryOrderStore::new();
                let settings = InMemorySettingsRepository::new();
                api::demo::seed(&orders, &settings)
                    .await
                    .expect("failed to seed demo data");
                let orders: Arc<dyn OrderDataSource> = Arc::new(orders);
                let settings: Arc<dyn SettingsRepository> = Arc::new(settings);
                (orders, settings, "memory")
            }
        };

    // 4. Build the application
    let state = Arc::new(AppState {
        plugin: api::create_plugin(orders, settings, &config),
        default_language: config.default_language.clone(),
        store,
    });
    let app = api::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(
        %addr,
        store,
        log_level = %config.log_level,
        "starting public registrations server"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}

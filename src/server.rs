use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::routes::create_router;
use crate::config::AppConfig;
use crate::store::{PostgresStore, Store};

/// Connect to Postgres and serve until a shutdown signal arrives
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let database_url = config.database_url();
    if database_url.is_none() {
        log::warn!("No DATABASE_URL configured, using the PG* environment variables");
    }
    let store = PostgresStore::new(database_url.as_deref(), config.max_connections())?;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Backend listening on http://{}", bind_address);

    serve(Arc::new(store), listener, shutdown_signal()).await
}

/// Serve the API on an already bound listener until `shutdown` resolves.
///
/// The schema check runs in the background: requests are answered while it
/// waits on the database, and a failure is only logged.
pub async fn serve<S, F>(store: Arc<S>, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    S: Store + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let schema_store = store.clone();
    tokio::spawn(async move {
        match schema_store.migrate().await {
            Ok(()) => log::info!("Tables verified/created"),
            Err(e) => log::error!("Error initializing database schema: {}", e.message()),
        }
    });

    let app = create_router::<S>().with_state(store.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    store.close().await;
    log::info!("Server shutdown complete");

    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received");
}

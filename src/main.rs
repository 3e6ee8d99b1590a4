use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};

use shop_inventory as shop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cfg = shop::config::load_config().context("failed to load configuration")?;
    shop::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB; the server does not start without it
    let db_pool = shop::db::establish_connection_from_app_config(&cfg)
        .await
        .map_err(|e| {
            error!("Unable to connect to database: {}", e);
            e
        })?;
    if cfg.auto_migrate {
        shop::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let db_arc = Arc::new(db_pool);
    let app_state = shop::AppState::new(db_arc.clone(), cfg.clone());
    let app = shop::app(app_state);

    // Bind and serve
    let addr: SocketAddr = cfg
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", cfg.bind_address()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("shop-inventory listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    match Arc::try_unwrap(db_arc) {
        Ok(pool) => shop::db::close_pool(pool).await?,
        Err(_) => warn!("Database pool still referenced at shutdown; dropping it"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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
    info!("Shutdown signal received");
}

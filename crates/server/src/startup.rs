use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState, RouterOptions};
use service::{saves::SaveService, storage::SaveFileStore};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load and validate configuration: `config.toml` (or `CONFIG_PATH`), else env vars.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Wire the store, service and router for `cfg`.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store = SaveFileStore::new(cfg.storage.save_file.clone());
    let state = AppState { saves: SaveService::new(Arc::new(store)) };
    let opts = RouterOptions {
        static_dir: cfg.server.static_dir.as_deref(),
        body_limit_bytes: Some(cfg.server.body_limit_bytes),
    };
    routes::build_router(state, build_cors(), opts)
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: build the app from `cfg` and run the HTTP server
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let save_dir = cfg.storage.save_file.parent().map(|p| p.to_path_buf()).unwrap_or_default();
    common::env::ensure_env(cfg.server.static_dir.as_deref(), &save_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let app = build_app(&cfg);

    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.bind_addr())))?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        save_file = %cfg.storage.save_file.display(),
        static_dir = ?cfg.server.static_dir,
        "save server listening"
    );
    serve(listener, app, shutdown).await
}

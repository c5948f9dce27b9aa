use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::saves::SaveService;

pub mod saves;

#[derive(Clone)]
pub struct AppState {
    pub saves: SaveService,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Router options that come from configuration rather than state.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions<'a> {
    /// Served for any path the API does not claim.
    pub static_dir: Option<&'a Path>,
    pub body_limit_bytes: Option<usize>,
}

/// Build the full application router: save/load API, health, optional static files.
pub fn build_router(state: AppState, cors: CorsLayer, opts: RouterOptions<'_>) -> Router {
    let api = Router::new()
        .route("/save", post(saves::save))
        .route("/load", get(saves::load))
        .route("/health", get(health))
        .with_state(state);

    let api = match opts.body_limit_bytes {
        Some(limit) => api.layer(DefaultBodyLimit::max(limit)),
        None => api,
    };

    let app = match opts.static_dir {
        Some(dir) if dir.is_dir() => api.fallback_service(ServeDir::new(dir)),
        _ => api,
    };

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx responses
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use service::storage::SaveFileStore;
    use tower::ServiceExt;

    fn app(limit: Option<usize>) -> (Router, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("routes_{}", uuid::Uuid::new_v4()));
        let store = SaveFileStore::new(dir.join("saves.json"));
        let state = AppState { saves: SaveService::new(Arc::new(store)) };
        let opts = RouterOptions { static_dir: None, body_limit_bytes: limit };
        (build_router(state, CorsLayer::very_permissive(), opts), dir)
    }

    async fn body_json(resp: axum::response::Response) -> anyhow::Result<Value> {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn post_json(body: &str) -> anyhow::Result<Request<Body>> {
        Ok(Request::post("/save")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?)
    }

    #[tokio::test]
    async fn save_and_load_through_router() -> anyhow::Result<()> {
        let (router, dir) = app(None);

        let resp = router.clone().oneshot(post_json(r#"{"player_id":"demo","data":{"level":3}}"#)?).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await?, json!({"status": "ok"}));

        let resp = router
            .oneshot(Request::get("/load?player_id=demo").body(Body::empty())?)
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await?, json!({"player_id": "demo", "data": {"level": 3}}));

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_as_missing() -> anyhow::Result<()> {
        let (router, dir) = app(Some(64));
        let big = format!(r#"{{"player_id":"p","data":"{}"}}"#, "x".repeat(256));

        let resp = router.oneshot(post_json(&big)?).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await?, json!({"error": "Missing player_id or data"}));
        assert!(tokio::fs::metadata(dir.join("saves.json")).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_404_without_static_dir() -> anyhow::Result<()> {
        let (router, _dir) = app(None);
        let resp = router.oneshot(Request::get("/index.html").body(Body::empty())?).await?;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        Ok(())
    }
}

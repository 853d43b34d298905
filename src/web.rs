use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get_service, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::api::{self, AppState};

/// Build the application router
///
/// `GET /` serves the entry form and `GET /result` the result shell. The
/// city query is accepted on `POST /city-info` and, for callers of the
/// original single-route shape, on `POST /` as well. Everything else falls
/// back to the static directory.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.static_dir.clone();
    let index_page = format!("{static_dir}/index.html");
    let result_page = format!("{static_dir}/result.html");

    Router::new()
        .route(
            "/",
            get_service(ServeFile::new(index_page)).post(api::city_info),
        )
        .route("/city-info", post(api::city_info))
        .route_service("/result", ServeFile::new(result_page))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let port = state.config.port;
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}

use anyhow::Context;
use axum::body::Body;
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::{extract::FromRef, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::{envelope_method_not_allowed, ApiError};
use super::routes;
use crate::settings::ApplicationSettings;

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
}

pub fn build_router(pool: SqlitePool) -> Router {
    let state = AppState { pool };

    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quizzes_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .layer(map_response(envelope_method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("true"),
        ])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

pub async fn run_server(pool: SqlitePool, settings: &ApplicationSettings) -> anyhow::Result<()> {
    let addr = settings.address();
    let app = build_router(pool);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    if let Err(e) = encoder.encode(&metrics, &mut buf) {
        tracing::warn!("Cannot encode metrics: {e}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    (
        [(header::CONTENT_TYPE, encoder.format_type().to_owned())],
        Body::from(buf),
    )
        .into_response()
}

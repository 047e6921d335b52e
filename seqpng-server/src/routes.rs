//! Router assembly and the render endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use seqpng_core::Engine;
use serde_json::json;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub fn app(engine: Arc<Engine>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/v1/sequence/", post(render_sequence))
        .route("/api/v1/sequence", post(render_sequence))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// `POST /api/v1/sequence/`: raw diagram text in, PNG out.
pub async fn render_sequence(State(engine): State<Arc<Engine>>, body: Bytes) -> Response {
    let input = match String::from_utf8(body.to_vec()) {
        Ok(input) => input,
        Err(_) => return bad_request("request body is not valid UTF-8"),
    };

    let rendered = tokio::task::spawn_blocking(move || engine.render_png(&input)).await;
    match rendered {
        Ok(Ok(png)) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Ok(Err(err)) => {
            tracing::info!(error = %err, "sequence rejected");
            bad_request(&err.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "render task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

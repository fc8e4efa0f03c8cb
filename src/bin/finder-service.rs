use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mailprobe_lib::{Config, MxCache, clean_domain, find_email, generate_patterns};
use serde::{Deserialize, Serialize};

struct AppState {
    config: Config,
    cache: MxCache,
}

#[derive(Serialize)]
struct Liveness {
    message: &'static str,
    endpoints: [&'static str; 1],
}

#[derive(Deserialize)]
struct FindRequest {
    full_name: String,
    domain: String,
}

#[derive(Serialize)]
struct FindResponse {
    found: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

struct AppError(String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorBody { detail: self.0 })).into_response()
    }
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        message: "mailprobe-lib Email Finder API is Live!",
        endpoints: ["/find"],
    })
}

async fn find(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FindRequest>,
) -> Result<Json<FindResponse>, AppError> {
    if request.full_name.trim().is_empty() {
        return Err(AppError("full_name must not be empty".to_string()));
    }
    if request.domain.trim().is_empty() {
        return Err(AppError("domain must not be empty".to_string()));
    }

    let domain = clean_domain(&request.domain)
        .ok_or_else(|| AppError(format!("domain '{}' has no usable '.'", request.domain)))?;

    if generate_patterns(&request.full_name, &domain).is_empty() {
        return Err(AppError(format!(
            "full_name '{}' yields no candidate patterns",
            request.full_name
        )));
    }

    let full_name = request.full_name.clone();
    let found = tokio::task::spawn_blocking(move || {
        find_email(&full_name, &domain, &state.config, &state.cache)
    })
    .await
    .unwrap_or_else(|join_err| {
        tracing::error!(error = %join_err, "finder task failed to join");
        None
    });

    Ok(Json(FindResponse { found }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let cache = MxCache::new(config.mx_cache_ttl, config.dns_timeout, config.dns_lifetime);
    let state = Arc::new(AppState { config, cache });

    let app = Router::new()
        .route("/", get(liveness))
        .route("/find", post(find))
        .with_state(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{host}:{port}");

    tracing::info!(address = %addr, "starting finder-service");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

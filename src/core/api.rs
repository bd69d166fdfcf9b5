//! HTTP API
//!
//! JSON endpoints over the team generator.
//!
//! ## Endpoints
//! - `POST /api/teams/generate` - Interpret a theme and generate a team
//! - `GET /health` - Health check with catalog size

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ServerConfig;
use crate::core::catalog::Catalog;
use crate::core::team::{FieldError, GenerateTeamRequest, TeamGenerator, ValidationError};

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// 400 response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.0),
            ApiError::MalformedBody(message) => (
                StatusCode::BAD_REQUEST,
                vec![FieldError {
                    field: "body".to_string(),
                    message,
                }],
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                vec![FieldError {
                    field: "server".to_string(),
                    message: other.to_string(),
                }],
            ),
        };
        (status, Json(ErrorBody { errors })).into_response()
    }
}

// ============================================================================
// State and Router
// ============================================================================

/// Shared, read-only handler state.
#[derive(Debug, Clone)]
pub struct ApiState {
    generator: TeamGenerator<Catalog>,
}

impl ApiState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            generator: TeamGenerator::new(catalog),
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the API router.
pub fn router(state: ApiState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/teams/generate", post(generate_team))
        .route("/health", get(health_check))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, catalog: Arc<Catalog>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ApiError::InvalidAddress(format!("{}:{}", config.host, config.port)))?;

    let app = router(ApiState::new(catalog), &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;

    log::info!("Themedex API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Themedex API shutting down");
        })
        .await?;

    Ok(())
}

// ============================================================================
// HTTP Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "catalogSize": state.generator.catalog().len(),
    }))
}

/// Team generation endpoint
async fn generate_team(
    State(state): State<ApiState>,
    body: std::result::Result<Json<GenerateTeamRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = body.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    let query = request.into_query()?;

    let result = state.generator.run(&query);
    Ok(Json(result).into_response())
}

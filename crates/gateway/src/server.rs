//! Axum-based HTTP server for the gateway.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use wayfinder_core::{config::AppConfig, Error, Result, ResultEnvelope};
use wayfinder_orchestrator::{FixedWindowLimiter, Orchestrator};

use crate::api_keys::ApiKeyStore;

/// Shared application state.
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub keys: Arc<ApiKeyStore>,
    /// Chat admission, keyed by key owner.
    pub chat_limiter: FixedWindowLimiter,
    /// Key provisioning, keyed by client address. Stricter window.
    pub key_limiter: FixedWindowLimiter,
}

/// Gateway server.
pub struct GatewayServer {
    host: String,
    port: u16,
    state: Arc<AppState>,
}

impl GatewayServer {
    pub fn new(config: &AppConfig, orchestrator: Arc<Orchestrator>) -> Self {
        let limits = &config.limits;
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            state: Arc::new(AppState {
                orchestrator,
                keys: Arc::new(ApiKeyStore::new()),
                chat_limiter: FixedWindowLimiter::new(
                    limits.chat_max_requests,
                    Duration::from_secs(limits.chat_window_secs),
                ),
                key_limiter: FixedWindowLimiter::new(
                    limits.key_creation_max_requests,
                    Duration::from_secs(limits.key_creation_window_secs),
                ),
            }),
        }
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/keys", post(create_key_handler))
            .route("/chat", post(chat_handler))
            .with_state(self.state.clone())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::internal(format!("failed to bind {addr}: {e}")))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(
            listener,
            self.build_router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| Error::internal(format!("server error: {e}")))?;

        Ok(())
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response: the result envelope plus a per-request trace ID.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub trace_id: String,
    #[serde(flatten)]
    pub result: ResultEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct CreateKeyRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CreateKeyResponse {
    pub api_key: String,
    pub owner: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub trace_id: String,
}

// =============================================================================
// Handlers
// =============================================================================

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn create_key_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<CreateKeyRequest>,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();
    let email = payload.email.trim().to_lowercase();

    if email.is_empty() || !email.contains('@') {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_email",
            "a valid email address is required",
            &trace_id,
        );
    }

    if !state.key_limiter.allow(&addr.ip().to_string()) {
        return error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "too many key requests; try again later",
            &trace_id,
        );
    }

    let api_key = state.keys.issue(&email);
    tracing::info!(trace_id = %trace_id, owner = %email, "Issued API key");

    (
        StatusCode::CREATED,
        Json(CreateKeyResponse {
            api_key,
            owner: email,
        }),
    )
        .into_response()
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();

    let presented = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    let owner = match presented.and_then(|key| state.keys.verify(key)) {
        Some(owner) => owner,
        None => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "missing or invalid API key",
                &trace_id,
            );
        }
    };

    if !state.chat_limiter.allow(&owner) {
        return error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "request limit reached; try again later",
            &trace_id,
        );
    }

    tracing::info!(
        trace_id = %trace_id,
        owner = %owner,
        message_len = payload.message.len(),
        "Processing chat request"
    );

    match state.orchestrator.handle(&payload.message).await {
        Ok(result) => (StatusCode::OK, Json(ChatResponse { trace_id, result })).into_response(),
        Err(e) => {
            tracing::warn!(trace_id = %trace_id, error = %e, "Chat request failed");
            let (status, code) = classify_error(&e);
            error_response(status, code, &e.to_string(), &trace_id)
        }
    }
}

/// Map a pipeline error to its HTTP status and stable error code.
fn classify_error(err: &Error) -> (StatusCode, &'static str) {
    match err {
        Error::InvalidIntent(_) => (StatusCode::BAD_REQUEST, "invalid_intent"),
        Error::MalformedModelOutput(_) | Error::SchemaViolation(_) => {
            (StatusCode::BAD_REQUEST, "unintelligible_message")
        }
        Error::UnsupportedIntent(_) => (StatusCode::BAD_REQUEST, "unsupported_intent"),
        Error::GeocodeFailed(_) => (StatusCode::BAD_REQUEST, "geocode_failed"),
        Error::NoRouteFound(_) => (StatusCode::BAD_REQUEST, "no_route_found"),
        Error::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
        Error::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "upstream_unavailable"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

fn error_response(status: StatusCode, code: &str, message: &str, trace_id: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            code: code.to_string(),
            message: message.to_string(),
            trace_id: trace_id.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_handler_reports_ok() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn backend_failures_map_to_gateway_statuses() {
        let (status, code) = classify_error(&Error::timeout("model deadline"));
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(code, "upstream_timeout");

        let (status, _) = classify_error(&Error::unavailable("connection refused"));
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = classify_error(&Error::internal("bug"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn caller_errors_map_to_bad_request() {
        for err in [
            Error::invalid_intent("empty message"),
            Error::malformed_output("no json"),
            Error::schema_violation("missing query"),
            Error::unsupported_intent("book_flight"),
            Error::geocode_failed("Atlantis"),
            Error::no_route("across the ocean"),
        ] {
            let (status, _) = classify_error(&err);
            assert_eq!(status, StatusCode::BAD_REQUEST, "for {err}");
        }
    }
}

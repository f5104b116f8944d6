use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use code_dispatch::{CodeExecutionService, ExecutionRequest, ExecutorConfig, ToolchainStatus};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

/// Origin allowed by default, a local frontend dev server
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
    #[error("Configuration error: {0}")]
    Config(#[from] code_dispatch::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::InvalidOrigin(_) | ServerError::Config(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ServerError::ServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub available_slots: usize,
    pub toolchains: Vec<ToolchainStatus>,
}

#[derive(Clone)]
pub struct AppState {
    service: Arc<CodeExecutionService>,
}

pub fn create_app(config: ExecutorConfig, cors_origin: &str) -> Result<Router, ServerError> {
    let service = CodeExecutionService::new(config)?;

    let state = AppState {
        service: Arc::new(service),
    };

    let origin = cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| ServerError::InvalidOrigin(cors_origin.to_string()))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/execute", post(execute))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(app)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting code execution server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    Ok(())
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Code execution API is running!" }))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        available_slots: state.service.get_available_slots(),
        toolchains: state.service.toolchain_status(),
    })
}

/// Answers with the report as a JSON string; only host faults become a 500
async fn execute(
    State(state): State<AppState>,
    Json(payload): Json<ExecutionRequest>,
) -> Response {
    let report = state.service.execute(payload).await;

    if report.is_internal_error() {
        error!("Execution could not run: {}", report);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": report.to_string() })),
        )
            .into_response();
    }

    (StatusCode::OK, Json(report.to_string())).into_response()
}

//! VectorMind HTTP REST API
//!
//! Axum-based HTTP server exposing the assistant endpoints and the workflow
//! store.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to an
//! inner function taking `&HttpState`. The inner functions are directly
//! testable without axum dispatch machinery.
//!
//! Endpoints:
//! - POST /api/automation/workflow       generate (and optionally save) a workflow plan
//! - GET  /api/automation/workflows      list a user's saved plans (`?user_id=`)
//! - GET  /api/automation/workflows/:id  fetch one saved plan
//! - POST /api/agents/assistant          role-played agent output
//! - POST /api/nlp/summarise             summarise text
//! - POST /api/nlp/generate_email        draft an email
//! - POST /api/predictive/forecast       forecast a numeric series
//! - POST /api/cx/sentiment              sentiment analysis
//! - GET  /health                        liveness
//! - GET  /                              endpoint listing

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vectormind_core::{
    workflows, Assistant, CompletionError, NewWorkflow, VectorMindConfig, WorkflowRecord,
};

/// Largest forecast horizon accepted by the forecast endpoint.
pub const MAX_FORECAST_HORIZON: u32 = 1000;

pub const ENDPOINTS: [&str; 10] = [
    "POST /api/automation/workflow",
    "GET /api/automation/workflows?user_id=",
    "GET /api/automation/workflows/:id",
    "POST /api/agents/assistant",
    "POST /api/nlp/summarise",
    "POST /api/nlp/generate_email",
    "POST /api/predictive/forecast",
    "POST /api/cx/sentiment",
    "GET /health",
    "GET /",
];

/// Shared state for all HTTP handlers
pub struct HttpState {
    pub pool: SqlitePool,
    pub config: VectorMindConfig,
    pub assistant: Arc<dyn Assistant>,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    let cors = state.config.http.cors_allow_any_origin;

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/automation/workflow", post(workflow_handler))
        .route("/api/automation/workflows", get(list_workflows_handler))
        .route("/api/automation/workflows/:id", get(get_workflow_handler))
        .route("/api/agents/assistant", post(agent_handler))
        .route("/api/nlp/summarise", post(summarise_handler))
        .route("/api/nlp/generate_email", post(email_handler))
        .route("/api/predictive/forecast", post(forecast_handler))
        .route("/api/cx/sentiment", post(sentiment_handler))
        .layer(TraceLayer::new_for_http());

    let router = if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    state: Arc<HttpState>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", state.config.http.host, state.config.http.port);

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("VectorMind HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Error type
// ============================================================================

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        tracing::error!(error = %err, "completion failed");
        Self::internal(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "database operation failed");
        Self::internal(format!("Database error: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WorkflowRequest {
    pub text: String,
    pub segment: Option<String>,
    pub user_id: Option<String>,
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkflowResponse {
    pub workflow_plan: String,
    pub workflow_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListWorkflowsQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    pub role: String,
    pub task: String,
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentResponse {
    pub agent_output: String,
}

#[derive(Debug, Deserialize)]
pub struct SummariseRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SummariseResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateEmailRequest {
    pub context: String,
    pub tone: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GenerateEmailResponse {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub data: Vec<f64>,
    pub horizon: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ForecastResponse {
    pub forecast_result: String,
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SentimentResponse {
    pub sentiment_analysis: String,
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner root: service name plus the route table (pure, no IO).
pub fn root_inner(config: &VectorMindConfig) -> serde_json::Value {
    serde_json::json!({
        "message": config.service.name,
        "endpoints": ENDPOINTS,
    })
}

/// Inner health: returns status, service name and version (pure, no IO).
pub fn health_inner(config: &VectorMindConfig) -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "service": config.service.name,
        "version": env!("CARGO_PKG_VERSION"),
    })
}

/// Generate a plan, then save it when the caller asked to and gave a user id.
/// A failed save fails the request.
pub async fn workflow_inner(
    state: &HttpState,
    req: WorkflowRequest,
) -> Result<WorkflowResponse, ApiError> {
    let segment = req.segment.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let user_id = req.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty());

    let plan = state.assistant.workflow_plan(&req.text, segment).await?;

    let workflow_id = match (req.save, user_id) {
        (true, Some(user_id)) => {
            let new = NewWorkflow {
                user_id: Some(user_id.to_string()),
                description: req.text,
                segment: segment.map(str::to_string),
                plan: plan.clone(),
            };
            Some(workflows::save(&state.pool, &new).await?)
        }
        (true, None) => {
            tracing::warn!("workflow save requested without user_id, not saving");
            None
        }
        (false, _) => None,
    };

    tracing::info!(
        endpoint = "workflow",
        backend = state.assistant.name(),
        user_id = ?user_id,
        workflow_id = ?workflow_id,
        "workflow plan generated"
    );

    Ok(WorkflowResponse {
        workflow_plan: plan,
        workflow_id,
    })
}

pub async fn list_workflows_inner(
    state: &HttpState,
    query: ListWorkflowsQuery,
) -> Result<Vec<WorkflowRecord>, ApiError> {
    let records = workflows::list_by_user(&state.pool, query.user_id.trim()).await?;
    tracing::debug!(user_id = %query.user_id, count = records.len(), "listed workflows");
    Ok(records)
}

pub async fn get_workflow_inner(state: &HttpState, id: i64) -> Result<WorkflowRecord, ApiError> {
    workflows::get(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("workflow {id} not found")))
}

pub async fn agent_inner(state: &HttpState, req: AgentRequest) -> Result<AgentResponse, ApiError> {
    let agent_output = state
        .assistant
        .agent_output(&req.role, &req.task, &req.details)
        .await?;
    tracing::info!(endpoint = "agent", backend = state.assistant.name(), "agent output generated");
    Ok(AgentResponse { agent_output })
}

pub async fn summarise_inner(
    state: &HttpState,
    req: SummariseRequest,
) -> Result<SummariseResponse, ApiError> {
    let summary = state.assistant.summarise(&req.text).await?;
    tracing::info!(endpoint = "summarise", backend = state.assistant.name(), "summary generated");
    Ok(SummariseResponse { summary })
}

pub async fn email_inner(
    state: &HttpState,
    req: GenerateEmailRequest,
) -> Result<GenerateEmailResponse, ApiError> {
    let email = state
        .assistant
        .generate_email(&req.context, &req.tone)
        .await?;
    tracing::info!(endpoint = "generate_email", backend = state.assistant.name(), "email generated");
    Ok(GenerateEmailResponse { email })
}

pub async fn forecast_inner(
    state: &HttpState,
    req: ForecastRequest,
) -> Result<ForecastResponse, ApiError> {
    if req.horizon > MAX_FORECAST_HORIZON {
        return Err(ApiError::bad_request(format!(
            "horizon must be at most {MAX_FORECAST_HORIZON}"
        )));
    }

    let forecast_result = state.assistant.forecast(&req.data, req.horizon).await?;
    tracing::info!(
        endpoint = "forecast",
        backend = state.assistant.name(),
        points = req.data.len(),
        horizon = req.horizon,
        "forecast generated"
    );
    Ok(ForecastResponse { forecast_result })
}

pub async fn sentiment_inner(
    state: &HttpState,
    req: SentimentRequest,
) -> Result<SentimentResponse, ApiError> {
    let sentiment_analysis = state.assistant.sentiment(&req.text).await?;
    tracing::info!(endpoint = "sentiment", backend = state.assistant.name(), "sentiment analysed");
    Ok(SentimentResponse { sentiment_analysis })
}

// ============================================================================
// Axum handler wrappers (thin, delegate to inner functions)
// ============================================================================

pub async fn root_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(root_inner(&state.config)))
}

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(health_inner(&state.config)))
}

pub async fn workflow_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<WorkflowResponse>, ApiError> {
    workflow_inner(&state, req).await.map(Json)
}

pub async fn list_workflows_handler(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<ListWorkflowsQuery>,
) -> Result<Json<Vec<WorkflowRecord>>, ApiError> {
    list_workflows_inner(&state, query).await.map(Json)
}

pub async fn get_workflow_handler(
    State(state): State<Arc<HttpState>>,
    Path(id): Path<i64>,
) -> Result<Json<WorkflowRecord>, ApiError> {
    get_workflow_inner(&state, id).await.map(Json)
}

pub async fn agent_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<AgentRequest>,
) -> Result<Json<AgentResponse>, ApiError> {
    agent_inner(&state, req).await.map(Json)
}

pub async fn summarise_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<SummariseRequest>,
) -> Result<Json<SummariseResponse>, ApiError> {
    summarise_inner(&state, req).await.map(Json)
}

pub async fn email_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<GenerateEmailRequest>,
) -> Result<Json<GenerateEmailResponse>, ApiError> {
    email_inner(&state, req).await.map(Json)
}

pub async fn forecast_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, ApiError> {
    forecast_inner(&state, req).await.map(Json)
}

pub async fn sentiment_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<SentimentRequest>,
) -> Result<Json<SentimentResponse>, ApiError> {
    sentiment_inner(&state, req).await.map(Json)
}

// ============================================================================
// Unit Tests: call inner functions directly
// ============================================================================

// Axum host for the soil analysis form
//
// Purpose: serve the form page and run the form controller server-side.
// htmx submissions get the results fragment, plain form posts get the full page.

use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use axum_htmx::HxRequest;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::client::{HttpPredictClient, PredictClient};
use crate::config::AdvisorConfig;
use crate::controller::FormController;
use crate::render::render_failure;
use crate::view::PageState;
use crate::web::handlers::pages::render_page;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn PredictClient>,
    pub config: Arc<AdvisorConfig>,
}

impl AppState {
    /// State backed by the HTTP prediction client
    pub fn new(config: AdvisorConfig) -> Self {
        let client = HttpPredictClient::new(config.predict_url.clone());
        tracing::info!("Prediction endpoint: {}", client.endpoint());
        Self::with_client(config, Arc::new(client))
    }

    pub fn with_client(config: AdvisorConfig, client: Arc<dyn PredictClient>) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Form page
        .route("/", get(index_page))
        .route("/es", get(index_page))

        // Form submission
        .route("/analyze", post(analyze))

        // Stylesheet and other assets
        .nest_service("/static", static_dir)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn index_page() -> Result<Html<String>, AppError> {
    Ok(render_page(&PageState::new())?)
}

/// htmx only swaps 2xx bodies, so htmx callers get every failure as a
/// results fragment; plain posts keep the JSON error
async fn analyze(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    match run_analysis(&state, is_htmx, form).await {
        Ok(html) => html.into_response(),
        Err(e) if is_htmx => {
            tracing::warn!("Analyze failed, answering with failure card: {}", e);
            Html(render_failure(&e.to_string())).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn run_analysis(
    state: &AppState,
    is_htmx: bool,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(fields) = form?;
    let page = PageState::with_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let mut controller =
        FormController::new(page, state.client.clone()).with_lang(state.config.lang.clone());
    let outcome = controller.submit().await;
    tracing::debug!("Analyze outcome: {:?} (htmx: {})", outcome, is_htmx);

    let page = controller.into_view();
    if is_htmx {
        Ok(Html(page.results_html().to_string()))
    } else {
        Ok(render_page(&page)?)
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, Error)]
enum AppError {
    #[error("{0}")]
    Template(String),
    #[error("{0}")]
    BadForm(String),
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e.to_string())
    }
}

impl From<FormRejection> for AppError {
    fn from(e: FormRejection) -> Self {
        AppError::BadForm(e.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Template(msg) => {
                tracing::error!("Template error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::BadForm(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

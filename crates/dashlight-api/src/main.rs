//! dashlight HTTP API server.
//!
//! Exposes a single analysis endpoint: `POST /analyzeDashboardPic` accepts an
//! optional multipart image and optional text prompt, validates the image's
//! real content type by byte sniffing, and forwards the assembled multimodal
//! prompt to the Gemini backend. Plus a `/health` liveness probe.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashlight_core::{defaults, Error, ValidatedImage};
use dashlight_inference::{GeminiBackend, InferenceBackend, PromptDispatcher};

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone)]
struct AppState {
    dispatcher: Arc<PromptDispatcher>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Successful analysis payload.
#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    response: String,
}

/// Analyze a dashboard photo and/or a free-text question.
///
/// Multipart fields:
/// - `image` (optional): binary image data. The declared content type is only
///   a coarse pre-filter; the authoritative classification is byte sniffing.
/// - `text` (optional): free-text question.
///
/// At least one of the two must be present (enforced by the dispatcher,
/// before any backend call).
async fn analyze_dashboard_pic(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let started = std::time::Instant::now();

    let mut image_bytes: Option<Vec<u8>> = None;
    let mut user_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("image") => {
                // Coarse pre-filter on the declared type. Sniffing still
                // runs on the bytes and is the authoritative check.
                if let Some(declared) = field.content_type() {
                    if !declared.starts_with(defaults::IMAGE_MIME_PREFIX) {
                        return Err(ApiError::BadRequest("Invalid file type.".to_string()));
                    }
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {}", e)))?
                    .to_vec();
                // An empty file part means no file was selected.
                if !bytes.is_empty() {
                    image_bytes = Some(bytes);
                }
            }
            Some("text") => {
                user_text = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read text field: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let image = image_bytes.map(ValidatedImage::from_bytes).transpose()?;
    if let Some(ref img) = image {
        tracing::debug!(
            subsystem = "api",
            op = "analyze",
            image_bytes = img.len(),
            mime_type = %img.mime_type,
            "Upload validated"
        );
    }

    let answer = state
        .dispatcher
        .dispatch(user_text.as_deref(), image)
        .await?;

    info!(
        subsystem = "api",
        op = "analyze",
        duration_ms = started.elapsed().as_millis() as u64,
        response_len = answer.len(),
        "Analysis completed"
    );

    Ok(Json(AnalyzeResponse { response: answer }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::NoInput | Error::UnsupportedMediaType(_) | Error::InvalidInput(_) => {
                ApiError::BadRequest(err.to_string())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// STARTUP
// =============================================================================

fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dashlight_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("dashlight-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
        None
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let _file_guard = init_tracing();

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| defaults::PORT.to_string())
        .parse()
        .unwrap_or(defaults::PORT);

    let backend = GeminiBackend::from_env()?;
    info!(model = %backend.model_name(), "Gemini backend configured");

    let state = AppState {
        dispatcher: Arc::new(PromptDispatcher::new(
            Arc::new(backend),
            defaults::DASHBOARD_INSTRUCTION,
        )),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/analyzeDashboardPic", post(analyze_dashboard_pic))
        // Middleware
        .layer(TraceLayer::new_for_http())
        // The UI is served from a different origin; admit all of them.
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(defaults::MAX_UPLOAD_BYTES))
        .layer(RequestBodyLimitLayer::new(defaults::MAX_UPLOAD_BYTES))
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

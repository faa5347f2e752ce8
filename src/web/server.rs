//! Axum web server exposing `POST /api/search/auto`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::search::AutoSearch;
use crate::web::response::{generate_error_response, generate_response};

/// Message returned when the request carries no text
pub const EMPTY_TEXT_MESSAGE: &str = "请求数据不能为空";

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<AutoSearch>,
}

impl AppState {
    pub fn new(search: AutoSearch) -> Self {
        Self {
            search: Arc::new(search),
        }
    }
}

// =============================================================================
// API TYPES
// =============================================================================

/// Request body for POST /api/search/auto
#[derive(Debug, Deserialize)]
pub struct AutoSearchRequest {
    #[serde(default)]
    pub text: Option<String>,
}

// =============================================================================
// ROUTE HANDLERS
// =============================================================================

/// POST /api/search/auto - Generate keyword groups for a research request
async fn api_auto_search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AutoSearchRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("auto_search", %request_id);

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(parent: &span, "Rejected request body: {}", rejection.body_text());
            return generate_error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let text = request.text.unwrap_or_default();
    // Whitespace-only text counts as empty and never reaches the model,
    // unlike a bare emptiness check which would forward it.
    if text.trim().is_empty() {
        warn!(parent: &span, "Empty search text");
        return Error::InvalidRequest {
            message: EMPTY_TEXT_MESSAGE.to_string(),
        }
        .into_response();
    }

    info!(parent: &span, "Received search request: {:?}", text);

    match state.search.auto_search(&text).instrument(span.clone()).await {
        Ok(groups) => generate_response(groups),
        Err(e) => {
            error!(parent: &span, "Auto search failed: {}", e);
            e.into_response()
        }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// CORS policy for `/api/*`: any origin, the usual methods and headers
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/search/auto", post(api_auto_search))
        .layer(cors_layer())
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
}

/// Serve on an already bound listener until Ctrl+C
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Validate configuration, bind and serve
pub async fn run(config: &Config) -> Result<()> {
    config.validate()?;

    let search = AutoSearch::from_config(config)?;
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;

    info!(
        model = %config.upstream.model,
        degrade_errors = config.upstream.degrade_errors,
        "Listening on {}",
        addr
    );
    eprintln!(
        "\x1b[36m>\x1b[0m fabao running at \x1b[36mhttp://{}\x1b[0m",
        addr
    );
    eprintln!("\x1b[90m  Press Ctrl+C to stop\x1b[0m");

    serve(listener, AppState::new(search)).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

//! HTTP server setup
//!
//! The platform delivers events as JSON posts to `/interactions`,
//! authenticated by a shared secret header. Replies travel back in the
//! response body; a 204 means the event was consumed without a reply.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use warden_common::AppConfig;
use warden_service::sweeper::{MUTE_SWEEP_PERIOD, REQUEST_SWEEP_PERIOD};
use warden_service::{MuteSweeper, RequestSweeper, ServiceContext};
use warden_store::{
    FileSheet, JsonDivorceStore, JsonMarriageStore, JsonMuteStore, JsonProposalStore,
    JsonWarningStore,
};

use crate::dispatch::Dispatcher;
use crate::payloads::Event;
use crate::rest::RestPlatform;

/// Header carrying the webhook shared secret
pub const SECRET_HEADER: &str = "x-warden-secret";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
    endpoint_secret: Arc<String>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(dispatcher: Dispatcher, endpoint_secret: String) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            endpoint_secret: Arc::new(endpoint_secret),
        }
    }
}

/// Create the gateway router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/interactions", post(interactions_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: AppState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Webhook endpoint for platform events
///
/// POST /interactions
async fn interactions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<Event>,
) -> Response {
    let presented = headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if presented != state.endpoint_secret.as_str() {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match state.dispatcher.handle(event).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Initialize all dependencies and create the dispatcher
pub async fn create_dispatcher(config: &AppConfig) -> anyhow::Result<Dispatcher> {
    info!(data_dir = %config.data_dir.display(), "Opening document stores");
    let warning_store = Arc::new(JsonWarningStore::open(&config.data_dir).await?);
    let marriage_store = Arc::new(JsonMarriageStore::open(&config.data_dir).await?);
    let proposal_store = Arc::new(JsonProposalStore::open(&config.data_dir).await?);
    let divorce_store = Arc::new(JsonDivorceStore::open(&config.data_dir).await?);
    let mute_store = Arc::new(JsonMuteStore::open(&config.data_dir).await?);

    let platform = Arc::new(RestPlatform::new(
        config.platform_api_base.clone(),
        config.bot_token.clone(),
    ));

    let sheet = match &config.registration {
        Some(registration) => {
            info!(path = %registration.sheet_path.display(), "Registration ingestion enabled");
            Some(Arc::new(FileSheet::open(registration.sheet_path.clone()).await?)
                as Arc<dyn warden_core::Sheet>)
        }
        None => None,
    };

    let ctx = Arc::new(ServiceContext::new(
        warning_store,
        marriage_store,
        proposal_store,
        divorce_store,
        mute_store,
        platform,
        sheet,
        config.thresholds,
        config.auto_mute_minutes,
        config.divorce_policy,
    ));

    // Sweepers run for the life of the process
    tokio::spawn(MuteSweeper::new(ctx.clone()).run(MUTE_SWEEP_PERIOD));
    tokio::spawn(RequestSweeper::new(ctx.clone()).run(REQUEST_SWEEP_PERIOD));

    Ok(Dispatcher::new(
        ctx,
        config.admin_role_id,
        config.registration.as_ref().map(|r| r.channel_id),
    ))
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let address = config.server.address();

    let dispatcher = create_dispatcher(&config).await?;
    let state = AppState::new(dispatcher, config.endpoint_secret.clone());
    let app = create_app(state);

    info!(%address, "Starting interaction server");

    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP gateway for the transfer service
//!
//! Routes, request validation and the translation of service errors into
//! responses. The binary in `main.rs` only adds logging and the listener.

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use account_service::AccountService;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    account::{create_account, get_account},
    transfer::transfer,
};

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Wrap an account service for use by the router
    pub fn new(account_service: Arc<AccountService>) -> Arc<Self> {
        Arc::new(Self { account_service })
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::account::create_account,
        api::account::get_account,
        api::transfer::transfer,
    ),
    components(
        schemas(
            api::account::CreateAccountRequest,
            api::transfer::TransferPayload,
            common::model::account::Account,
            common::model::transfer::TransferReceipt,
        )
    ),
    tags(
        (name = "account", description = "Account management endpoints"),
        (name = "transfer", description = "Funds transfer endpoints")
    ),
    info(
        title = "Transfer Service API",
        version = "1.0.0",
        description = "API for creating accounts and moving funds between them"
    )
)]
pub struct ApiDoc;

/// Build the full application router
pub fn app(state: Arc<AppState>, log_level: Level) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/transfer", post(transfer))
        .route("/accounts/:id", get(get_account));

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .with_state(state)
}

//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    business_audit_handler, export_leads_handler, health_handler, list_leads_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Server-held admin secret. `None` means the admin routes always 401.
    pub leads_api_key: Option<String>,
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>, leads_api_key: Option<String>) -> Router {
    let app_state = AppState {
        deps,
        leads_api_key,
    };

    // CORS: the audit form posts from the marketing site's origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/api/business-audit", post(business_audit_handler))
        .route(
            "/api/leads",
            get(list_leads_handler).post(export_leads_handler),
        )
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

//! Route table

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers;
use crate::middleware::auth::AdminTokenLayer;
use crate::AppState;

/// Build the application router.
///
/// Only the admin settings routes sit behind the admin token; generation is
/// open to any caller.
pub fn create_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route(
            "/api/admin-settings",
            get(handlers::get_admin_settings).post(handlers::update_admin_settings),
        )
        .route("/api/admin-settings/reset", post(handlers::reset_admin_settings))
        .layer(AdminTokenLayer::new(state.config.auth.token()));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/generate-images", post(handlers::generate_images))
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

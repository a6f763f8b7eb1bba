//! REST API
//!
//! Everything under `/api`. Data endpoints require a bearer token; health,
//! Jerry status, research documents and the auth flow are public.

pub mod action_items;
pub mod deliverables;
pub mod jerry;
pub mod meetings;
pub mod metrics;
pub mod research;
pub mod sample_projects;
pub mod updates;

#[cfg(test)]
mod tests;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use serde_json::json;

use crate::auth::routes as auth;
use crate::AppState;

/// Registers a collection route both with and without a trailing slash.
fn with_slash(router: Router<AppState>, path: &str, route: MethodRouter<AppState>) -> Router<AppState> {
    router.route(path, route.clone()).route(&format!("{}/", path), route)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}

pub fn routes() -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        // Auth flow
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", get(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/token", get(auth::token))
        // Public
        .route("/jerry", get(jerry::status))
        .route("/jerry/roadmap", get(jerry::roadmap))
        .route("/research/:id", get(research::document))
        // Action items
        .route(
            "/action-items/:id",
            get(action_items::get_one).put(action_items::update).delete(action_items::delete),
        )
        // Meetings
        .route("/meetings/:id", get(meetings::get_one).put(meetings::update).delete(meetings::delete))
        // Deliverables
        .route("/deliverables/month/:month", get(deliverables::list_by_phase))
        .route("/deliverables/:id", get(deliverables::get_one).put(deliverables::update))
        // Updates
        .route("/updates/:id/acknowledge", post(updates::acknowledge))
        // Metrics
        .route("/metrics/:id", post(metrics::record))
        // Sample projects
        .route("/sample-projects/stats", get(sample_projects::stats))
        .route("/sample-projects/:id", get(sample_projects::get_one));

    let router = with_slash(router, "/action-items", get(action_items::list).post(action_items::create));
    let router = with_slash(router, "/meetings", get(meetings::list).post(meetings::create));
    let router = with_slash(router, "/deliverables", get(deliverables::list_all));
    let router = with_slash(router, "/updates", get(updates::list).post(updates::create));
    let router = with_slash(router, "/metrics", get(metrics::list));
    let router = with_slash(router, "/sample-projects", get(sample_projects::list));

    router.fallback(not_found)
}

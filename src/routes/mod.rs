//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the server-rendered pages, the small JSON API and the
//! static stylesheet under a single Axum router. Everything below
//! `/dashboard` and `/api` goes through the session gate extractors in
//! [`auth`].

pub mod api;
pub mod auth;
pub mod pages;
pub mod shelf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Page and API routes, without static files.
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/login", get(auth::login_page).post(auth::request_login_code))
        .route("/login/verify", get(auth::verify_page).post(auth::verify_code))
        .route("/signup", get(auth::signup_page).post(auth::request_signup_code))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/settings", get(pages::settings))
        .route("/dashboard/shelf", get(shelf::shelf_view))
        .route("/dashboard/shelf/add", get(shelf::add_dialog))
        .route("/dashboard/shelf/{book_id}/status", post(shelf::confirm_status))
        .route("/dashboard/shelf/{book_id}/remove", post(shelf::confirm_removal))
        .route("/api/auth/me", get(api::me))
        .route("/api/shelf", get(api::list_books))
        .route("/api/shelf/{book_id}", put(api::set_status).delete(api::remove_book))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Full application: routes, static assets under `/static`, request tracing.
pub fn app(state: AppState, static_dir: &str) -> Router {
    app_routes(state)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

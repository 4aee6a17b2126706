//! Landing, dashboard home and settings.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::auth::{MaybeUser, PageUser};
use crate::notify;
use crate::pages;
use crate::services::shelf::ShelfSummary;
use crate::state::AppState;

/// `GET /`: marketing page, or straight to the dashboard when signed in.
pub async fn landing(MaybeUser(user): MaybeUser, jar: CookieJar) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let (jar, notice) = notify::take(jar);
    (jar, Html(pages::landing::landing_page(notice))).into_response()
}

/// `GET /dashboard`
pub async fn dashboard(State(state): State<AppState>, auth: PageUser, jar: CookieJar) -> Response {
    let books = match state.shelf.list_user_books(auth.user.id).await {
        Ok(books) => books,
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user.id, "shelf summary fetch failed");
            Vec::new()
        }
    };
    let summary = ShelfSummary::from_books(&books);
    let (jar, notice) = notify::take(jar);
    (jar, Html(pages::dashboard::dashboard_page(&auth.user, &summary, notice))).into_response()
}

/// `GET /dashboard/settings`
pub async fn settings(auth: PageUser, jar: CookieJar) -> Response {
    let (jar, notice) = notify::take(jar);
    (jar, Html(pages::dashboard::settings_page(&auth.user, notice))).into_response()
}

//! JSON API over the session user and their shelf.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::ApiUser;
use crate::services::session::User;
use crate::services::shelf::{self, BookRef, ReadingStatus, ShelfError, UserBook};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ShelfEntryResponse {
    pub id: Uuid,
    pub book_id: String,
    pub title: String,
    pub author: Option<String>,
    pub status: ReadingStatus,
}

fn to_response(book: UserBook) -> ShelfEntryResponse {
    ShelfEntryResponse { id: book.id, book_id: book.book_id, title: book.title, author: book.author, status: book.status }
}

#[derive(Deserialize)]
pub struct SetStatusBody {
    pub status: ReadingStatus,
    pub title: Option<String>,
    pub author: Option<String>,
}

pub(crate) fn shelf_error_to_status(err: ShelfError) -> StatusCode {
    match err {
        ShelfError::NotFound(_) => StatusCode::NOT_FOUND,
        ShelfError::CorruptStatus(_) | ShelfError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_and_map(err: ShelfError) -> StatusCode {
    if !matches!(err, ShelfError::NotFound(_)) {
        tracing::error!(error = %err, "shelf api request failed");
    }
    shelf_error_to_status(err)
}

/// `GET /api/auth/me`
pub async fn me(auth: ApiUser) -> Json<User> {
    Json(auth.user)
}

/// `GET /api/shelf`
pub async fn list_books(
    State(state): State<AppState>,
    auth: ApiUser,
) -> Result<Json<Vec<ShelfEntryResponse>>, StatusCode> {
    let books = state.shelf.list_user_books(auth.user.id).await.map_err(log_and_map)?;
    Ok(Json(books.into_iter().map(to_response).collect()))
}

/// `PUT /api/shelf/{book_id}`: add the book or change its status.
///
/// `title` is required only when the book is not on the shelf yet.
pub async fn set_status(
    State(state): State<AppState>,
    auth: ApiUser,
    Path(book_id): Path<String>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<ShelfEntryResponse>, StatusCode> {
    if !shelf::is_valid_book_id(&book_id) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let existing = state
        .shelf
        .get_user_book(auth.user.id, &book_id)
        .await
        .map_err(log_and_map)?;

    let book = match existing {
        Some(entry) => entry.book_ref(),
        None => {
            let title = body
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or(StatusCode::BAD_REQUEST)?;
            let author = body.author.map(|a| a.trim().to_owned()).filter(|a| !a.is_empty());
            BookRef { book_id, title: title.to_owned(), author }
        }
    };

    let saved = state
        .shelf
        .set_status(auth.user.id, &book, body.status)
        .await
        .map_err(log_and_map)?;
    Ok(Json(to_response(saved)))
}

/// `DELETE /api/shelf/{book_id}`
pub async fn remove_book(
    State(state): State<AppState>,
    auth: ApiUser,
    Path(book_id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    if !shelf::is_valid_book_id(&book_id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    state
        .shelf
        .remove_book(auth.user.id, &book_id)
        .await
        .map_err(log_and_map)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

//! Shelf page routes.
//!
//! The status dialog lives in the URL: `?book=<id>` opens it for a shelved
//! book, `&select=<STATUS>` pre-selects an option, `&remove=confirm` adds the
//! removal confirmation, and
//! `/dashboard/shelf/add` opens it for a book not yet on the shelf. Each POST
//! replays the dialog transitions server-side (open, select, confirm) so the
//! same state machine drives both the rendering and the mutation.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::auth::PageUser;
use crate::dialog::{ShelfActions, StatusDialog};
use crate::notify::{self, Notice};
use crate::pages;
use crate::services::session::User;
use crate::services::shelf::{BookRef, ReadingStatus, UserBook, is_valid_book_id};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ShelfQuery {
    book: Option<String>,
    select: Option<String>,
    remove: Option<String>,
}

#[derive(Deserialize)]
pub struct AddQuery {
    book_id: String,
    title: String,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusForm {
    status: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: Option<String>,
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

async fn load_books(state: &AppState, user: &User) -> Vec<UserBook> {
    match state.shelf.list_user_books(user.id).await {
        Ok(books) => books,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user.id, "shelf fetch failed");
            Vec::new()
        }
    }
}

fn back_to_shelf(state: &AppState, jar: CookieJar, notice: Notice) -> Response {
    (notify::push(jar, notice, state.cookie_secure), Redirect::to("/dashboard/shelf")).into_response()
}

/// Render the shelf with `dialog` open on top and `notice` shown inline.
async fn render_with_dialog(
    state: &AppState,
    user: &User,
    jar: CookieJar,
    dialog: &StatusDialog,
    notice: Option<Notice>,
) -> Response {
    let books = load_books(state, user).await;
    (jar, Html(pages::shelf::shelf_page(user, &books, Some(dialog), notice))).into_response()
}

/// `GET /dashboard/shelf`
pub async fn shelf_view(
    State(state): State<AppState>,
    auth: PageUser,
    jar: CookieJar,
    Query(query): Query<ShelfQuery>,
) -> Response {
    let books = load_books(&state, &auth.user).await;

    let dialog = query
        .book
        .as_deref()
        .and_then(|id| books.iter().find(|b| b.book_id == id))
        .map(|book| {
            let mut dialog = StatusDialog::new(book.book_ref(), Some(book.status), true);
            dialog.open();
            if let Some(status) = query.select.as_deref().and_then(ReadingStatus::parse) {
                dialog.select(status);
            }
            if query.remove.as_deref() == Some("confirm") {
                dialog.request_removal();
            }
            dialog
        });

    let (jar, notice) = notify::take(jar);
    (jar, Html(pages::shelf::shelf_page(&auth.user, &books, dialog.as_ref(), notice))).into_response()
}

/// `GET /dashboard/shelf/add`: open the dialog in add mode.
pub async fn add_dialog(
    State(state): State<AppState>,
    auth: PageUser,
    jar: CookieJar,
    Query(query): Query<AddQuery>,
) -> Response {
    let book_id = query.book_id.trim();
    let title = query.title.trim();
    if !is_valid_book_id(book_id) || title.is_empty() {
        return back_to_shelf(&state, jar, Notice::StatusUpdateFailed);
    }

    match state.shelf.get_user_book(auth.user.id, book_id).await {
        Ok(Some(_)) => return Redirect::to(&format!("/dashboard/shelf?book={book_id}")).into_response(),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, book_id = %book_id, "shelf lookup failed; opening in add mode"),
    }

    let book = BookRef { book_id: book_id.to_owned(), title: title.to_owned(), author: non_blank(query.author) };
    let mut dialog = StatusDialog::new(book, None, true);
    dialog.open();

    let (jar, notice) = notify::take(jar);
    render_with_dialog(&state, &auth.user, jar, &dialog, notice).await
}

/// `POST /dashboard/shelf/{book_id}/status`: add the book or change its status.
pub async fn confirm_status(
    State(state): State<AppState>,
    auth: PageUser,
    jar: CookieJar,
    Path(book_id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let Some(status) = ReadingStatus::parse(&form.status) else {
        return back_to_shelf(&state, jar, Notice::StatusUpdateFailed);
    };
    if !is_valid_book_id(&book_id) {
        return back_to_shelf(&state, jar, Notice::StatusUpdateFailed);
    }

    let existing = match state.shelf.get_user_book(auth.user.id, &book_id).await {
        Ok(existing) => existing,
        Err(e) => {
            tracing::error!(error = %e, book_id = %book_id, "shelf lookup failed");
            return back_to_shelf(&state, jar, Notice::StatusUpdateFailed);
        }
    };

    let (book, current) = match existing {
        Some(entry) => (entry.book_ref(), Some(entry.status)),
        None => {
            let title = form.title.trim();
            if title.is_empty() {
                return back_to_shelf(&state, jar, Notice::StatusUpdateFailed);
            }
            (BookRef { book_id: book_id.clone(), title: title.to_owned(), author: non_blank(form.author) }, None)
        }
    };

    let mut dialog = StatusDialog::new(book, current, true);
    dialog.open();
    dialog.select(status);

    let result = {
        let book = dialog.book().clone();
        let actions = ShelfActions { store: state.shelf.as_ref(), user_id: auth.user.id, book: &book };
        dialog.confirm(&actions).await
    };

    match result {
        Ok(saved) => {
            tracing::info!(user_id = %auth.user.id, book_id = %book_id, status = saved.as_str(), "shelf status set");
            let notice = if current.is_some() { Notice::StatusUpdated } else { Notice::BookAdded };
            back_to_shelf(&state, jar, notice)
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user.id, book_id = %book_id, "failed to set shelf status");
            render_with_dialog(&state, &auth.user, jar, &dialog, Some(Notice::StatusUpdateFailed)).await
        }
    }
}

/// `POST /dashboard/shelf/{book_id}/remove`: the confirmed, irreversible delete.
pub async fn confirm_removal(
    State(state): State<AppState>,
    auth: PageUser,
    jar: CookieJar,
    Path(book_id): Path<String>,
) -> Response {
    if !is_valid_book_id(&book_id) {
        return back_to_shelf(&state, jar, Notice::RemoveFailed);
    }

    let entry = match state.shelf.get_user_book(auth.user.id, &book_id).await {
        Ok(Some(entry)) => entry,
        Ok(None) => return back_to_shelf(&state, jar, Notice::RemoveFailed),
        Err(e) => {
            tracing::error!(error = %e, book_id = %book_id, "shelf lookup failed");
            return back_to_shelf(&state, jar, Notice::RemoveFailed);
        }
    };

    let book = entry.book_ref();
    let mut dialog = StatusDialog::new(book.clone(), Some(entry.status), true);
    dialog.open();
    dialog.request_removal();

    let removed = {
        let actions = ShelfActions { store: state.shelf.as_ref(), user_id: auth.user.id, book: &book };
        dialog.confirm_removal(&actions).await
    };

    if removed {
        tracing::info!(user_id = %auth.user.id, book_id = %book_id, "book removed from shelf");
        back_to_shelf(&state, jar, Notice::BookRemoved)
    } else {
        render_with_dialog(&state, &auth.user, jar, &dialog, Some(Notice::RemoveFailed)).await
    }
}

#[cfg(test)]
#[path = "shelf_test.rs"]
mod tests;

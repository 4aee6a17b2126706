//! Shelf view and the add/update-status dialog.

use leptos::prelude::*;

use super::dashboard_document;
use crate::dialog::StatusDialog;
use crate::notify::Notice;
use crate::services::session::User;
use crate::services::shelf::{ReadingStatus, UserBook};

pub fn shelf_page(user: &User, books: &[UserBook], dialog: Option<&StatusDialog>, notice: Option<Notice>) -> String {
    let books = books.to_vec();
    let dialog = dialog.filter(|d| d.is_open()).cloned();
    dashboard_document("Shelf", user, notice, view! { <Shelf books=books dialog=dialog/> })
}

/// Render an open dialog, or nothing when it is closed.
pub fn render_dialog(dialog: &StatusDialog) -> String {
    if !dialog.is_open() {
        return String::new();
    }
    let dialog = dialog.clone();
    view! { <StatusDialogPanel dialog=dialog/> }.to_html()
}

fn shelf_href(book_id: &str) -> String {
    format!("/dashboard/shelf?book={book_id}")
}

#[component]
fn Shelf(books: Vec<UserBook>, dialog: Option<StatusDialog>) -> impl IntoView {
    let empty = books.is_empty();
    let sections = ReadingStatus::ALL
        .into_iter()
        .filter_map(|status| {
            let entries: Vec<UserBook> = books.iter().filter(|b| b.status == status).cloned().collect();
            (!entries.is_empty()).then(|| view! { <ShelfSection status=status books=entries/> })
        })
        .collect_view();

    view! {
        <div class="page-heading">
            <h1>"My Shelf"</h1>
        </div>
        <AddBookForm/>
        {empty.then(|| view! {
            <p class="empty">"Your shelf is empty. Add a book to start tracking it."</p>
        })}
        {sections}
        {dialog.map(|dialog| view! { <StatusDialogPanel dialog=dialog/> })}
    }
}

#[component]
fn AddBookForm() -> impl IntoView {
    view! {
        <form method="get" action="/dashboard/shelf/add" class="card add-book">
            <h2>"Add a book"</h2>
            <input name="book_id" placeholder="Catalog id" required=true pattern="[A-Za-z0-9._-]{1,64}"/>
            <input name="title" placeholder="Title" required=true/>
            <input name="author" placeholder="Author"/>
            <button type="submit" class="btn">"Add to Shelf"</button>
        </form>
    }
}

#[component]
fn ShelfSection(status: ReadingStatus, books: Vec<UserBook>) -> impl IntoView {
    let count = books.len().to_string();
    view! {
        <section class="shelf-section" data-status=status.as_str()>
            <h2>{format!("{} ", status.label())}<span class="count">{count}</span></h2>
            <ul class="book-list">
                {books.into_iter().map(|book| view! { <BookRow book=book/> }).collect_view()}
            </ul>
        </section>
    }
}

#[component]
fn BookRow(book: UserBook) -> impl IntoView {
    let href = shelf_href(&book.book_id);
    view! {
        <li class="book">
            <span class="title">{book.title}</span>
            {book.author.map(|author| view! { <span class="author">{author}</span> })}
            <a href=href class="btn btn-ghost">"Update Status"</a>
        </li>
    }
}

#[component]
fn StatusDialogPanel(dialog: StatusDialog) -> impl IntoView {
    let book = dialog.book().clone();
    let disabled = dialog.controls_disabled();
    let selected = dialog.selected();
    let action = format!("/dashboard/shelf/{}/status", book.book_id);
    let remove_href = dialog
        .can_remove()
        .then(|| format!("{}&remove=confirm", shelf_href(&book.book_id)));

    let options = ReadingStatus::ALL
        .into_iter()
        .map(|status| {
            view! {
                <label class="status-option">
                    <input
                        type="radio"
                        name="status"
                        value=status.as_str()
                        checked=(status == selected).then_some("checked")
                        disabled=disabled.then_some("disabled")
                    />
                    <span>{status.label()}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="dialog-backdrop">
            <div class="dialog" role="dialog" aria-modal="true">
                <h2 class="dialog-title">{dialog.title()}</h2>
                <p class="dialog-description">{dialog.description()}</p>
                <form method="post" action=action>
                    <input type="hidden" name="title" value=book.title.clone()/>
                    {book.author.clone().map(|author| view! { <input type="hidden" name="author" value=author/> })}
                    <div class="status-options">{options}</div>
                    {remove_href.map(|href| view! {
                        <a href=href class="btn btn-ghost btn-destructive">"Remove from Shelf"</a>
                    })}
                    {dialog.last_error().is_some().then(|| view! {
                        <p class="dialog-error" role="alert">"Something went wrong. Please try again."</p>
                    })}
                    <div class="dialog-footer">
                        <a href="/dashboard/shelf" class="btn btn-outline">"Cancel"</a>
                        <button type="submit" class="btn" disabled=disabled.then_some("disabled")>
                            {dialog.confirm_label()}
                        </button>
                    </div>
                </form>
            </div>
        </div>
        {dialog.confirmation_open().then(|| view! { <RemovalConfirmation dialog=dialog.clone()/> })}
    }
}

#[component]
fn RemovalConfirmation(dialog: StatusDialog) -> impl IntoView {
    let book_id = dialog.book().book_id.clone();
    let cancel_href = shelf_href(&book_id);
    let action = format!("/dashboard/shelf/{book_id}/remove");
    view! {
        <div class="dialog-backdrop alert">
            <div class="dialog" role="alertdialog" aria-modal="true">
                <h2 class="dialog-title">"Remove book from shelf?"</h2>
                <p class="dialog-description">{dialog.removal_warning()}</p>
                <div class="dialog-footer">
                    <a href=cancel_href class="btn btn-outline">"Cancel"</a>
                    <form method="post" action=action class="inline-form">
                        <button
                            type="submit"
                            class="btn btn-destructive"
                            disabled=dialog.is_removing().then_some("disabled")
                        >
                            {dialog.remove_label()}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
#[path = "shelf_test.rs"]
mod tests;

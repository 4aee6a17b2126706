use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::routes::test_support::{session_cookie, test_server};
use crate::services::shelf::{ReadingStatus, ShelfStore};
use crate::state::test_helpers::{MemoryAuthProvider, MemoryShelfStore};

struct Fixture {
    auth: Arc<MemoryAuthProvider>,
    shelf: Arc<MemoryShelfStore>,
    user_id: Uuid,
    cookie: String,
}

fn fixture(shelf: MemoryShelfStore) -> Fixture {
    let auth = Arc::new(MemoryAuthProvider::default());
    let (user, token) = auth.seed_session("reader@example.com", None);
    Fixture { auth, shelf: Arc::new(shelf), user_id: user.id, cookie: session_cookie(&token) }
}

impl Fixture {
    fn server(&self) -> axum_test::TestServer {
        test_server(&self.auth, &self.shelf)
    }
}

#[tokio::test]
async fn shelf_lists_books_by_status() {
    let fx = fixture(MemoryShelfStore::default());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::IsReading);
    fx.shelf.seed(Uuid::new_v4(), "emma", "Emma", ReadingStatus::Completed);

    let response = fx.server().get("/dashboard/shelf").add_header("Cookie", fx.cookie.clone()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Dune"));
    assert!(!html.contains("Emma"));
    assert!(html.contains(r#"data-status="IS_READING""#));
    assert!(!html.contains(r#"role="dialog""#));
}

#[tokio::test]
async fn book_query_opens_update_dialog() {
    let fx = fixture(MemoryShelfStore::default());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::IsReading);

    let html = fx
        .server()
        .get("/dashboard/shelf?book=dune")
        .add_header("Cookie", fx.cookie.clone())
        .await
        .text();
    assert!(html.contains(r#"role="dialog""#));
    assert!(html.contains(r#"value="IS_READING" checked="checked""#));
    assert!(html.contains("Remove from Shelf"));
    assert!(!html.contains("alertdialog"));
}

#[tokio::test]
async fn remove_query_opens_confirmation() {
    let fx = fixture(MemoryShelfStore::default());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::Completed);

    let html = fx
        .server()
        .get("/dashboard/shelf?book=dune&remove=confirm")
        .add_header("Cookie", fx.cookie.clone())
        .await
        .text();
    assert!(html.contains("alertdialog"));
    assert!(html.contains("Remove book from shelf?"));
    assert!(fx.shelf.remove_calls().is_empty());
}

#[tokio::test]
async fn unknown_book_query_shows_no_dialog() {
    let fx = fixture(MemoryShelfStore::default());
    let html = fx
        .server()
        .get("/dashboard/shelf?book=missing")
        .add_header("Cookie", fx.cookie.clone())
        .await
        .text();
    assert!(!html.contains(r#"role="dialog""#));
}

#[tokio::test]
async fn add_dialog_defaults_to_want_to_read() {
    let fx = fixture(MemoryShelfStore::default());
    let html = fx
        .server()
        .get("/dashboard/shelf/add?book_id=dune&title=Dune&author=Frank+Herbert")
        .add_header("Cookie", fx.cookie.clone())
        .await
        .text();
    assert!(html.contains("Add to Shelf"));
    assert!(html.contains(r#"value="WANT_TO_READ" checked="checked""#));
    assert!(!html.contains("Remove from Shelf"));
}

#[tokio::test]
async fn add_dialog_for_shelved_book_redirects_to_update() {
    let fx = fixture(MemoryShelfStore::default());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::WantToRead);
    let response = fx
        .server()
        .get("/dashboard/shelf/add?book_id=dune&title=Dune")
        .add_header("Cookie", fx.cookie.clone())
        .await;
    assert_eq!(response.header("location"), "/dashboard/shelf?book=dune");
}

#[tokio::test]
async fn confirming_add_creates_entry() {
    let fx = fixture(MemoryShelfStore::default());
    let response = fx
        .server()
        .post("/dashboard/shelf/dune/status")
        .add_header("Cookie", fx.cookie.clone())
        .form(&json!({ "status": "WANT_TO_READ", "title": "Dune", "author": "Frank Herbert" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard/shelf");
    assert_eq!(fx.shelf.set_status_calls(), vec![(fx.user_id, "dune".to_owned(), ReadingStatus::WantToRead)]);
    let books = fx.shelf.list_user_books(fx.user_id).await.unwrap();
    assert_eq!(books[0].author.as_deref(), Some("Frank Herbert"));
}

#[tokio::test]
async fn confirming_update_changes_status_once() {
    let fx = fixture(MemoryShelfStore::default());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::IsReading);

    fx.server()
        .post("/dashboard/shelf/dune/status")
        .add_header("Cookie", fx.cookie.clone())
        .form(&json!({ "status": "COMPLETED", "title": "Dune" }))
        .await;

    assert_eq!(fx.shelf.set_status_calls().len(), 1);
    let entry = fx.shelf.get_user_book(fx.user_id, "dune").await.unwrap().unwrap();
    assert_eq!(entry.status, ReadingStatus::Completed);
}

#[tokio::test]
async fn unknown_status_is_rejected_without_a_store_call() {
    let fx = fixture(MemoryShelfStore::default());
    let response = fx
        .server()
        .post("/dashboard/shelf/dune/status")
        .add_header("Cookie", fx.cookie.clone())
        .form(&json!({ "status": "ABANDONED", "title": "Dune" }))
        .await;
    assert_eq!(response.header("location"), "/dashboard/shelf");
    assert!(fx.shelf.set_status_calls().is_empty());
}

#[tokio::test]
async fn failed_update_keeps_dialog_open_with_selection() {
    let fx = fixture(MemoryShelfStore::failing_set());
    let response = fx
        .server()
        .post("/dashboard/shelf/dune/status")
        .add_header("Cookie", fx.cookie.clone())
        .form(&json!({ "status": "IS_READING", "title": "Dune" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains(r#"role="dialog""#));
    assert!(html.contains(r#"value="IS_READING" checked="checked""#));
    assert!(html.contains("Failed to update reading status"));
    // Rendered after the save settled, so only the idle label can appear.
    assert!(html.contains("Add to Shelf"));
    assert!(!html.contains("Adding..."));
}

#[tokio::test]
async fn confirmed_removal_deletes_entry() {
    let fx = fixture(MemoryShelfStore::default());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::Completed);

    let response = fx
        .server()
        .post("/dashboard/shelf/dune/remove")
        .add_header("Cookie", fx.cookie.clone())
        .await;

    assert_eq!(response.header("location"), "/dashboard/shelf");
    assert_eq!(fx.shelf.remove_calls(), vec![(fx.user_id, "dune".to_owned())]);
    assert!(fx.shelf.get_user_book(fx.user_id, "dune").await.unwrap().is_none());
}

#[tokio::test]
async fn failed_removal_keeps_confirmation_open() {
    let fx = fixture(MemoryShelfStore::failing_remove());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::Completed);

    let response = fx
        .server()
        .post("/dashboard/shelf/dune/remove")
        .add_header("Cookie", fx.cookie.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("alertdialog"));
    assert!(html.contains("Failed to remove book"));
    assert!(fx.shelf.get_user_book(fx.user_id, "dune").await.unwrap().is_some());
}

#[tokio::test]
async fn removing_book_not_on_shelf_reports_failure() {
    let fx = fixture(MemoryShelfStore::default());
    let response = fx
        .server()
        .post("/dashboard/shelf/dune/remove")
        .add_header("Cookie", fx.cookie.clone())
        .await;
    assert_eq!(response.header("location"), "/dashboard/shelf");
    assert!(fx.shelf.remove_calls().is_empty());
}

#[tokio::test]
async fn list_failure_still_renders_shelf() {
    let fx = fixture(MemoryShelfStore::failing_list());
    let response = fx.server().get("/dashboard/shelf").add_header("Cookie", fx.cookie.clone()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("My Shelf"));
}

#[tokio::test]
async fn select_query_changes_selection_without_saving() {
    let fx = fixture(MemoryShelfStore::default());
    fx.shelf.seed(fx.user_id, "dune", "Dune", ReadingStatus::WantToRead);

    let html = fx
        .server()
        .get("/dashboard/shelf?book=dune&select=COMPLETED")
        .add_header("Cookie", fx.cookie.clone())
        .await
        .text();
    assert!(html.contains(r#"value="COMPLETED" checked="checked""#));
    assert!(fx.shelf.set_status_calls().is_empty());
}

use super::*;
use uuid::Uuid;

fn reader() -> User {
    User { id: Uuid::nil(), email: "reader@example.com".into(), full_name: Some("Octavia Butler".into()) }
}

fn header_html(user: User) -> String {
    view! { <DashboardHeader user=user/> }.to_html()
}

#[test]
fn document_sets_title_and_body() {
    let html = document("Shelf", None, view! { <p>"hi"</p> });
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Shelf · Koinon</title>"));
    assert!(html.contains("<p>hi</p>"));
    assert!(!html.contains("toast"));
}

#[test]
fn document_renders_notice_toast() {
    let html = document("Home", Some(Notice::SignedOut), ());
    assert!(html.contains("toast toast-success"));
    assert!(html.contains("Signed out successfully"));

    let html = document("Home", Some(Notice::SignOutFailed), ());
    assert!(html.contains("toast toast-error"));
    assert!(html.contains("Failed to sign out"));
}

#[test]
fn header_shows_email_settings_and_sign_out() {
    let html = header_html(reader());
    assert!(html.contains("reader@example.com"));
    assert!(html.contains(r#"href="/dashboard/settings""#));
    assert!(html.contains(r#"action="/auth/sign-out""#));
}

#[test]
fn header_escapes_email() {
    let mut user = reader();
    user.email = "<script>@example.com".into();
    let html = header_html(user);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn dashboard_document_wraps_content() {
    let html = dashboard_document("Dashboard", &reader(), None, view! { <h1>"Welcome"</h1> });
    assert!(html.contains("app-header"));
    assert!(html.contains("<h1>Welcome</h1>"));
}

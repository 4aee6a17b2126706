//! Server-rendered HTML pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page is a Leptos view rendered to a string on the server. Route
//! handlers do the fetching and the auth gate; nothing here touches a store.
//! Interpolated text and attribute values are escaped by the renderer.

pub mod auth;
pub mod dashboard;
pub mod email;
pub mod landing;
pub mod shelf;

use leptos::prelude::*;

use crate::notify::Notice;
use crate::services::session::User;

/// Render `body` inside the document shell, with the toast for `notice` if any.
pub fn document(title: &str, notice: Option<Notice>, body: impl IntoView + 'static) -> String {
    let title = format!("{title} · Koinon");
    let html = view! {
        <Shell title=title notice=notice>
            {body}
        </Shell>
    }
    .to_html();
    format!("<!DOCTYPE html>{html}")
}

/// Auth-gated layout: header plus `content` inside the main container.
pub fn dashboard_document(title: &str, user: &User, notice: Option<Notice>, content: impl IntoView + 'static) -> String {
    let user = user.clone();
    document(
        title,
        notice,
        view! {
            <DashboardHeader user=user/>
            <main class="container">{content}</main>
        },
    )
}

#[component]
fn Shell(title: String, notice: Option<Notice>, children: Children) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>
            <body>
                {notice.map(|notice| view! { <Toast notice=notice/> })}
                {children()}
            </body>
        </html>
    }
}

#[component]
fn Toast(notice: Notice) -> impl IntoView {
    let class = format!("toast toast-{}", notice.kind().as_str());
    view! { <div class=class role="status">{notice.message()}</div> }
}

/// Persistent header shown on every dashboard page.
#[component]
pub fn DashboardHeader(user: User) -> impl IntoView {
    view! {
        <header class="app-header">
            <a href="/dashboard" class="brand">"Koinon"</a>
            <nav class="header-actions">
                <span class="user-email">{user.email}</span>
                <a href="/dashboard/shelf" class="btn btn-ghost">"Shelf"</a>
                <a href="/dashboard/settings" class="btn btn-ghost">"Settings"</a>
                <form method="post" action="/auth/sign-out" class="inline-form">
                    <button type="submit" class="btn btn-outline">"Sign Out"</button>
                </form>
            </nav>
        </header>
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

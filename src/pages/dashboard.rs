//! Dashboard home and account settings.

use leptos::prelude::*;

use super::dashboard_document;
use crate::notify::Notice;
use crate::services::session::User;
use crate::services::shelf::{ReadingStatus, ShelfSummary};

fn greeting_name(user: &User) -> &str {
    user.full_name.as_deref().unwrap_or(&user.email)
}

pub fn dashboard_page(user: &User, summary: &ShelfSummary, notice: Option<Notice>) -> String {
    let greeting = format!("Welcome back, {}", greeting_name(user));
    let total = format!("You have {} books on your shelf.", summary.total());
    let stats: Vec<(ReadingStatus, usize)> = ReadingStatus::ALL.into_iter().map(|s| (s, summary.count(s))).collect();
    dashboard_document(
        "Dashboard",
        user,
        notice,
        view! { <DashboardHome greeting=greeting total=total stats=stats/> },
    )
}

pub fn settings_page(user: &User, notice: Option<Notice>) -> String {
    let full_name = user.full_name.clone().unwrap_or_default();
    let email = user.email.clone();
    dashboard_document("Settings", user, notice, view! { <AccountSettings full_name=full_name email=email/> })
}

#[component]
fn DashboardHome(greeting: String, total: String, stats: Vec<(ReadingStatus, usize)>) -> impl IntoView {
    view! {
        <h1>{greeting}</h1>
        <p class="muted">{total}</p>
        <section class="stats">
            {stats
                .into_iter()
                .map(|(status, count)| {
                    view! {
                        <div class="stat-card">
                            <span class="stat-value">{count.to_string()}</span>
                            <span class="stat-label">{status.label()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </section>
        <a href="/dashboard/shelf" class="btn">"Go to your shelf"</a>
    }
}

#[component]
fn AccountSettings(full_name: String, email: String) -> impl IntoView {
    view! {
        <div class="page-heading">
            <h1>"Settings"</h1>
            <p class="muted">"Manage your account settings"</p>
        </div>
        <section class="card">
            <h2>"Account Information"</h2>
            <p class="muted">"Your Koinon account details"</p>
            <dl class="fields">
                <dt>"Full Name"</dt>
                <dd class="mono">{full_name}</dd>
                <dt>"Email"</dt>
                <dd>{email}</dd>
            </dl>
        </section>
    }
}

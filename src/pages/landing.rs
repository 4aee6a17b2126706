//! Public marketing page.

use leptos::prelude::*;

use crate::notify::Notice;

const FEATURES: [(&str, &str); 4] = [
    ("Organize Collection", "Keep track of all your books in one organized digital library."),
    ("Track Progress", "Monitor your reading progress and set personal reading goals."),
    ("Share Reviews", "Write reviews and share your thoughts with fellow readers."),
    ("Discover Books", "Find new books based on your reading preferences and history."),
];

pub fn landing_page(notice: Option<Notice>) -> String {
    super::document("Organize Your Reading Collection", notice, view! { <Landing/> })
}

#[component]
fn Landing() -> impl IntoView {
    view! {
        <div class="container landing">
            <nav class="landing-nav">
                <span class="brand brand-lg">"Koinon"</span>
                <div class="nav-actions">
                    <a href="/login" class="btn btn-outline">"Sign In"</a>
                    <a href="/signup" class="btn">"Get Started"</a>
                </div>
            </nav>
            <section class="hero">
                <h1>"Organize Your Reading Collection"</h1>
                <p>"Track your books, manage your reading list, and discover new titles all in one place."</p>
                <div class="hero-actions">
                    <a href="/signup" class="btn btn-lg">"Start Reading"</a>
                    <a href="/login" class="btn btn-lg btn-outline">"Sign In"</a>
                </div>
            </section>
            <section class="features">
                {FEATURES
                    .into_iter()
                    .map(|(title, blurb)| {
                        view! {
                            <div class="feature-card">
                                <h3>{title}</h3>
                                <p>{blurb}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>
        </div>
    }
}

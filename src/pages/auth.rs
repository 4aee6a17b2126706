//! Sign-in, sign-up and code verification forms.

use leptos::prelude::*;

use super::document;
use crate::notify::Notice;

pub fn login_page(notice: Option<Notice>) -> String {
    document("Sign In", notice, view! { <LoginCard/> })
}

pub fn signup_page(notice: Option<Notice>) -> String {
    document("Sign Up", notice, view! { <SignupCard/> })
}

pub fn verify_page(email: &str, notice: Option<Notice>) -> String {
    let email = email.to_owned();
    document("Verify", notice, view! { <VerifyCard email=email/> })
}

#[component]
fn LoginCard() -> impl IntoView {
    view! {
        <div class="auth-card">
            <h1>"Sign in to Koinon"</h1>
            <p class="muted">"We'll email you a six-character sign-in code."</p>
            <form method="post" action="/login" class="stack">
                <label for="email">"Email"</label>
                <input id="email" name="email" type="email" autocomplete="email" required=true/>
                <button type="submit" class="btn">"Send code"</button>
            </form>
            <p class="muted">"New here? " <a href="/signup">"Create an account"</a></p>
        </div>
    }
}

#[component]
fn SignupCard() -> impl IntoView {
    view! {
        <div class="auth-card">
            <h1>"Create your account"</h1>
            <form method="post" action="/signup" class="stack">
                <label for="full_name">"Full Name"</label>
                <input id="full_name" name="full_name" type="text" autocomplete="name" required=true/>
                <label for="email">"Email"</label>
                <input id="email" name="email" type="email" autocomplete="email" required=true/>
                <button type="submit" class="btn">"Get Started"</button>
            </form>
            <p class="muted">"Already have an account? " <a href="/login">"Sign in"</a></p>
        </div>
    }
}

#[component]
fn VerifyCard(email: String) -> impl IntoView {
    let sent_to = format!("We sent a code to {email}.");
    view! {
        <div class="auth-card">
            <h1>"Enter your code"</h1>
            <p class="muted">{sent_to}</p>
            <form method="post" action="/login/verify" class="stack">
                <label for="code">"Code"</label>
                <input id="code" name="code" type="text" autocomplete="one-time-code" maxlength="6" required=true/>
                <button type="submit" class="btn">"Sign in"</button>
            </form>
            <p class="muted"><a href="/login">"Use a different email"</a></p>
        </div>
    }
}

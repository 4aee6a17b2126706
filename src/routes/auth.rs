//! Auth routes: the session gate, email-code sign-in and sign-out.

use std::convert::Infallible;

use axum::Form;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::header::REFERER;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::notify::{self, Notice};
use crate::pages;
use crate::services::auth::AuthError;
use crate::services::email_auth::{self, EmailAuthError};
use crate::services::session::User;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
const PENDING_EMAIL_COOKIE_NAME: &str = "pending_email";

fn session_token(headers: &HeaderMap) -> String {
    CookieJar::from_headers(headers)
        .get(COOKIE_NAME)
        .map(|c| c.value().to_owned())
        .unwrap_or_default()
}

/// Resolve the session user. Lookup failures count as signed out.
async fn lookup_user(state: &AppState, token: &str) -> Option<User> {
    if token.is_empty() {
        return None;
    }
    match state.auth.current_user(token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "session lookup failed; treating as signed out");
            None
        }
    }
}

// =============================================================================
// AUTH EXTRACTORS
// =============================================================================

/// Signed-in user for HTML pages. Rejects with a redirect to `/login`.
pub struct PageUser {
    pub user: User,
    pub token: String,
}

impl<S> FromRequestParts<S> for PageUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = session_token(&parts.headers);
        let user = lookup_user(&app_state, &token)
            .await
            .ok_or_else(|| Redirect::to("/login"))?;
        Ok(Self { user, token })
    }
}

/// Signed-in user for JSON endpoints. Rejects with `401`.
pub struct ApiUser {
    pub user: User,
}

impl<S> FromRequestParts<S> for ApiUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = session_token(&parts.headers);
        let user = lookup_user(&app_state, &token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { user })
    }
}

/// Session user if there is one; never rejects.
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = session_token(&parts.headers);
        Ok(Self(lookup_user(&app_state, &token).await))
    }
}

// =============================================================================
// COOKIES
// =============================================================================

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(30))
        .build()
}

fn expired_cookie(name: &'static str, path: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path(path)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

fn pending_email_cookie(email: String, secure: bool) -> Cookie<'static> {
    Cookie::build((PENDING_EMAIL_COOKIE_NAME, email))
        .path("/login")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::minutes(10))
        .build()
}

/// Same-site page to return to after a failed action, from the `Referer`.
pub(crate) fn return_path(headers: &HeaderMap) -> String {
    let referer = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let path = match referer.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |idx| &rest[idx..]),
        None => referer,
    };
    if path.starts_with("/dashboard") && !path.starts_with("//") {
        path.to_owned()
    } else {
        "/dashboard".to_owned()
    }
}

// =============================================================================
// SIGN-IN
// =============================================================================

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
}

#[derive(Deserialize)]
pub struct SignupForm {
    full_name: String,
    email: String,
}

#[derive(Deserialize)]
pub struct VerifyForm {
    code: String,
}

/// `GET /login`
pub async fn login_page(MaybeUser(user): MaybeUser, jar: CookieJar) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let (jar, notice) = notify::take(jar);
    (jar, Html(pages::auth::login_page(notice))).into_response()
}

/// `GET /signup`
pub async fn signup_page(MaybeUser(user): MaybeUser, jar: CookieJar) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let (jar, notice) = notify::take(jar);
    (jar, Html(pages::auth::signup_page(notice))).into_response()
}

/// `POST /login`: email a code to an existing account.
pub async fn request_login_code(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    request_code(&state, jar, &form.email, None, "/login").await
}

/// `POST /signup`: create the account if needed and email a code.
pub async fn request_signup_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Response {
    request_code(&state, jar, &form.email, Some(&form.full_name), "/signup").await
}

async fn request_code(
    state: &AppState,
    jar: CookieJar,
    raw_email: &str,
    full_name: Option<&str>,
    form_path: &'static str,
) -> Response {
    let secure = state.cookie_secure;
    let fail = |jar: CookieJar, notice: Notice| (notify::push(jar, notice, secure), Redirect::to(form_path)).into_response();

    let Some(email) = email_auth::normalize_email(raw_email) else {
        return fail(jar, Notice::InvalidEmail);
    };

    if let Err(e) = state.code_limiter.check_and_record(&email) {
        tracing::warn!(error = %e, "access code request throttled");
        return fail(jar, Notice::CodeRateLimited);
    }

    let code = match state.auth.request_code(&email, full_name).await {
        Ok(code) => code,
        Err(AuthError::Code(EmailAuthError::InvalidEmail)) => return fail(jar, Notice::InvalidEmail),
        Err(AuthError::Code(EmailAuthError::UnknownAccount)) => return fail(jar, Notice::UnknownAccount),
        Err(e) => {
            tracing::error!(error = %e, "access code request failed");
            return fail(jar, Notice::CodeRequestFailed);
        }
    };

    if let Err(e) = email_auth::deliver_access_code(state.mail.as_ref(), &email, &code).await {
        tracing::error!(error = %e, "access code delivery failed");
        return fail(jar, Notice::CodeRequestFailed);
    }

    let jar = notify::push(jar.add(pending_email_cookie(email, secure)), Notice::CodeSent, secure);
    (jar, Redirect::to("/login/verify")).into_response()
}

/// `GET /login/verify`
pub async fn verify_page(MaybeUser(user): MaybeUser, jar: CookieJar) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let Some(email) = jar.get(PENDING_EMAIL_COOKIE_NAME).map(|c| c.value().to_owned()) else {
        return Redirect::to("/login").into_response();
    };
    let (jar, notice) = notify::take(jar);
    (jar, Html(pages::auth::verify_page(&email, notice))).into_response()
}

/// `POST /login/verify`: exchange the code for a session cookie.
pub async fn verify_code(State(state): State<AppState>, jar: CookieJar, Form(form): Form<VerifyForm>) -> Response {
    let secure = state.cookie_secure;
    let Some(email) = jar.get(PENDING_EMAIL_COOKIE_NAME).map(|c| c.value().to_owned()) else {
        return Redirect::to("/login").into_response();
    };

    match state.auth.verify_code(&email, &form.code).await {
        Ok(token) => {
            tracing::info!(email = %email, "signed in");
            let jar = jar
                .add(session_cookie(token, secure))
                .add(expired_cookie(PENDING_EMAIL_COOKIE_NAME, "/login", secure));
            (notify::push(jar, Notice::SignedIn, secure), Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            if !matches!(
                e,
                AuthError::Code(EmailAuthError::InvalidCode | EmailAuthError::VerificationFailed)
            ) {
                tracing::error!(error = %e, "access code verification failed");
            }
            (notify::push(jar, Notice::VerificationFailed, secure), Redirect::to("/login/verify")).into_response()
        }
    }
}

// =============================================================================
// SIGN-OUT
// =============================================================================

/// `POST /auth/sign-out`: end the session and go home, or stay put on failure.
pub async fn sign_out(State(state): State<AppState>, auth: PageUser, jar: CookieJar, headers: HeaderMap) -> Response {
    let secure = state.cookie_secure;
    match state.auth.sign_out(&auth.token).await {
        Ok(()) => {
            tracing::info!(user_id = %auth.user.id, "signed out");
            let jar = jar.add(expired_cookie(COOKIE_NAME, "/", secure));
            (notify::push(jar, Notice::SignedOut, secure), Redirect::to("/")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = %auth.user.id, "sign out failed");
            (notify::push(jar, Notice::SignOutFailed, secure), Redirect::to(&return_path(&headers))).into_response()
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

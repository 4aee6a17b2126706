//! One-shot notices ("toasts") carried across a redirect.
//!
//! A handler that redirects after an action stores a [`Notice`] slug in a
//! short-lived cookie; the next rendered page takes it out of the jar and
//! shows it once.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const NOTICE_COOKIE_NAME: &str = "notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SignedOut,
    SignOutFailed,
    CodeSent,
    CodeRequestFailed,
    CodeRateLimited,
    InvalidEmail,
    UnknownAccount,
    VerificationFailed,
    SignedIn,
    BookAdded,
    StatusUpdated,
    StatusUpdateFailed,
    BookRemoved,
    RemoveFailed,
}

impl Notice {
    const ALL: [Self; 14] = [
        Self::SignedOut,
        Self::SignOutFailed,
        Self::CodeSent,
        Self::CodeRequestFailed,
        Self::CodeRateLimited,
        Self::InvalidEmail,
        Self::UnknownAccount,
        Self::VerificationFailed,
        Self::SignedIn,
        Self::BookAdded,
        Self::StatusUpdated,
        Self::StatusUpdateFailed,
        Self::BookRemoved,
        Self::RemoveFailed,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::SignedOut => "signed-out",
            Self::SignOutFailed => "sign-out-failed",
            Self::CodeSent => "code-sent",
            Self::CodeRequestFailed => "code-request-failed",
            Self::CodeRateLimited => "code-rate-limited",
            Self::InvalidEmail => "invalid-email",
            Self::UnknownAccount => "unknown-account",
            Self::VerificationFailed => "verification-failed",
            Self::SignedIn => "signed-in",
            Self::BookAdded => "book-added",
            Self::StatusUpdated => "status-updated",
            Self::StatusUpdateFailed => "status-update-failed",
            Self::BookRemoved => "book-removed",
            Self::RemoveFailed => "remove-failed",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.slug() == slug)
    }

    #[must_use]
    pub fn kind(self) -> NoticeKind {
        match self {
            Self::SignedOut | Self::CodeSent | Self::SignedIn | Self::BookAdded | Self::StatusUpdated | Self::BookRemoved => {
                NoticeKind::Success
            }
            Self::SignOutFailed
            | Self::CodeRequestFailed
            | Self::CodeRateLimited
            | Self::InvalidEmail
            | Self::UnknownAccount
            | Self::VerificationFailed
            | Self::StatusUpdateFailed
            | Self::RemoveFailed => NoticeKind::Error,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::SignedOut => "Signed out successfully",
            Self::SignOutFailed => "Failed to sign out",
            Self::CodeSent => "Check your email for a sign-in code",
            Self::CodeRequestFailed => "Could not send a sign-in code",
            Self::CodeRateLimited => "Too many codes requested, try again later",
            Self::InvalidEmail => "Enter a valid email address",
            Self::UnknownAccount => "No account for that email. Sign up first",
            Self::VerificationFailed => "That code is incorrect or expired",
            Self::SignedIn => "Signed in",
            Self::BookAdded => "Added to your shelf",
            Self::StatusUpdated => "Reading status updated",
            Self::StatusUpdateFailed => "Failed to update reading status",
            Self::BookRemoved => "Removed from your shelf",
            Self::RemoveFailed => "Failed to remove book",
        }
    }
}

/// Queue `notice` for the next rendered page.
#[must_use]
pub fn push(jar: CookieJar, notice: Notice, secure: bool) -> CookieJar {
    let cookie = Cookie::build((NOTICE_COOKIE_NAME, notice.slug()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::minutes(1));
    jar.add(cookie)
}

/// Take the pending notice, if any, clearing it from the jar.
#[must_use]
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(notice) = jar.get(NOTICE_COOKIE_NAME).map(|c| Notice::from_slug(c.value())) else {
        return (jar, None);
    };
    (jar.remove(Cookie::build(NOTICE_COOKIE_NAME).path("/")), notice)
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;

//! Auth provider seam.
//!
//! DESIGN
//! ======
//! Pages only consume the [`AuthProvider`] contract: look up the user behind
//! a session token, end a session, and run the email access-code sign-in.
//! [`PgAuthProvider`] implements it over the `users`, `sessions` and
//! `email_login_codes` tables.

use sqlx::PgPool;

use super::email_auth::{self, EmailAuthError};
use super::session::{self, User};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Code(#[from] EmailAuthError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the user owning `token`, or `None` for an unknown or expired session.
    async fn current_user(&self, token: &str) -> Result<Option<User>, AuthError>;

    /// End the session identified by `token`.
    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;

    /// Issue an access code. `full_name` is present for signup only.
    async fn request_code(&self, email: &str, full_name: Option<&str>) -> Result<String, AuthError>;

    /// Exchange a valid access code for a new session token.
    async fn verify_code(&self, email: &str, code: &str) -> Result<String, AuthError>;
}

pub struct PgAuthProvider {
    pool: PgPool,
}

impl PgAuthProvider {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AuthProvider for PgAuthProvider {
    async fn current_user(&self, token: &str) -> Result<Option<User>, AuthError> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(session::validate_session(&self.pool, token).await?)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        session::delete_session(&self.pool, token).await?;
        Ok(())
    }

    async fn request_code(&self, email: &str, full_name: Option<&str>) -> Result<String, AuthError> {
        Ok(email_auth::request_access_code(&self.pool, email, full_name).await?)
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<String, AuthError> {
        let user_id = email_auth::verify_access_code(&self.pool, email, code).await?;
        Ok(session::create_session(&self.pool, user_id).await?)
    }
}

//! Reader sessions.
//!
//! A successful code verification mints an opaque token, stores it in
//! `sessions` and hands it to the browser as the `session_token` cookie.
//! Rows expire after 30 days (column default); signing out deletes the row.

use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

const TOKEN_BYTES: usize = 32;
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hex, two digits per byte.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|b| [HEX_DIGITS[usize::from(b >> 4)], HEX_DIGITS[usize::from(b & 0x0f)]])
        .map(char::from)
        .collect()
}

#[must_use]
pub fn new_session_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    hex_encode(&bytes)
}

/// The signed-in reader, as the pages and the API see them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Collected at signup; accounts created before that step have none.
    pub full_name: Option<String>,
}

pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO sessions (token, user_id) VALUES ($1, $2) RETURNING token")
        .bind(new_session_token())
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// The reader owning `token`, or `None` for unknown and expired tokens.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r"SELECT u.id, u.email, u.full_name
          FROM users u
          WHERE u.id = (SELECT user_id FROM sessions WHERE token = $1 AND expires_at > now())",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Drop the session row. Unknown tokens are not an error.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1").bind(token).execute(pool).await.map(|_| ())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

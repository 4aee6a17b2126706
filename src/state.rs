//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the two collaborator seams (auth provider and shelf store) as trait
//! objects, plus the small amount of process-local state the routes need.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{AppConfig, MailConfig};
use crate::rate_limit::RateLimiter;
use crate::services::auth::{AuthProvider, PgAuthProvider};
use crate::services::shelf::{PgShelfStore, ShelfStore};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthProvider>,
    pub shelf: Arc<dyn ShelfStore>,
    /// Outbound mail credentials. `None` logs access codes instead.
    pub mail: Option<MailConfig>,
    pub cookie_secure: bool,
    /// Throttles access-code requests.
    pub code_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>, shelf: Arc<dyn ShelfStore>, config: &AppConfig) -> Self {
        Self {
            auth,
            shelf,
            mail: config.mail.clone(),
            cookie_secure: config.cookie_secure,
            code_limiter: RateLimiter::new(),
        }
    }

    /// State backed by Postgres for both seams.
    #[must_use]
    pub fn from_pool(pool: PgPool, config: &AppConfig) -> Self {
        Self::new(
            Arc::new(PgAuthProvider::new(pool.clone())),
            Arc::new(PgShelfStore::new(pool)),
            config,
        )
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::services::shelf::ReadingStatus;

    #[tokio::test]
    async fn memory_store_enforces_one_entry_per_book() {
        let store = MemoryShelfStore::default();
        let user = uuid::Uuid::new_v4();
        let book = crate::services::shelf::BookRef { book_id: "emma".into(), title: "Emma".into(), author: None };

        store.set_status(user, &book, ReadingStatus::WantToRead).await.unwrap();
        store.set_status(user, &book, ReadingStatus::IsReading).await.unwrap();

        let books = store.list_user_books(user).await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].status, ReadingStatus::IsReading);
    }

    #[tokio::test]
    async fn memory_auth_sign_out_ends_session() {
        let auth = MemoryAuthProvider::default();
        let (user, token) = auth.seed_session("reader@example.com", None);
        assert_eq!(auth.current_user(&token).await.unwrap(), Some(user));
        auth.sign_out(&token).await.unwrap();
        assert_eq!(auth.current_user(&token).await.unwrap(), None);
    }

    #[test]
    fn app_state_new_copies_config_flags() {
        let config = AppConfig {
            database_url: "postgres://unused".into(),
            port: 3000,
            db_max_connections: 5,
            cookie_secure: true,
            mail: None,
            static_dir: "static".into(),
        };
        let state = AppState::new(Arc::new(MemoryAuthProvider::default()), Arc::new(MemoryShelfStore::default()), &config);
        assert!(state.cookie_secure);
        assert!(state.mail.is_none());
    }
}

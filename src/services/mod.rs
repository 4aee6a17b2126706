//! Domain services used by page and API routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on HTTP translation and auth plumbing.

pub mod auth;
pub mod email_auth;
pub mod session;
pub mod shelf;

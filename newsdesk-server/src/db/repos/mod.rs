//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Visibility filters are applied in SQL, never after fetching

pub mod news;
pub mod subscribers;

pub use news::{NewsPost, NewsRepo, Visibility};
pub use subscribers::SubscriberRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

//! Newsletter subscriber repository

use sqlx::PgPool;

use super::DbError;
use crate::models::EmailAddress;

pub struct SubscriberRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriberRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Subscribe an email address (idempotent).
    ///
    /// Returns `true` when a new row was inserted, `false` when the address
    /// was already subscribed.
    pub async fn subscribe(&self, email: &EmailAddress) -> Result<bool, DbError> {
        let inserted: Option<(String,)> = sqlx::query_as(
            r#"
            INSERT INTO newsletter_subscribers (email) VALUES ($1)
            ON CONFLICT (email) DO NOTHING
            RETURNING email
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(inserted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn subscribing_twice_is_not_new() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        let unique = format!(
            "reader+{}@example.com",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        let email = EmailAddress::parse(Some(&unique)).unwrap();
        let repo = SubscriberRepo::new(&pool);

        assert!(repo.subscribe(&email).await.unwrap());
        assert!(!repo.subscribe(&email).await.unwrap());
    }
}

//! Postgres pool for the news and subscriber tables
//!
//! Built once by `newsdesk serve` from `NEON_DATABASE_URL` and shared by
//! every handler through `AppState`. Neon wants TLS, which the URL asks for
//! with `sslmode=require`.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size when `NEWSDESK_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// A suspended Neon compute can take several seconds to answer.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect with [`DEFAULT_MAX_CONNECTIONS`].
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect and verify one connection before returning, so a bad URL fails
/// at startup instead of on the first request.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to news database");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    // DATABASE_URL=postgres://... cargo test -p newsdesk-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_reaches_news_tables() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 1).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news_posts WHERE FALSE")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(count, 0);
    }
}

//! News post repository
//!
//! - create: INSERT ... RETURNING
//! - update: COALESCE per column, absent fields keep their value
//! - reads: anonymous callers only ever see published rows

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{NewPost, PostChanges};

const COLUMNS: &str = "id, title, content, image_url, published, slug, created_at, updated_at";

/// News post record, serialized to API callers as-is
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which posts a read may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Published posts only (anonymous callers)
    PublishedOnly,
    /// Every post (admin callers)
    All,
}

impl Visibility {
    pub fn for_admin(is_admin: bool) -> Self {
        if is_admin {
            Self::All
        } else {
            Self::PublishedOnly
        }
    }

    fn include_unpublished(self) -> bool {
        matches!(self, Self::All)
    }
}

/// News post repository
pub struct NewsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List posts, newest first.
    pub async fn list(&self, visibility: Visibility) -> Result<Vec<NewsPost>, DbError> {
        let posts = sqlx::query_as::<_, NewsPost>(&format!(
            "SELECT {COLUMNS} FROM news_posts \
             WHERE ($1 OR published) \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(visibility.include_unpublished())
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Get a single post by id.
    pub async fn get_by_id(&self, id: i64, visibility: Visibility) -> Result<NewsPost, DbError> {
        sqlx::query_as::<_, NewsPost>(&format!(
            "SELECT {COLUMNS} FROM news_posts WHERE id = $1 AND ($2 OR published)"
        ))
        .bind(id)
        .bind(visibility.include_unpublished())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "post",
            id: id.to_string(),
        })
    }

    /// Get a single post by slug. Slugs are not unique; the newest match wins.
    pub async fn get_by_slug(&self, slug: &str, visibility: Visibility) -> Result<NewsPost, DbError> {
        sqlx::query_as::<_, NewsPost>(&format!(
            "SELECT {COLUMNS} FROM news_posts \
             WHERE slug = $1 AND ($2 OR published) \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        ))
        .bind(slug)
        .bind(visibility.include_unpublished())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "post",
            id: slug.to_owned(),
        })
    }

    /// Insert a post; the slug is derived from its title.
    pub async fn create(&self, post: &NewPost) -> Result<NewsPost, DbError> {
        let created = sqlx::query_as::<_, NewsPost>(&format!(
            "INSERT INTO news_posts (title, content, image_url, published, slug) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.image_url.as_deref())
        .bind(post.published)
        .bind(post.slug())
        .fetch_one(self.pool)
        .await?;

        tracing::info!(id = created.id, slug = %created.slug, "news post created");
        Ok(created)
    }

    /// Apply a partial update in one statement.
    pub async fn update(&self, id: i64, changes: &PostChanges) -> Result<NewsPost, DbError> {
        let updated = sqlx::query_as::<_, NewsPost>(&format!(
            "UPDATE news_posts SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                image_url = COALESCE($4, image_url), \
                published = COALESCE($5, published), \
                slug = COALESCE($6, slug), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(changes.title.as_ref().map(|t| t.as_str()))
        .bind(changes.content.as_ref().map(|c| c.as_str()))
        .bind(changes.image_url.as_deref())
        .bind(changes.published)
        .bind(changes.slug())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "post",
            id: id.to_string(),
        })?;

        tracing::info!(id, "news post updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p newsdesk-server -- --ignored

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn draft(title: &str) -> NewPost {
        NewPost::from_parts(Some(title), Some("Body text"), None, Some(false)).unwrap()
    }

    #[test]
    fn visibility_from_admin_flag() {
        assert_eq!(Visibility::for_admin(true), Visibility::All);
        assert_eq!(Visibility::for_admin(false), Visibility::PublishedOnly);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unpublished_posts_hidden_from_anonymous_reads() {
        let pool = pool().await;
        let repo = NewsRepo::new(&pool);

        let post = repo.create(&draft("Embargoed Story")).await.unwrap();
        assert!(!post.published);
        assert_eq!(post.slug, "embargoed-story");

        let listed = repo.list(Visibility::PublishedOnly).await.unwrap();
        assert!(listed.iter().all(|p| p.published));
        assert!(!listed.iter().any(|p| p.id == post.id));

        assert!(matches!(
            repo.get_by_id(post.id, Visibility::PublishedOnly).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(repo.get_by_id(post.id, Visibility::All).await.is_ok());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_preserves_absent_fields() {
        let pool = pool().await;
        let repo = NewsRepo::new(&pool);

        let post = repo.create(&draft("Original Title")).await.unwrap();
        let changes = PostChanges::from_parts(None, None, None, Some(true)).unwrap();
        let updated = repo.update(post.id, &changes).await.unwrap();

        assert!(updated.published);
        assert_eq!(updated.title, "Original Title");
        assert_eq!(updated.content, "Body text");
        assert_eq!(updated.slug, "original-title");
        assert!(updated.updated_at >= post.updated_at);

        let retitled = PostChanges::from_parts(Some("Second Title"), None, None, None).unwrap();
        let updated = repo.update(post.id, &retitled).await.unwrap();
        assert_eq!(updated.slug, "second-title");
        assert!(updated.published);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_unknown_id_is_not_found() {
        let pool = pool().await;
        let changes = PostChanges::default();
        let result = NewsRepo::new(&pool).update(i64::MAX, &changes).await;
        assert!(matches!(result, Err(DbError::NotFound { resource: "post", .. })));
    }
}

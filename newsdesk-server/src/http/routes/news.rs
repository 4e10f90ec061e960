//! News post endpoints
//!
//! GET    /api/news            list (published only unless admin)
//! GET    /api/news?id=..      single post by id
//! GET    /api/news?slug=..    single post by slug
//! POST   /api/news            create (admin)
//! PUT    /api/news            partial update (admin)

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{de::Error as _, Deserialize, Deserializer};

use crate::db::repos::{NewsPost, NewsRepo, Visibility};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, RequireAdmin};
use crate::http::routes::endpoint;
use crate::http::server::AppState;
use crate::models::{NewPost, PostChanges, ValidationError};

/// Lookup parameters for GET
#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub id: Option<String>,
    pub slug: Option<String>,
}

/// Body for POST and PUT
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPayload {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(alias = "image_url")]
    pub image_url: Option<String>,
    pub published: Option<bool>,
}

/// Accept ids sent either as JSON numbers or numeric strings.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(n)) => Ok(Some(n)),
        Some(RawId::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom("id must be an integer")),
    }
}

fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "id",
        reason: "must be an integer",
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// GET /api/news
async fn get_news(
    State(state): State<Arc<AppState>>,
    visibility: Visibility,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let repo = NewsRepo::new(&state.pool);

    if let Some(raw) = non_blank(params.id.as_deref()) {
        let post = repo.get_by_id(parse_id(raw)?, visibility).await?;
        return Ok(Json(post).into_response());
    }

    if let Some(slug) = non_blank(params.slug.as_deref()) {
        let post = repo.get_by_slug(slug, visibility).await?;
        return Ok(Json(post).into_response());
    }

    let posts = repo.list(visibility).await?;
    tracing::debug!(count = posts.len(), ?visibility, "listed news posts");
    Ok(Json(posts).into_response())
}

/// POST /api/news
async fn create_news(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    JsonBody(payload): JsonBody<NewsPayload>,
) -> Result<(StatusCode, Json<NewsPost>), ApiError> {
    let post = NewPost::from_parts(
        payload.title.as_deref(),
        payload.content.as_deref(),
        payload.image_url,
        payload.published,
    )?;

    let created = NewsRepo::new(&state.pool).create(&post).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/news
async fn update_news(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    JsonBody(payload): JsonBody<NewsPayload>,
) -> Result<Json<NewsPost>, ApiError> {
    let id = payload.id.ok_or(ValidationError::Required { field: "id" })?;
    let changes = PostChanges::from_parts(
        payload.title.as_deref(),
        payload.content.as_deref(),
        payload.image_url,
        payload.published,
    )?;

    let updated = NewsRepo::new(&state.pool).update(id, &changes).await?;
    Ok(Json(updated))
}

/// News routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/news",
        endpoint(get(get_news).post(create_news).put(update_news)),
    )
}

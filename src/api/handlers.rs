use axum::extract::{Form, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::models::{ArticleListItem, ArticleResponse};
use super::AppState;
use crate::error::AppError;
use crate::ingest::IngestOutcome;

// GET /article/{user_id}/{article_id}
pub async fn get_article(
    State(state): State<AppState>,
    Path((user_id, article_id)): Path<(String, i64)>,
) -> Result<Json<ArticleResponse>, AppError> {
    let article = state
        .repository
        .article_by_id(article_id)
        .await?
        .ok_or(AppError::NotFound {
            resource: "article",
            id: article_id,
        })?;
    let favorited = state.repository.is_favorited(&user_id, article_id).await?;
    Ok(Json(ArticleResponse::new(article, favorited)))
}

// GET /featured
pub async fn featured_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleListItem>>, AppError> {
    let articles = state.repository.featured_articles().await?;
    Ok(Json(articles.into_iter().map(ArticleListItem::from).collect()))
}

// GET /section/{section_name}
pub async fn section_articles(
    State(state): State<AppState>,
    Path(section_name): Path<String>,
) -> Result<Json<Vec<ArticleListItem>>, AppError> {
    let articles = state.repository.articles_by_section(&section_name).await?;
    Ok(Json(articles.into_iter().map(ArticleListItem::from).collect()))
}

// GET /favorite/add/{user_id}/{article_id}
pub async fn add_favorite(
    State(state): State<AppState>,
    Path((user_id, article_id)): Path<(String, i64)>,
) -> Result<StatusCode, AppError> {
    if !state.repository.article_exists(article_id).await? {
        return Err(AppError::NotFound {
            resource: "article",
            id: article_id,
        });
    }
    state.repository.add_favorite(&user_id, article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /favorite/remove/{user_id}/{article_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((user_id, article_id)): Path<(String, i64)>,
) -> Result<StatusCode, AppError> {
    if !state.repository.article_exists(article_id).await? {
        return Err(AppError::NotFound {
            resource: "article",
            id: article_id,
        });
    }
    state.repository.remove_favorite(&user_id, article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AddArticleForm {
    pub url: String,
}

// POST /add_article
//
// Answers 301 whether the article was just ingested or already existed;
// the shipped submission form cannot tell the two apart and does not
// need to.
pub async fn add_article(
    State(state): State<AppState>,
    Form(form): Form<AddArticleForm>,
) -> Result<impl IntoResponse, AppError> {
    let url = form.url.trim();
    if url.is_empty() {
        return Err(AppError::BadRequest("missing url".to_string()));
    }

    match state.ingestor.ingest(url).await? {
        IngestOutcome::Created(id) => tracing::info!("added article {} for {}", id, url),
        IngestOutcome::AlreadyExists(id) => {
            tracing::debug!("submission for existing article {}: {}", id, url)
        }
    }

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/featured")],
    ))
}

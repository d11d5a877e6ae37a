use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use crate::db::Repository;
use crate::ingest::Ingestor;

pub mod handlers;
pub mod models;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<Repository>,
    pub ingestor: Arc<Ingestor>,
}

impl AppState {
    pub fn new(repository: Repository, config: &Config) -> Self {
        let repository = Arc::new(repository);
        let ingestor = Arc::new(Ingestor::new(repository.clone(), config));
        Self {
            repository,
            ingestor,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/article/{user_id}/{article_id}", get(handlers::get_article))
        .route("/featured", get(handlers::featured_articles))
        .route("/section/{section_name}", get(handlers::section_articles))
        .route(
            "/favorite/add/{user_id}/{article_id}",
            get(handlers::add_favorite),
        )
        .route(
            "/favorite/remove/{user_id}/{article_id}",
            get(handlers::remove_favorite),
        )
        .route("/add_article", post(handlers::add_article))
        .with_state(state)
}

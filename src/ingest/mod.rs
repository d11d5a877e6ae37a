use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::db::Repository;
use crate::error::Result;
use crate::models::NewArticle;

mod fetcher;
pub mod normalize;
pub mod parser;

pub use fetcher::PageFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Created(i64),
    AlreadyExists(i64),
}

/// Turns a submitted URL into a stored article: dedupe by URL, fetch,
/// parse, normalize, persist. Runs synchronously within the request; the
/// staging row it creates never outlives the call.
pub struct Ingestor {
    fetcher: PageFetcher,
    repository: Arc<Repository>,
}

impl Ingestor {
    pub fn new(repository: Arc<Repository>, config: &Config) -> Self {
        Self {
            fetcher: PageFetcher::new(Duration::from_secs(config.fetch_timeout_secs)),
            repository,
        }
    }

    pub async fn ingest(&self, url: &str) -> Result<IngestOutcome> {
        if let Some(existing) = self.repository.article_by_url(url).await? {
            tracing::debug!("article already ingested: {}", url);
            return Ok(IngestOutcome::AlreadyExists(existing.id));
        }

        let waiting_id = self.repository.enqueue_waiting(url).await?;
        let result = self.run_pipeline(url).await;
        // the staging row is cleared on failure too, so a failed url can
        // simply be resubmitted
        self.repository.remove_waiting(waiting_id).await?;
        result
    }

    async fn run_pipeline(&self, url: &str) -> Result<IngestOutcome> {
        let html = self.fetcher.fetch(url).await?;
        let parsed = parser::parse_article(&html)?;
        let article_body = normalize::normalize_paragraphs(&parsed.paragraphs);

        let article = NewArticle {
            headline: parsed.headline,
            pub_date: parsed.pub_date,
            section: parsed.section,
            authors: parsed.authors,
            article_body,
            url: url.to_string(),
            is_featured: false,
        };

        let (id, created) = self.repository.insert_article(article).await?;
        if created {
            tracing::info!("ingested article {} from {}", id, url);
            Ok(IngestOutcome::Created(id))
        } else {
            // a concurrent submission won the insert race; same outcome as
            // the up-front existence check
            tracing::debug!("article {} already existed at insert: {}", id, url);
            Ok(IngestOutcome::AlreadyExists(id))
        }
    }
}

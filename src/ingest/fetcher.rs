use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};

const USER_AGENT_STRING: &str = "tsl-news/1.0";

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT_STRING)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Download an article page. Anything other than a 2xx answer is a
    /// hard failure; callers must not persist partial state afterwards.
    pub async fn fetch(&self, article_url: &str) -> Result<String> {
        let url = Url::parse(article_url)
            .map_err(|e| AppError::BadRequest(format!("invalid url {article_url}: {e}")))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("failed to fetch {}: {}", article_url, status);
            return Err(AppError::Fetch {
                url: article_url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

use serde::Serialize;

use crate::models::Article;

/// Date format the reader app displays, e.g. "May 26, 2012".
pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

/// A single article plus the requesting device's favorite state.
/// `favorited` is serialized as the strings "true"/"false" rather than a
/// JSON boolean; the shipped reader app parses it that way.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub headline: String,
    pub authors: Vec<String>,
    pub pub_date: String,
    pub section: String,
    pub url: String,
    pub article_body: String,
    pub favorited: String,
}

impl ArticleResponse {
    pub fn new(article: Article, favorited: bool) -> Self {
        Self {
            id: article.id,
            headline: article.headline,
            authors: article.authors,
            pub_date: article.pub_date.format(DISPLAY_DATE_FORMAT).to_string(),
            section: article.section,
            url: article.url,
            article_body: article.article_body,
            favorited: if favorited { "true" } else { "false" }.to_string(),
        }
    }
}

/// An article as it appears in the featured and section listings. Lists
/// have no device context, so there is no favorite state here.
#[derive(Debug, Serialize)]
pub struct ArticleListItem {
    pub id: i64,
    pub headline: String,
    pub authors: Vec<String>,
    pub pub_date: String,
    pub section: String,
    pub url: String,
    pub article_body: String,
}

impl From<Article> for ArticleListItem {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            headline: article.headline,
            authors: article.authors,
            pub_date: article.pub_date.format(DISPLAY_DATE_FORMAT).to_string(),
            section: article.section,
            url: article.url,
            article_body: article.article_body,
        }
    }
}

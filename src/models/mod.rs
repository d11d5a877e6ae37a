use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored article, joined with its section name and ordered author names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub headline: String,
    pub pub_date: NaiveDate,
    pub section: String,
    pub authors: Vec<String>,
    pub article_body: String,
    pub url: String,
    pub is_featured: bool,
}

/// Fields for an article about to be persisted. Section and authors are
/// carried by name; the repository resolves them to rows on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub headline: String,
    pub pub_date: NaiveDate,
    pub section: String,
    pub authors: Vec<String>,
    pub article_body: String,
    pub url: String,
    pub is_featured: bool,
}

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{Article, NewArticle};

use super::schema::SCHEMA;

const ARTICLE_SELECT: &str = "SELECT a.id, a.headline, a.pub_date, s.name, a.article_body, a.url, a.is_featured
     FROM articles a
     JOIN sections s ON a.section_id = s.id";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // Article operations

    pub async fn article_by_id(&self, id: i64) -> Result<Option<Article>> {
        let article = self
            .conn
            .call(move |conn| {
                let article = conn
                    .query_row(
                        &format!("{ARTICLE_SELECT} WHERE a.id = ?1"),
                        params![id],
                        |row| Ok(article_from_row(row)),
                    )
                    .optional()?;
                match article {
                    Some(mut article) => {
                        article.authors = article_authors(conn, article.id)?;
                        Ok(Some(article))
                    }
                    None => Ok(None),
                }
            })
            .await?;
        Ok(article)
    }

    pub async fn article_by_url(&self, url: &str) -> Result<Option<Article>> {
        let url = url.to_string();
        let article = self
            .conn
            .call(move |conn| {
                let article = conn
                    .query_row(
                        &format!("{ARTICLE_SELECT} WHERE a.url = ?1"),
                        params![url],
                        |row| Ok(article_from_row(row)),
                    )
                    .optional()?;
                match article {
                    Some(mut article) => {
                        article.authors = article_authors(conn, article.id)?;
                        Ok(Some(article))
                    }
                    None => Ok(None),
                }
            })
            .await?;
        Ok(article)
    }

    /// Insert an article, creating its section and author rows as needed.
    ///
    /// Returns `(id, created)`. A second writer racing past the caller's
    /// existence check loses on the unique url index and gets the existing
    /// row back with `created = false` instead of an error.
    pub async fn insert_article(&self, article: NewArticle) -> Result<(i64, bool)> {
        let result = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                let section_id = section_id_or_create(&tx, &article.section)?;
                let inserted = tx.execute(
                    "INSERT INTO articles (headline, pub_date, section_id, article_body, url, is_featured)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT(url) DO NOTHING",
                    params![
                        article.headline,
                        article.pub_date.format("%Y-%m-%d").to_string(),
                        section_id,
                        article.article_body,
                        article.url,
                        article.is_featured,
                    ],
                )?;

                if inserted == 0 {
                    let id: i64 = tx.query_row(
                        "SELECT id FROM articles WHERE url = ?1",
                        params![article.url],
                        |row| row.get(0),
                    )?;
                    tx.commit()?;
                    return Ok((id, false));
                }

                let article_id = tx.last_insert_rowid();
                for (position, name) in article.authors.iter().enumerate() {
                    let author_id = author_id_or_create(&tx, name)?;
                    tx.execute(
                        "INSERT OR IGNORE INTO article_authors (article_id, author_id, position) VALUES (?1, ?2, ?3)",
                        params![article_id, author_id, position as i64],
                    )?;
                }

                tx.commit()?;
                Ok((article_id, true))
            })
            .await?;
        Ok(result)
    }

    /// Articles flagged for promotion, newest first.
    pub async fn featured_articles(&self) -> Result<Vec<Article>> {
        let articles = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "{ARTICLE_SELECT} WHERE a.is_featured = 1 ORDER BY a.pub_date DESC, a.id DESC"
                ))?;
                let mut articles = stmt
                    .query_map([], |row| Ok(article_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                for article in &mut articles {
                    article.authors = article_authors(conn, article.id)?;
                }
                Ok(articles)
            })
            .await?;
        Ok(articles)
    }

    /// Articles in a section, newest first. An unknown section is an empty list.
    pub async fn articles_by_section(&self, section: &str) -> Result<Vec<Article>> {
        let section = section.to_string();
        let articles = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "{ARTICLE_SELECT} WHERE s.name = ?1 ORDER BY a.pub_date DESC, a.id DESC"
                ))?;
                let mut articles = stmt
                    .query_map(params![section], |row| Ok(article_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                for article in &mut articles {
                    article.authors = article_authors(conn, article.id)?;
                }
                Ok(articles)
            })
            .await?;
        Ok(articles)
    }

    pub async fn article_exists(&self, id: i64) -> Result<bool> {
        let exists = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM articles WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )?;
                Ok(count > 0)
            })
            .await?;
        Ok(exists)
    }

    #[allow(dead_code)]
    pub async fn article_count(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    // Favorite operations

    /// Mark an article as a favorite of the given device, creating the user
    /// row on first sight. Re-adding an existing favorite is a no-op.
    pub async fn add_favorite(&self, udid: &str, article_id: i64) -> Result<()> {
        let udid = udid.to_string();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT OR IGNORE INTO users (iphone_udid) VALUES (?1)",
                    params![udid],
                )?;
                let user_id: i64 = tx.query_row(
                    "SELECT id FROM users WHERE iphone_udid = ?1",
                    params![udid],
                    |row| row.get(0),
                )?;
                tx.execute(
                    "INSERT OR IGNORE INTO user_favorites (user_id, article_id) VALUES (?1, ?2)",
                    params![user_id, article_id],
                )?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    /// Remove a favorite. Unknown users and never-favorited articles are no-ops.
    pub async fn remove_favorite(&self, udid: &str, article_id: i64) -> Result<()> {
        let udid = udid.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM user_favorites
                     WHERE article_id = ?1
                       AND user_id IN (SELECT id FROM users WHERE iphone_udid = ?2)",
                    params![article_id, udid],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn is_favorited(&self, udid: &str, article_id: i64) -> Result<bool> {
        let udid = udid.to_string();
        let favorited = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM user_favorites uf
                     JOIN users u ON uf.user_id = u.id
                     WHERE u.iphone_udid = ?1 AND uf.article_id = ?2",
                    params![udid, article_id],
                    |row| row.get(0),
                )?;
                Ok(count > 0)
            })
            .await?;
        Ok(favorited)
    }

    #[allow(dead_code)]
    pub async fn favorite_count(&self, udid: &str) -> Result<i64> {
        let udid = udid.to_string();
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM user_favorites uf
                     JOIN users u ON uf.user_id = u.id
                     WHERE u.iphone_udid = ?1",
                    params![udid],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    // Waiting (staging) operations

    pub async fn enqueue_waiting(&self, url: &str) -> Result<i64> {
        let url = url.to_string();
        let id = self
            .conn
            .call(move |conn| {
                conn.execute("INSERT INTO waiting_articles (url) VALUES (?1)", params![url])?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        Ok(id)
    }

    pub async fn remove_waiting(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute("DELETE FROM waiting_articles WHERE id = ?1", params![id])?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    #[allow(dead_code)]
    pub async fn waiting_count(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM waiting_articles", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn article_from_row(row: &Row) -> Article {
    Article {
        id: row.get(0).unwrap(),
        headline: row.get(1).unwrap(),
        pub_date: row
            .get::<_, String>(2)
            .ok()
            .and_then(|s| parse_date(&s))
            .unwrap_or_default(),
        section: row.get(3).unwrap(),
        authors: Vec::new(),
        article_body: row.get(4).unwrap(),
        url: row.get(5).unwrap(),
        is_featured: row.get::<_, i64>(6).unwrap() != 0,
    }
}

fn article_authors(conn: &rusqlite::Connection, article_id: i64) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT au.name FROM authors au
         JOIN article_authors aa ON aa.author_id = au.id
         WHERE aa.article_id = ?1
         ORDER BY aa.position",
    )?;
    let authors = stmt
        .query_map(params![article_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(authors)
}

fn section_id_or_create(conn: &rusqlite::Connection, name: &str) -> rusqlite::Result<i64> {
    conn.execute("INSERT OR IGNORE INTO sections (name) VALUES (?1)", params![name])?;
    conn.query_row("SELECT id FROM sections WHERE name = ?1", params![name], |row| {
        row.get(0)
    })
}

fn author_id_or_create(conn: &rusqlite::Connection, name: &str) -> rusqlite::Result<i64> {
    let existing: Option<i64> = conn
        .query_row("SELECT id FROM authors WHERE name = ?1", params![name], |row| {
            row.get(0)
        })
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute("INSERT INTO authors (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

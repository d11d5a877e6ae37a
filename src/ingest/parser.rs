use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::normalize::collapse_whitespace;
use crate::error::{AppError, Result};

/// Date format used on tsl.pomona.edu article pages, e.g. "April 24, 2015".
const SITE_DATE_FORMAT: &str = "%B %d, %Y";

static HEADLINE: Lazy<Selector> =
    Lazy::new(|| selector("h1.headline, h1.article-headline, article h1"));
static META_TITLE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:title"]"#));
static BYLINE: Lazy<Selector> = Lazy::new(|| selector(".byline"));
static BYLINE_AUTHORS: Lazy<Selector> =
    Lazy::new(|| selector(r#".byline a[rel="author"], .byline .author-name"#));
static DATE: Lazy<Selector> = Lazy::new(|| selector(".byline .published, .article-date, time"));
static SECTION: Lazy<Selector> = Lazy::new(|| selector(".article-section a, .article-section"));
static BREADCRUMBS: Lazy<Selector> = Lazy::new(|| selector(".breadcrumbs a"));
static BODY_PARAGRAPHS: Lazy<Selector> =
    Lazy::new(|| selector(".article-body p, .story-body p"));

static DATE_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+ \d{1,2}, \d{4}").expect("date regex"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Fields extracted from one article page, before normalization.
#[derive(Debug, Clone)]
pub struct ParsedArticle {
    pub headline: String,
    pub authors: Vec<String>,
    pub pub_date: NaiveDate,
    pub section: String,
    pub paragraphs: Vec<String>,
}

/// Extract headline, byline authors, publication date, section, and body
/// paragraphs from an article page. Headline, date, section, and a
/// non-empty body are required; a page without them is a parse failure.
/// Unsigned pieces (no byline) parse with an empty author list.
pub fn parse_article(html: &str) -> Result<ParsedArticle> {
    let document = Html::parse_document(html);

    let headline =
        headline(&document).ok_or_else(|| AppError::Parse("missing headline".to_string()))?;
    let authors = authors(&document);
    let pub_date = pub_date(&document)
        .ok_or_else(|| AppError::Parse("missing or unparseable publication date".to_string()))?;
    let section =
        section(&document).ok_or_else(|| AppError::Parse("missing section name".to_string()))?;

    let paragraphs: Vec<String> = document
        .select(&BODY_PARAGRAPHS)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.is_empty() {
        return Err(AppError::Parse("missing article body".to_string()));
    }

    Ok(ParsedArticle {
        headline,
        authors,
        pub_date,
        section,
        paragraphs,
    })
}

fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn headline(document: &Html) -> Option<String> {
    document
        .select(&HEADLINE)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            document
                .select(&META_TITLE)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(collapse_whitespace)
                .filter(|t| !t.is_empty())
        })
}

fn authors(document: &Html) -> Vec<String> {
    let from_links: Vec<String> = document
        .select(&BYLINE_AUTHORS)
        .map(element_text)
        .filter(|name| !name.is_empty())
        .collect();
    if !from_links.is_empty() {
        return from_links;
    }

    // Older pages carry a plain-text byline: "By First Last and Other Name".
    let Some(byline) = document.select(&BYLINE).next().map(element_text) else {
        return Vec::new();
    };
    let byline = DATE_TEXT.replace(&byline, "");
    let byline = byline.trim();
    let Some(names) = byline.strip_prefix("By ") else {
        return Vec::new();
    };
    names
        .split(" and ")
        .flat_map(|part| part.split(','))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn pub_date(document: &Html) -> Option<NaiveDate> {
    for element in document.select(&DATE) {
        let text = element_text(element);
        if let Some(found) = DATE_TEXT.find(&text) {
            if let Ok(date) = NaiveDate::parse_from_str(found.as_str(), SITE_DATE_FORMAT) {
                return Some(date);
            }
        }
    }
    None
}

fn section(document: &Html) -> Option<String> {
    if let Some(element) = document.select(&SECTION).next() {
        let name = element_text(element);
        if !name.is_empty() {
            return Some(name);
        }
    }
    // the last breadcrumb is the section on older article pages
    document
        .select(&BREADCRUMBS)
        .last()
        .map(element_text)
        .filter(|name| !name.is_empty() && name.as_str() != "Home")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{article_page, CHAPLAINCY_ARTICLE_HTML};

    #[test]
    fn parses_chaplaincy_article_fields() {
        let parsed = parse_article(CHAPLAINCY_ARTICLE_HTML).unwrap();
        assert_eq!(
            parsed.headline,
            "Chaplaincy Budget Discussions Arise During Committee Review"
        );
        assert_eq!(parsed.authors, vec!["Kevin Tidmarsh"]);
        assert_eq!(parsed.pub_date, NaiveDate::from_ymd_opt(2015, 4, 24).unwrap());
        assert_eq!(parsed.section, "News");
        assert_eq!(parsed.paragraphs.len(), 3);
    }

    #[test]
    fn section_is_read_from_section_block_when_present() {
        let html = article_page(
            "City and 5C Students Join Forces",
            r#"By <a href="/staff/jane-roe" rel="author">Jane Roe</a>"#,
            "April 24, 2015",
            "Opinions",
            &["A paragraph."],
        );
        let parsed = parse_article(&html).unwrap();
        assert_eq!(parsed.section, "Opinions");
    }

    #[test]
    fn multiple_byline_links_keep_their_order() {
        let html = article_page(
            "Shared Byline",
            r#"By <a href="/staff/a" rel="author">Alice Brown</a> and <a href="/staff/c" rel="author">Carol Danvers</a>"#,
            "May 2, 2015",
            "News",
            &["A paragraph."],
        );
        let parsed = parse_article(&html).unwrap();
        assert_eq!(parsed.authors, vec!["Alice Brown", "Carol Danvers"]);
    }

    #[test]
    fn plain_text_byline_is_split_on_and() {
        let html = article_page(
            "Plain Byline",
            "By Alice Brown and Carol Danvers",
            "May 2, 2015",
            "News",
            &["A paragraph."],
        );
        let parsed = parse_article(&html).unwrap();
        assert_eq!(parsed.authors, vec!["Alice Brown", "Carol Danvers"]);
    }

    #[test]
    fn unsigned_piece_parses_with_no_authors() {
        let html = article_page("Staff Editorial", "", "May 2, 2015", "Opinions", &["A paragraph."]);
        let parsed = parse_article(&html).unwrap();
        assert!(parsed.authors.is_empty());
    }

    #[test]
    fn page_without_headline_is_a_parse_error() {
        let html = r#"<html><body><div class="article-body"><p>Body only.</p></div></body></html>"#;
        let err = parse_article(html).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn page_without_date_is_a_parse_error() {
        let html = article_page("No Date", "By Jane Roe", "sometime last week", "News", &["A paragraph."]);
        let err = parse_article(&html).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn page_without_body_is_a_parse_error() {
        let html = article_page("No Body", "By Jane Roe", "May 2, 2015", "News", &[]);
        let err = parse_article(&html).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn headline_falls_back_to_og_title() {
        let html = r#"<html><head><meta property="og:title" content="Meta Headline"></head>
<body>
  <div class="article-section">News</div>
  <div class="byline">By Jane Roe <span class="published">May 2, 2015</span></div>
  <div class="article-body"><p>A paragraph.</p></div>
</body></html>"#;
        let parsed = parse_article(html).unwrap();
        assert_eq!(parsed.headline, "Meta Headline");
    }
}

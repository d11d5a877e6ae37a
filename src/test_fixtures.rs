//! Article pages used by parser, ingestion, and endpoint tests. The
//! chaplaincy fixture reproduces the 2015 tsl.pomona.edu article markup,
//! including a CRLF line break and a whitespace-only paragraph so the
//! normalization invariants are actually exercised.

pub const CHAPLAINCY_URL_PATH: &str =
    "/articles/2015/4/24/news/6415-chaplaincy-budget-discussions-arise-during-committee-review";

pub const CHAPLAINCY_ARTICLE_HTML: &str = concat!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Chaplaincy Budget Discussions Arise During Committee Review | The Student Life</title>
  <meta property="og:title" content="Chaplaincy Budget Discussions Arise During Committee Review">
</head>
<body>
  <div class="breadcrumbs"><a href="/">Home</a> &raquo; <a href="/news">News</a></div>
  <article class="article">
    <h1 class="headline">Chaplaincy Budget Discussions Arise During Committee Review</h1>
    <div class="byline">
      By <a href="/staff/kevin-tidmarsh" rel="author">Kevin Tidmarsh</a>
      <span class="published">April 24, 2015</span>
    </div>
    <div class="article-body">
      <p>Discussions over the chaplaincy budget arose during this week's"#,
    "\r\n",
    r#"        committee review, with student representatives pressing for detail.</p>
      <p> </p>
      <p>Committee members said the review would conclude before the end
        of the semester, and that chaplaincy funding levels would be
        revisited next fall.</p>
      <p>The committee meets again next week.</p>
    </div>
  </article>
</body>
</html>
"#
);

/// Render an article page in the same markup as the chaplaincy fixture,
/// with the section carried in an `article-section` block instead of
/// breadcrumbs.
pub fn article_page(
    headline: &str,
    byline: &str,
    date: &str,
    section: &str,
    paragraphs: &[&str],
) -> String {
    let body = paragraphs
        .iter()
        .map(|p| format!("      <p>{p}</p>\n"))
        .collect::<String>();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{headline} | The Student Life</title>
  <meta property="og:title" content="{headline}">
</head>
<body>
  <article class="article">
    <div class="article-section"><a href="/sections">{section}</a></div>
    <h1 class="headline">{headline}</h1>
    <div class="byline">
      {byline}
      <span class="published">{date}</span>
    </div>
    <div class="article-body">
{body}    </div>
  </article>
</body>
</html>
"#
    )
}

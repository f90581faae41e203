//! HTML rendering for the index and search pages.
//!
//! Both pages share one layout: a header with the search form, followed by
//! either nothing (index) or the result summary, article list and pagination
//! links (search). Every piece of user or upstream text is escaped with
//! `html-escape` before it reaches the markup.

use crate::models::{Article, SearchView};
use html_escape::{encode_double_quoted_attribute, encode_text};
use url::form_urlencoded;

const STYLESHEET: &str = "/assets/style.css";

/// Render the landing page with an empty search form.
pub fn index_page() -> String {
    layout("News Search", "", "")
}

/// Render a [`SearchView`] as a full HTML document.
pub fn search_page(view: &SearchView) -> String {
    let mut body = String::new();

    body.push_str(r#"<section class="result-count"><p>"#);
    if view.results.total_results > 0 {
        body.push_str(&format!(
            "About <strong>{}</strong> results were found. You are on page <strong>{}</strong> of <strong>{}</strong>.",
            view.results.total_results, view.current_page, view.total_pages,
        ));
    } else if !view.query.is_empty() {
        body.push_str(&format!(
            "No results found for your query: <strong>{}</strong>.",
            encode_text(&view.query),
        ));
    }
    body.push_str("</p></section>\n");

    body.push_str("<ul class=\"search-results\">\n");
    for article in &view.results.articles {
        body.push_str(&article_item(article));
    }
    body.push_str("</ul>\n");

    body.push_str(&pagination(view));

    let title = if view.query.is_empty() {
        "News Search".to_string()
    } else {
        format!("{} - News Search", view.query)
    };
    layout(&title, &view.query, &body)
}

fn article_item(article: &Article) -> String {
    let mut item = String::new();
    item.push_str(&format!(
        r#"<li class="news-article"><div><a target="_blank" rel="noreferrer noopener" href="{}"><h3 class="title">{}</h3></a>"#,
        encode_double_quoted_attribute(&article.url),
        encode_text(&article.title),
    ));
    if let Some(description) = &article.description {
        item.push_str(&format!(
            r#"<p class="description">{}</p>"#,
            encode_text(description),
        ));
    }
    item.push_str(&format!(
        r#"<div class="metadata"><p class="source">{}</p><time class="published-date">{}</time></div></div>"#,
        encode_text(&article.source.name),
        article.format_published_date(),
    ));
    if let Some(image) = &article.url_to_image {
        item.push_str(&format!(
            r#"<img class="article-image" src="{}" alt="">"#,
            encode_double_quoted_attribute(image),
        ));
    }
    item.push_str("</li>\n");
    item
}

fn pagination(view: &SearchView) -> String {
    if view.total_pages == 0 {
        return String::new();
    }
    let mut nav = String::from("<div class=\"pagination\">");
    if view.has_previous_page() {
        nav.push_str(&format!(
            r#"<a href="{}" class="button previous-page">Previous</a>"#,
            encode_double_quoted_attribute(&search_href(&view.query, view.previous_page())),
        ));
    }
    if !view.is_last_page() {
        nav.push_str(&format!(
            r#"<a href="{}" class="button next-page">Next</a>"#,
            encode_double_quoted_attribute(&search_href(&view.query, view.next_page())),
        ));
    }
    nav.push_str("</div>\n");
    nav
}

/// Link to `page` of the results for `query`.
pub fn search_href(query: &str, page: i64) -> String {
    let encoded: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .append_pair("page", &page.to_string())
        .finish();
    format!("/search?{encoded}")
}

fn layout(title: &str, query: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="{STYLESHEET}">
</head>
<body>
<main>
    <header>
        <a class="logo" href="/">News Search</a>
        <form action="/search" method="GET">
            <input autofocus class="search-input" value="{query}" placeholder="Enter a news topic" type="search" name="q">
        </form>
    </header>
    <section class="container">
{body}    </section>
</main>
</body>
</html>
"#,
        title = encode_text(title),
        query = encode_double_quoted_attribute(query),
        body = body,
    )
}

// src/parser/html.rs
// =============================================================================
// This module turns raw HTML into a document we can query.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from almost any broken markup
//
// Queries offered by Document:
// - links(): raw href values of <a> tags, in document order
// - has_interactive_form(): is there a <form> or a text <input>?
// - extract_page(): title, paragraphs, form actions
// - external_resources(): script/stylesheet/image/media references
//
// Everything here is synchronous and pure. scraper::Html is not Send, so the
// crawl engine finishes with a Document before it awaits anything.
// =============================================================================

use scraper::{Html, Selector};

use super::page::{ExternalResources, PageRecord};
use crate::error::CrawlError;

pub struct Document {
    html: Html,
}

impl Document {
    // Parses a page body
    //
    // html5ever never rejects markup, so the only body we refuse is one with
    // nothing in it.
    pub fn parse(body: &str) -> Result<Self, CrawlError> {
        if body.trim().is_empty() {
            return Err(CrawlError::Parse("document is empty".to_string()));
        }
        Ok(Self {
            html: Html::parse_document(body),
        })
    }

    pub fn links(&self) -> Result<Vec<String>, CrawlError> {
        self.attr_values("a[href]", "href")
    }

    // True if the page has a <form> or an <input type="text">
    pub fn has_interactive_form(&self) -> Result<bool, CrawlError> {
        let selector = selector(r#"form, input[type="text"]"#)?;
        Ok(self.html.select(&selector).next().is_some())
    }

    // Builds the record exported for this page
    //
    // Example:
    //   <title> Home </title><p>One</p><p>  </p><form action="/login">
    //   -> title "Home", paragraphs ["One"], form links ["/login"]
    pub fn extract_page(&self, url: &str) -> Result<PageRecord, CrawlError> {
        let extraction = |e: CrawlError| CrawlError::Extraction(e.to_string());

        let title_selector = selector("title").map_err(extraction)?;
        let title = self
            .html
            .select(&title_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let paragraph_selector = selector("p").map_err(extraction)?;
        let paragraphs = self
            .html
            .select(&paragraph_selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();

        let form_links = self.attr_values("form[action]", "action").map_err(extraction)?;

        Ok(PageRecord {
            url: url.to_string(),
            title,
            paragraphs,
            form_links,
        })
    }

    pub fn external_resources(&self) -> Result<ExternalResources, CrawlError> {
        Ok(ExternalResources {
            scripts: self.attr_values("script[src]", "src")?,
            stylesheets: self.attr_values(r#"link[rel="stylesheet"][href]"#, "href")?,
            images: self.attr_values("img[src]", "src")?,
            // a grouped selector still yields matches in document order
            media: self.attr_values("source[src], video[src], audio[src]", "src")?,
        })
    }

    fn attr_values(&self, css: &str, attr: &str) -> Result<Vec<String>, CrawlError> {
        let selector = selector(css)?;
        Ok(self
            .html
            .select(&selector)
            .filter_map(|element| element.value().attr(attr))
            .map(str::to_string)
            .collect())
    }
}

fn selector(css: &str) -> Result<Selector, CrawlError> {
    Selector::parse(css).map_err(|e| CrawlError::Parse(format!("bad selector '{}': {}", css, e)))
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does every query return Result?
//    - Selector::parse can fail, and we don't unwrap outside of tests
//    - In practice our selectors are constants, so these never fail
//
// 2. Why keep hrefs raw here?
//    - Resolving against the page URL is the frontier's job
//    - The parser only knows about markup, not about where it came from
//
// 3. text() vs inner_html()
//    - element.text() yields the text nodes under an element
//    - collect::<String>() glues them together, so <p>a <b>b</b></p> -> "a b"
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>  Example Home  </title>
            <script src="/static/app.js"></script>
            <link rel="stylesheet" href="/static/site.css">
            <link rel="icon" href="/favicon.ico">
          </head>
          <body>
            <a href="/about">About</a>
            <p>First paragraph.</p>
            <p>   </p>
            <p>Second <b>bold</b> paragraph.</p>
            <img src="https://cdn.example.com/logo.png">
            <video src="/intro.mp4"></video>
            <audio src="/theme.mp3"></audio>
            <form action="/search"><input type="text" name="q"></form>
            <a href="https://other.com">Elsewhere</a>
            <a>no href</a>
          </body>
        </html>
    "#;

    #[test]
    fn test_empty_body_is_parse_error() {
        assert!(matches!(Document::parse("  \n "), Err(CrawlError::Parse(_))));
    }

    #[test]
    fn test_links_in_document_order() {
        let doc = Document::parse(PAGE).unwrap();
        assert_eq!(doc.links().unwrap(), vec!["/about", "https://other.com"]);
    }

    #[test]
    fn test_extract_page() {
        let doc = Document::parse(PAGE).unwrap();
        let record = doc.extract_page("https://example.com/").unwrap();

        assert_eq!(record.title, "Example Home");
        assert_eq!(
            record.paragraphs,
            vec!["First paragraph.", "Second bold paragraph."]
        );
        assert_eq!(record.form_links, vec!["/search"]);
        assert_eq!(record.url, "https://example.com/");
    }

    #[test]
    fn test_missing_title_is_empty_string() {
        let doc = Document::parse("<p>Only text</p>").unwrap();
        let record = doc.extract_page("https://example.com/").unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.paragraphs, vec!["Only text"]);
        assert!(record.form_links.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = Document::parse(PAGE).unwrap().extract_page("https://example.com/").unwrap();
        let second = Document::parse(PAGE).unwrap().extract_page("https://example.com/").unwrap();
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_interactive_form_detection() {
        let doc = Document::parse(PAGE).unwrap();
        assert!(doc.has_interactive_form().unwrap());

        let lone_input = Document::parse(r#"<input type="text">"#).unwrap();
        assert!(lone_input.has_interactive_form().unwrap());

        let checkbox_only = Document::parse(r#"<input type="checkbox"><p>x</p>"#).unwrap();
        assert!(!checkbox_only.has_interactive_form().unwrap());
    }

    #[test]
    fn test_external_resources() {
        let doc = Document::parse(PAGE).unwrap();
        let resources = doc.external_resources().unwrap();

        assert_eq!(resources.scripts, vec!["/static/app.js"]);
        assert_eq!(resources.stylesheets, vec!["/static/site.css"]);
        assert_eq!(resources.images, vec!["https://cdn.example.com/logo.png"]);
        assert_eq!(resources.media, vec!["/intro.mp4", "/theme.mp3"]);
    }
}

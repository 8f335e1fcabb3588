// src/crawl/document.rs
// =============================================================================
// A parsed HTML page plus the two extractors that read from it.
//
// Each page is fetched once and parsed once; the same PageDocument is then
// handed to the image pipeline and to the link walk.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM, tolerating malformed markup
// - Supports CSS selectors for finding elements
//
// html5ever always synthesizes <html>, <head> and <body>, so "did the parse
// find anything at all" is answered by looking for any other element.
// =============================================================================

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::errors::CrawlError;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid image selector"));

// Elements html5ever inserts even when the input has no markup at all
const IMPLIED_ELEMENTS: &[&str] = &["html", "head", "body"];

pub struct PageDocument {
    url: Url,
    html: Html,
}

impl PageDocument {
    // Parses a fetched body into a queryable element tree
    //
    // Returns CrawlError::Parse when the body contains no real elements
    // (plain text, binary garbage, a bare "<html></html>")
    pub fn parse(url: &Url, body: &[u8]) -> Result<Self, CrawlError> {
        let text = String::from_utf8_lossy(body);
        let html = Html::parse_document(&text);

        let has_content = html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(|element| !IMPLIED_ELEMENTS.contains(&element.value().name()));

        if !has_content {
            return Err(CrawlError::Parse {
                url: url.to_string(),
            });
        }

        Ok(Self {
            url: url.clone(),
            html,
        })
    }

    /// The URL this document was fetched from; base for root-relative references.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw `href` values of every anchor, in document order.
    pub fn links(&self) -> impl Iterator<Item = &str> + '_ {
        self.html
            .select(&ANCHOR)
            .filter_map(|element| element.value().attr("href"))
    }

    /// Raw, non-empty `src` values of every image, in document order.
    pub fn images(&self) -> impl Iterator<Item = &str> + '_ {
        self.html
            .select(&IMAGE)
            .filter_map(|element| element.value().attr("src"))
            .filter(|src| !src.is_empty())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A static that is initialized the first time it is used
//    - The CSS selectors are parsed once per process instead of once per page
//
// 2. What does `impl Iterator<Item = &str> + '_` mean?
//    - "Some iterator of string slices that borrows from self"
//    - Nothing is collected until the caller asks for it
//    - The '_ ties the borrowed &str values to the document's lifetime
//
// 3. Why String::from_utf8_lossy?
//    - Pages are not always valid UTF-8
//    - Invalid bytes become U+FFFD instead of failing the whole page
// -----------------------------------------------------------------------------

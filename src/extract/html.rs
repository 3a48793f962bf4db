// src/extract/html.rs
// =============================================================================
// HeadingExtractor backed by the `scraper` crate.
//
// scraper parses HTML into a DOM with html5ever (so broken markup is handled
// the way browsers handle it) and lets us query it with CSS selectors.
//
// A compound selector like "h1, h2, h3, h4, h5, h6" yields matches in
// document order, which is what the hierarchy checks depend on.
//
// Note: scraper::Html is not Send. Extraction is fully synchronous and the
// document is dropped before the caller awaits anything.
// =============================================================================

use super::{ExtractedPage, HeadingExtractor, InternalLink, RawHeading};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperExtractor;

impl HeadingExtractor for ScraperExtractor {
    fn extract(&self, html: &str, page_url: &str) -> ExtractedPage {
        let document = Html::parse_document(html);

        ExtractedPage {
            title: extract_title(&document),
            headings: extract_headings(&document),
            links: extract_internal_links(&document, page_url),
        }
    }
}

// Our selectors are constants, so parsing them can't fail at runtime
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

// Text content of an element, like the DOM's textContent, trimmed
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

// Trimmed text of the first <title>, or "" when there isn't one
fn extract_title(document: &Html) -> String {
    document
        .select(&selector("title"))
        .next()
        .map(|title| element_text(&title))
        .unwrap_or_default()
}

// Headings whose trimmed text is empty are skipped entirely:
// they are treated as non-semantic markup and never counted.
fn extract_headings(document: &Html) -> Vec<RawHeading> {
    document
        .select(&selector(HEADING_SELECTOR))
        .filter_map(|element| {
            let level = heading_level(element.value().name())?;
            let text = element_text(&element);
            if text.is_empty() {
                None
            } else {
                Some(RawHeading { level, text })
            }
        })
        .collect()
}

// "h3" -> Some(3)
fn heading_level(tag: &str) -> Option<u8> {
    let digit = tag.strip_prefix('h').or_else(|| tag.strip_prefix('H'))?;
    match digit.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

// Collects <a href> links that stay on the page's host
//
// Hash-only variants of the current page ("#top", "page#section",
// "/#content", anything ending in '#') are dropped: they point at the page
// we're already analyzing.
fn extract_internal_links(document: &Html, page_url: &str) -> Vec<InternalLink> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Cannot resolve links against invalid page URL {}: {}", page_url, e);
            return Vec::new();
        }
    };

    let mut links = Vec::new();

    for element in document.select(&selector("a[href]")) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let resolved = match base.join(href.trim()) {
            Ok(url) => url,
            Err(_) => continue,
        };

        // mailto:, tel:, javascript: and friends resolve to non-http URLs
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }

        if is_hash_only_link(&base, &resolved, href) {
            continue;
        }

        if resolved.host_str() != base.host_str() {
            continue;
        }

        links.push(InternalLink {
            url: resolved.to_string(),
            anchor_text: element_text(&element),
        });
    }

    links
}

fn is_hash_only_link(base: &Url, resolved: &Url, href: &str) -> bool {
    if href.trim_end().ends_with('#') {
        return true;
    }

    let has_fragment = resolved.fragment().is_some_and(|f| !f.is_empty());
    has_fragment && (resolved.path() == base.path() || resolved.path() == "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ExtractedPage {
        ScraperExtractor.extract(html, "https://example.com/blog/post")
    }

    #[test]
    fn test_headings_in_document_order() {
        let page = extract(
            r#"<html><body>
                <h2>Second level first</h2>
                <h1>  Main title  </h1>
                <div><h3>Nested <em>deeper</em> heading</h3></div>
            </body></html>"#,
        );
        let levels: Vec<u8> = page.headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![2, 1, 3]);
        assert_eq!(page.headings[1].text, "Main title");
        assert_eq!(page.headings[2].text, "Nested deeper heading");
    }

    #[test]
    fn test_empty_headings_are_excluded() {
        let page = extract("<h1>   </h1><h2></h2><h2>Kept heading</h2><h3><img src=x></h3>");
        assert_eq!(
            page.headings,
            vec![RawHeading {
                level: 2,
                text: "Kept heading".to_string()
            }]
        );
    }

    #[test]
    fn test_title_extraction() {
        let page = extract("<html><head><title>  Rust Blog \n</title></head><body></body></html>");
        assert_eq!(page.title, "Rust Blog");

        let untitled = extract("<html><body><h1>Hi</h1></body></html>");
        assert_eq!(untitled.title, "");

        let with_icon = extract(
            "<html><head><title>Docs</title></head><body>\
             <svg><title>Search icon</title></svg></body></html>",
        );
        assert_eq!(with_icon.title, "Docs");
    }

    #[test]
    fn test_internal_links_same_host_only() {
        let page = extract(
            r#"
            <a href="/about">About us</a>
            <a href="../docs/">Docs</a>
            <a href="https://other.com/x">External</a>
            <a href="mailto:hi@example.com">Mail</a>
            <a href="https://example.com/contact"> Contact </a>
            "#,
        );
        let urls: Vec<&str> = page.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/about",
                "https://example.com/docs/",
                "https://example.com/contact",
            ]
        );
        assert_eq!(page.links[0].anchor_text, "About us");
        assert_eq!(page.links[2].anchor_text, "Contact");
    }

    #[test]
    fn test_hash_only_links_are_excluded() {
        let page = extract(
            r##"
            <a href="#comments">Comments</a>
            <a href="/blog/post#top">Top</a>
            <a href="/#content">Skip</a>
            <a href="/pricing#">Pricing</a>
            <a href="/pricing#plans">Plans</a>
            "##,
        );
        let urls: Vec<&str> = page.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/pricing#plans"]);
    }

    #[test]
    fn test_heading_level_parsing() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
    }
}

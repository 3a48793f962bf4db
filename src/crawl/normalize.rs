// src/crawl/normalize.rs
// =============================================================================
// URL normalization, so that the same page reached through different links
// is only crawled once.
//
//   HTTP://Example.com/a//b/?x=1#frag  ->  http://example.com/a/b
//
// - fragment and query are dropped
// - scheme and host are lowercased (the url crate does this while parsing)
// - runs of '/' in the path collapse to one
// - a trailing '/' is dropped, except for the root path
//
// Applying it twice gives the same result as applying it once. A string that
// doesn't parse as a URL is returned unchanged.
// =============================================================================

use url::Url;

pub fn normalize(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => normalize_url(url).to_string(),
        Err(e) => {
            log::warn!("Failed to normalize URL {}: {}", raw, e);
            raw.to_string()
        }
    }
}

fn normalize_url(mut url: Url) -> Url {
    url.set_fragment(None);
    url.set_query(None);

    // URLs like mailto: have no path segments to clean up
    if url.cannot_be_a_base() {
        return url;
    }

    let path = collapse_slashes(url.path());
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => path,
    };
    url.set_path(&path);
    url
}

fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                collapsed.push(c);
            }
            previous_slash = true;
        } else {
            collapsed.push(c);
            previous_slash = false;
        }
    }
    collapsed
}

/// Origin of a URL ("https://example.com:8080"), used as the domain key
pub fn origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Whether `candidate` lives on the same origin as `base`
pub fn is_same_origin(candidate: &str, base: &Url) -> bool {
    Url::parse(candidate)
        .map(|url| url.origin() == base.origin())
        .unwrap_or(false)
}

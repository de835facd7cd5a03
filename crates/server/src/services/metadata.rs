//! Link preview image lookup.
//!
//! Fetches a page and pulls the `og:image` (or `twitter:image`) URL out of its
//! meta tags by pattern match. There is no HTML parsing and relative URLs are
//! returned as written.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Errors that can occur while fetching link metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// No URL supplied.
    #[error("URL is required")]
    MissingUrl,

    /// Supplied URL is not an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The page could not be fetched or read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Matches one `<meta>` key in either attribute order.
struct MetaPattern {
    key_first: Regex,
    content_first: Regex,
}

impl MetaPattern {
    #[allow(clippy::expect_used)]
    fn new(key: &str) -> Self {
        let key = regex::escape(key);
        // Attribute names must follow whitespace so `data-name=` does not count.
        let key_attr = format!(r#"\s(?:property|name)\s*=\s*["']{key}["']"#);
        let content_attr = r#"\scontent\s*=\s*(?:"([^"]+)"|'([^']+)')"#;

        Self {
            key_first: Regex::new(&format!(r"(?is)<meta\b[^>]*?{key_attr}[^>]*?{content_attr}"))
                .expect("Invalid regex"),
            content_first: Regex::new(&format!(
                r"(?is)<meta\b[^>]*?{content_attr}[^>]*?{key_attr}"
            ))
            .expect("Invalid regex"),
        }
    }

    /// Content of the first matching tag in the document.
    fn find<'h>(&self, html: &'h str) -> Option<&'h str> {
        let a = self.key_first.captures(html);
        let b = self.content_first.captures(html);

        let first = match (a, b) {
            (Some(a), Some(b)) => {
                if start(&a) <= start(&b) {
                    a
                } else {
                    b
                }
            }
            (Some(c), None) | (None, Some(c)) => c,
            (None, None) => return None,
        };

        first.get(1).or_else(|| first.get(2)).map(|m| m.as_str())
    }
}

fn start(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(usize::MAX, |m| m.start())
}

static OG_IMAGE: LazyLock<MetaPattern> = LazyLock::new(|| MetaPattern::new("og:image"));
static TWITTER_IMAGE: LazyLock<MetaPattern> = LazyLock::new(|| MetaPattern::new("twitter:image"));

/// Extract the preview image URL from page markup.
///
/// `og:image` wins over `twitter:image` regardless of position.
#[must_use]
pub fn extract_image(html: &str) -> Option<String> {
    OG_IMAGE
        .find(html)
        .or_else(|| TWITTER_IMAGE.find(html))
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Validate a user-supplied page URL.
///
/// # Errors
///
/// Returns `MetadataError::MissingUrl` if the input is blank.
/// Returns `MetadataError::InvalidUrl` if it is not an absolute http(s) URL.
pub fn parse_target(raw: Option<&str>) -> Result<Url, MetadataError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(MetadataError::MissingUrl)?;

    let url = Url::parse(raw).map_err(|e| MetadataError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        scheme => Err(MetadataError::InvalidUrl(format!(
            "unsupported URL scheme or missing host: {scheme}"
        ))),
    }
}

/// Outbound client for link metadata.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: reqwest::Client,
}

impl MetadataClient {
    /// Create a new metadata client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new() -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page and return its preview image URL, if any.
    ///
    /// The response status is not inspected; error pages are scanned like
    /// any other body.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Http` if the request fails or the body cannot
    /// be read.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_image(&self, url: &Url) -> Result<Option<String>, MetadataError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let html = response.text().await?;

        let image = extract_image(&html);
        tracing::debug!(%status, found = image.is_some(), "Fetched link metadata");
        Ok(image)
    }
}

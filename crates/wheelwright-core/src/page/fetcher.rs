use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::config::AppConfig;
use crate::{Error, Result};

const MAX_PAGE_BYTES: usize = 5 * 1024 * 1024;

/// A fetched page body plus the URL it finally resolved to
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub html: String,
}

/// HTTP fetcher for page bodies
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a new page fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .user_agent(&config.fetch.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client })
    }

    /// Fetch a page, following redirects
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        tracing::info!("Fetching page: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(Error::PageFetch(format!("HTTP {} for URL: {}", status, url)));
        }

        let html = response.text().await?;
        if html.len() > MAX_PAGE_BYTES {
            return Err(Error::PageFetch(format!(
                "Page too large ({} bytes) for URL: {}",
                html.len(),
                url
            )));
        }

        Ok(FetchedPage {
            url: final_url,
            html,
        })
    }
}

/// Parse a user-supplied URL, defaulting to https:// when no scheme is given
pub fn normalize_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.contains("://") {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("https://{}", trimmed))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_hostname() {
        let url = normalize_url("example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_normalize_keeps_explicit_scheme() {
        let url = normalize_url("http://example.com/").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_url("not a url at all").is_err());
    }
}

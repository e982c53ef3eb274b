//! # sheetblog-http
//!
//! Fetches a published spreadsheet CSV export and turns it into posts.
//!
//! Every request carries a `t=<epoch millis>` query parameter so caches
//! between here and the spreadsheet never serve a stale export.

use reqwest::{Client, Url};
use sheetblog_core::{BlogError, BlogResult, Post, PostCollection, SiteConfig};
use std::time::Duration;

/// Query parameter used to defeat caching.
pub const CACHE_BUST_PARAM: &str = "t";

/// HTTP client bound to one CSV export URL.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
    url: String,
}

impl SheetClient {
    /// Constructs a client for `url` with no request timeout.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Http` if building the underlying HTTP client fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetblog_http::SheetClient;
    /// let client = SheetClient::new("https://example.com/pub?output=csv").unwrap();
    /// assert_eq!(client.url(), "https://example.com/pub?output=csv");
    /// ```
    pub fn new(url: impl Into<String>) -> BlogResult<Self> {
        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| BlogError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Constructs a client whose requests give up after `timeout_secs`.
    pub fn with_timeout(url: impl Into<String>, timeout_secs: u64) -> BlogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| BlogError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Constructs a client from site configuration.
    pub fn from_config(config: &SiteConfig) -> BlogResult<Self> {
        match config.timeout_secs {
            Some(secs) => Self::with_timeout(config.csv_url.clone(), secs),
            None => Self::new(config.csv_url.clone()),
        }
    }

    /// The export URL, without the cache-busting parameter.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw CSV text.
    ///
    /// # Errors
    ///
    /// Returns an error on an unparseable URL, a transport failure, a
    /// non-2xx status, or a body that cannot be read as text.
    pub async fn fetch_csv(&self) -> BlogResult<String> {
        let url = cache_busted_url(&self.url, chrono::Utc::now().timestamp_millis())?;
        tracing::debug!(%url, "fetching sheet export");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BlogError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlogError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| BlogError::Http(format!("Failed to read body: {e}")))
    }

    /// Fetch and parse the export into published posts.
    ///
    /// Never fails: any error is logged and yields an empty vector, which
    /// callers render as "no posts".
    pub async fn fetch_posts(&self) -> Vec<Post> {
        match self.fetch_csv().await {
            Ok(text) => {
                let posts = sheetblog_sheet::parse_document(&text);
                tracing::info!(count = posts.len(), "loaded posts from sheet");
                posts
            }
            Err(e) => {
                tracing::error!(error = %e, url = %self.url, "failed to fetch sheet data");
                Vec::new()
            }
        }
    }

    /// [`fetch_posts`](Self::fetch_posts), wrapped as a collection.
    pub async fn fetch_collection(&self) -> PostCollection {
        PostCollection::new(self.fetch_posts().await)
    }
}

/// Load posts for `config` in one call.
///
/// Also fail-soft: a client that cannot be built yields no posts.
pub async fn load_posts(config: &SiteConfig) -> Vec<Post> {
    match SheetClient::from_config(config) {
        Ok(client) => client.fetch_posts().await,
        Err(e) => {
            tracing::error!(error = %e, "failed to build sheet client");
            Vec::new()
        }
    }
}

/// Append `t=<millis>` as the last query pair of `url`.
///
/// # Errors
///
/// Returns `BlogError::InvalidUrl` if `url` is not an absolute URL.
pub fn cache_busted_url(url: &str, millis: i64) -> BlogResult<Url> {
    let mut parsed = Url::parse(url).map_err(|e| BlogError::invalid_url(url, e.to_string()))?;
    parsed
        .query_pairs_mut()
        .append_pair(CACHE_BUST_PARAM, &millis.to_string());
    Ok(parsed)
}

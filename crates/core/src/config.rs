//! Site configuration.

use crate::collection::DEFAULT_PAGE_SIZE;
use crate::error::{BlogError, BlogResult};
use serde::{Deserialize, Serialize};

/// Published CSV export of the default content sheet.
pub const DEFAULT_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRyPo15zAs0lpBImncFFCVRgQ7IdXFCdBI5DgPcdmjLWtLduIvW-bPHodS3BYlfL7pq_n0BCSB5YwCU/pub?gid=0&single=true&output=csv";

/// Default site title.
pub const DEFAULT_SITE_NAME: &str = "SheetBlog";

/// Environment variable overriding the CSV export URL.
pub const ENV_CSV_URL: &str = "SHEETBLOG_CSV_URL";
/// Environment variable overriding the site name.
pub const ENV_SITE_NAME: &str = "SHEETBLOG_SITE_NAME";
/// Environment variable overriding the list page size.
pub const ENV_PAGE_SIZE: &str = "SHEETBLOG_PAGE_SIZE";

/// Where content comes from and how it is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub csv_url: String,
    pub site_name: String,
    pub posts_per_page: usize,
    /// Per-request timeout. `None` waits for the response indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            csv_url: DEFAULT_CSV_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            posts_per_page: DEFAULT_PAGE_SIZE,
            timeout_secs: None,
        }
    }
}

impl SiteConfig {
    /// Defaults with `SHEETBLOG_*` environment overrides applied.
    pub fn from_env() -> BlogResult<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> BlogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CSV_URL) {
            self.csv_url = url;
        }
        if let Some(name) = lookup(ENV_SITE_NAME) {
            self.site_name = name;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            let size = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| BlogError::Config(format!("{ENV_PAGE_SIZE}={raw}: {e}")))?;
            self = self.with_posts_per_page(size)?;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_csv_url(mut self, url: impl Into<String>) -> Self {
        self.csv_url = url.into();
        self
    }

    #[must_use]
    pub fn with_site_name(mut self, name: impl Into<String>) -> Self {
        self.site_name = name.into();
        self
    }

    pub fn with_posts_per_page(mut self, size: usize) -> BlogResult<Self> {
        if size == 0 {
            return Err(BlogError::Config("posts per page must be positive".into()));
        }
        self.posts_per_page = size;
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

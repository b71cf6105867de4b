// src/crawl/settings.rs
// =============================================================================
// Crawl inputs and the checks we run on them before doing any work.
//
// validate() turns CrawlSettings into a CrawlPlan:
// - the API key must be present
// - the query must be non-empty
// - per_page must be non-zero (it is a divisor)
//
// Page planning is plain integer division: 100 photos at 30 per page is
// 3 pages, and the remaining 10 photos are never requested.
// =============================================================================

use thiserror::Error;
use tracing::debug;

/// Most results the search API returns for a single page
pub const API_MAX_PER_PAGE: u32 = 30;

/// Problems with the crawl inputs, raised before any network call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsplash API key is required (set UNSPLASH_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("query must be a non-empty string")]
    EmptyQuery,

    #[error("per_page must be greater than zero")]
    ZeroPageSize,
}

/// What to do when one image cannot be downloaded or written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFailurePolicy {
    /// Stop the whole crawl with the error
    #[default]
    Abort,
    /// Log it, count it and move on to the next image
    Skip,
}

/// Caller-provided crawl inputs
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub api_key: Option<String>,
    pub query: String,
    pub num_photos: u32,
    pub per_page: u32,
    pub image_failures: ImageFailurePolicy,
}

/// Validated inputs plus the number of pages to request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlPlan {
    pub api_key: String,
    pub query: String,
    pub per_page: u32,
    pub pages: u32,
}

impl CrawlSettings {
    /// Checks the inputs and computes the page count
    pub fn validate(&self) -> Result<CrawlPlan, ConfigError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(ConfigError::MissingApiKey),
        };

        if self.query.is_empty() {
            return Err(ConfigError::EmptyQuery);
        }

        let pages = plan_pages(self.num_photos, self.per_page)?;

        if self.per_page > API_MAX_PER_PAGE {
            debug!(
                per_page = self.per_page,
                max = API_MAX_PER_PAGE,
                "per_page is above the API maximum, the API may cap it"
            );
        }

        Ok(CrawlPlan {
            api_key,
            query: self.query.clone(),
            per_page: self.per_page,
            pages,
        })
    }
}

/// Number of pages to request for `num_photos` at `per_page` photos each
///
/// Rounds down: a partial last page is never requested.
pub fn plan_pages(num_photos: u32, per_page: u32) -> Result<u32, ConfigError> {
    if per_page == 0 {
        return Err(ConfigError::ZeroPageSize);
    }
    Ok(num_photos / per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(
        api_key: Option<&str>,
        query: &str,
        num_photos: u32,
        per_page: u32,
    ) -> CrawlSettings {
        CrawlSettings {
            api_key: api_key.map(str::to_string),
            query: query.to_string(),
            num_photos,
            per_page,
            image_failures: ImageFailurePolicy::default(),
        }
    }

    #[test]
    fn test_plan_pages_truncates() {
        assert_eq!(plan_pages(60, 30), Ok(2));
        assert_eq!(plan_pages(100, 30), Ok(3));
        assert_eq!(plan_pages(1000, 30), Ok(33));
        assert_eq!(plan_pages(29, 30), Ok(0));
    }

    #[test]
    fn test_plan_pages_rejects_zero_page_size() {
        assert_eq!(plan_pages(10, 0), Err(ConfigError::ZeroPageSize));
    }

    #[test]
    fn test_validate_ok() {
        let plan = settings(Some("key"), "pattern", 1000, 30).validate().unwrap();
        assert_eq!(plan.api_key, "key");
        assert_eq!(plan.query, "pattern");
        assert_eq!(plan.pages, 33);
    }

    #[test]
    fn test_missing_key_checked_first() {
        let result = settings(None, "", 10, 0).validate();
        assert_eq!(result, Err(ConfigError::MissingApiKey));

        let result = settings(Some(""), "pattern", 60, 30).validate();
        assert_eq!(result, Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_empty_query() {
        let result = settings(Some("key"), "", 60, 30).validate();
        assert_eq!(result, Err(ConfigError::EmptyQuery));
    }

    #[test]
    fn test_large_page_size_is_allowed() {
        let plan = settings(Some("key"), "pattern", 100, 50).validate().unwrap();
        assert_eq!(plan.pages, 2);
    }
}

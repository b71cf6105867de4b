// src/unsplash/models.rs
// =============================================================================
// Typed view of one page of search results.
//
// The API answers with a lot more than we need. We only read:
//   - total_pages: how many pages exist for this query
//   - results[].slug: used as the image file name
//   - results[].urls.regular: the image we download
//
// Everything is optional on our side. A page without `results` simply has
// zero records, and a record missing its slug or URL is reported by the
// crawl loop instead of failing the whole page.
// =============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;

/// One page of search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Total number of pages the API says exist for this query
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Photo records on this page, in API order
    #[serde(default)]
    pub results: Option<Vec<PhotoRecord>>,
}

/// One photo entry of a result page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoRecord {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub urls: Option<PhotoUrls>,
}

/// The renditions the API offers; we only care about "regular"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoUrls {
    #[serde(default)]
    pub regular: Option<String>,
}

impl SearchPage {
    /// Parses a raw response body
    ///
    /// Fails only when the body is not a JSON object we can read.
    pub fn from_body(body: &str) -> Result<Self> {
        serde_json::from_str(body).context("Search response is not valid JSON")
    }

    /// The photo records on this page (empty when `results` is absent)
    pub fn records(&self) -> &[PhotoRecord] {
        self.results.as_deref().unwrap_or(&[])
    }
}

impl PhotoRecord {
    /// Returns (slug, regular_url) when both are present and non-empty
    pub fn download_target(&self) -> Option<(&str, &str)> {
        let slug = self.slug.as_deref().filter(|s| !s.is_empty())?;
        let url = self
            .urls
            .as_ref()
            .and_then(|urls| urls.regular.as_deref())
            .filter(|u| !u.is_empty())?;
        Some((slug, url))
    }
}

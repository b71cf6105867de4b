// src/config.rs
// =============================================================================
// Configuration read from the environment.
//
// Variables:
// - UNSPLASH_KEY: the API access key. Optional here; a missing key is
//   reported by the crawl's own validation before any request is sent.
// - UNSPLASH_API_URL: the search endpoint (defaults to the public API).
//
// A .env file in the working directory is loaded first if present.
// This is resolved once in main and passed down; the crawl never reads
// the environment itself.
// =============================================================================

use std::env;

use anyhow::{Context, Result};
use url::Url;

use crate::unsplash::DEFAULT_SEARCH_URL;

/// Values resolved from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: Url,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("UNSPLASH_KEY").filter(|key| !key.trim().is_empty());

        let api_url = lookup("UNSPLASH_API_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());
        let api_url = Url::parse(&api_url)
            .with_context(|| format!("UNSPLASH_API_URL is not a valid URL: {}", api_url))?;

        Ok(Self { api_key, api_url })
    }
}

// src/unsplash/mod.rs
// =============================================================================
// This module talks to the Unsplash photo search API.
//
// Submodules:
// - models: The shape of a search response (total pages + photo records)
// - client: The SearchApi trait and the reqwest-backed UnsplashClient
//
// The crawl loop only ever sees the SearchApi trait, so tests can swap in
// an in-memory fake and never touch the network.
// =============================================================================

mod client;
mod models;

// Re-export public items from submodules
// This lets users write `unsplash::UnsplashClient` instead of
// `unsplash::client::UnsplashClient`
pub use client::{SearchApi, SearchOutcome, UnsplashClient, DEFAULT_SEARCH_URL};
pub use models::{PhotoRecord, SearchPage};

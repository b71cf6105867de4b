// src/crawl/mod.rs
// =============================================================================
// This module crawls search results page by page.
//
// Features:
// - Validates inputs and plans how many pages to request
// - Requests pages strictly in order, one at a time
// - Saves each page's raw JSON and every photo on it
// - Stops early when the API reports no more pages
// - Pauses between pages (fixed delay, 90 seconds by default)
//
// Submodules:
// - settings: inputs, validation, page planning
// - layout: where files go on disk
// - throttle: the pause between pages
// - report: the end-of-run tally
// - runner: the loop itself
// =============================================================================

mod layout;
mod report;
mod runner;
mod settings;
mod throttle;

// Re-export the pieces main needs
pub use layout::OutputLayout;
pub use report::CrawlReport;
pub use runner::crawl;
pub use settings::{CrawlSettings, ImageFailurePolicy};
pub use throttle::{FixedDelay, DEFAULT_PAGE_DELAY};

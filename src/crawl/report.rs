// src/crawl/report.rs
// =============================================================================
// Summary of one crawl run.
//
// The crawl writes its real output to disk; this is just the tally that
// main prints at the end (as a table, or as JSON with --json).
// =============================================================================

use serde::Serialize;

/// A page whose search request came back with a non-success status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPage {
    pub page: u32,
    pub status: u16,
}

/// Counters collected while crawling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// Pages we planned to request (num_photos / per_page)
    pub pages_planned: u32,
    /// Search requests actually sent
    pub pages_requested: u32,
    /// Pages whose JSON was written to disk
    pub pages_saved: u32,
    /// Pages skipped because of a non-success status
    pub failed_pages: Vec<FailedPage>,
    pub images_saved: u32,
    /// Images skipped (only counted with --skip-failed-images)
    pub images_failed: u32,
    /// Page index at which the API said there were no more pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhausted_at: Option<u32>,
}

impl CrawlReport {
    pub fn new(pages_planned: u32) -> Self {
        Self {
            pages_planned,
            ..Self::default()
        }
    }

    /// True when nothing was skipped along the way
    pub fn is_clean(&self) -> bool {
        self.failed_pages.is_empty() && self.images_failed == 0
    }
}

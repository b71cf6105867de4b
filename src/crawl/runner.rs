// src/crawl/runner.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Validate the inputs and compute pages = num_photos / per_page
// 2. For page 0, 1, 2, ... (one at a time, in order):
//    a. Ask the API for that page
//    b. Non-success status: log it, pause, and move on to the next page
//    c. Parse the body; if page >= total_pages, stop (no more data)
//    d. Save the raw body to json/<query>/page_<NNN>.json
//    e. Download every photo to images/<query>/<slug>.jpg
//    f. Pause before the next page
//
// Exactly one request is in flight at any time. Nothing is retried.
//
// Rust concepts:
// - &dyn Trait: the loop works with any SearchApi / Throttle implementation
// - anyhow::Context: attach "what were we doing" to errors
// - for loops over ranges with early `continue` and `break`
// =============================================================================

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use super::layout::OutputLayout;
use super::report::{CrawlReport, FailedPage};
use super::settings::{CrawlSettings, ImageFailurePolicy};
use super::throttle::Throttle;
use crate::unsplash::{PhotoRecord, SearchApi, SearchOutcome, SearchPage};

/// Crawls search results for `settings.query` and writes them to `layout`
///
/// Returns a tally of what happened. Errors are:
/// - invalid settings (a ConfigError, before anything is sent)
/// - a transport failure or unreadable body on the search call
/// - a failed image, unless settings.image_failures is Skip
pub async fn crawl(
    api: &dyn SearchApi,
    settings: &CrawlSettings,
    layout: &OutputLayout,
    throttle: &dyn Throttle,
    progress: &ProgressBar,
) -> Result<CrawlReport> {
    let plan = settings.validate()?;

    info!(
        query = %plan.query,
        pages = plan.pages,
        per_page = plan.per_page,
        root = %layout.root().display(),
        "Starting crawl"
    );

    progress.set_length(u64::from(plan.pages));
    let mut report = CrawlReport::new(plan.pages);

    for page in 0..plan.pages {
        progress.set_message(format!("page {:03}", page));
        report.pages_requested += 1;

        let body = match api.search(&plan.query, page, plan.per_page).await? {
            SearchOutcome::Success { body } => body,
            SearchOutcome::Failed { status } => {
                warn!(page, status, "Search request failed, skipping page");
                report.failed_pages.push(FailedPage { page, status });
                progress.inc(1);
                throttle.pause().await;
                continue;
            }
        };

        let results = SearchPage::from_body(&body)
            .with_context(|| format!("Failed to parse search response for page {}", page))?;

        match results.total_pages {
            Some(total_pages) if page >= total_pages => {
                info!(page, total_pages, "No more pages");
                report.exhausted_at = Some(page);
                break;
            }
            Some(_) => {}
            None => warn!(
                page,
                "Search response has no total_pages, cannot detect the last page"
            ),
        }

        let json_path = layout.write_page(&plan.query, page, &body).await?;
        report.pages_saved += 1;
        debug!(page, path = %json_path.display(), "Saved page");

        for record in results.records() {
            match save_image(api, layout, &plan.query, record).await {
                Ok(path) => {
                    report.images_saved += 1;
                    debug!(path = %path.display(), "Saved image");
                }
                Err(e) => match settings.image_failures {
                    ImageFailurePolicy::Abort => {
                        return Err(e.context(format!("Image download failed on page {}", page)));
                    }
                    ImageFailurePolicy::Skip => {
                        report.images_failed += 1;
                        warn!(page, error = %format!("{:#}", e), "Skipping image");
                    }
                },
            }
        }

        progress.inc(1);
        throttle.pause().await;
    }

    info!(
        pages_saved = report.pages_saved,
        images_saved = report.images_saved,
        "Crawl finished"
    );

    Ok(report)
}

// Downloads one record's "regular" image and writes it under its slug
async fn save_image(
    api: &dyn SearchApi,
    layout: &OutputLayout,
    query: &str,
    record: &PhotoRecord,
) -> Result<PathBuf> {
    let (slug, url) = record
        .download_target()
        .ok_or_else(|| anyhow!("Photo record is missing its slug or regular URL"))?;

    // Refuse unsafe slugs before spending a request on them
    layout.image_path(query, slug)?;

    let bytes = api.fetch_image(url).await?;
    layout.write_image(query, slug, &bytes).await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `continue` for a failed page but `break` for the last page?
//    - continue: skip the rest of this iteration, try the next page
//    - break: leave the loop entirely, there is nothing left to fetch
//    - A failed page still pauses before `continue`; a rate-limited key
//      would otherwise fire every remaining page back to back
//
// 2. Why `&dyn SearchApi` instead of a concrete client?
//    - dyn Trait means "any type that implements this trait"
//    - Real runs pass UnsplashClient, tests pass an in-memory fake
//
// 3. What is e.context(...)?
//    - Wraps an error with an extra message while keeping the original
//    - Printing with {:#} shows the whole chain on one line
// -----------------------------------------------------------------------------

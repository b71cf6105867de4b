// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option has a default, so running `photo-harvest` with just
// UNSPLASH_KEY set crawls 1000 "pattern" photos, 30 per page, waiting
// 90 seconds between pages.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate the argument parser
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::crawl::DEFAULT_PAGE_DELAY;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "photo-harvest",
    version,
    about = "Collect an image dataset from the Unsplash photo search API",
    long_about = "photo-harvest pages through Unsplash search results for a query, saving every \
                  raw JSON page under <data-dir>/json/<query>/ and every photo under \
                  <data-dir>/images/<query>/. It waits between pages to stay inside the API's \
                  rate limit."
)]
pub struct Cli {
    /// Search term (also used as the output directory name)
    #[arg(short, long, default_value = "pattern")]
    pub query: String,

    /// Upper bound on photos to collect
    ///
    /// Pages requested = num_photos / per_page, rounded down.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub num_photos: u32,

    /// Photos per page (the API caps this at 30)
    #[arg(short, long, default_value_t = 30)]
    pub per_page: u32,

    /// Unsplash access key (falls back to UNSPLASH_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Seconds to wait after each saved page
    #[arg(long, default_value_t = DEFAULT_PAGE_DELAY.as_secs())]
    pub delay_secs: u64,

    /// Timeout in seconds for every HTTP request
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Root directory for json/ and images/
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Keep going when a single image fails to download or save
    ///
    /// Without this flag the first failed image stops the crawl.
    #[arg(long)]
    pub skip_failed_images: bool,

    /// Print the final report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

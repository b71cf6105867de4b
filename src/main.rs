// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls the level)
// 2. Parse command-line arguments and read the environment
// 3. Validate the crawl inputs before touching the network
// 4. Run the crawl with a progress bar over the pages
// 5. Print the report and exit with the proper code
//    (0 = clean run, 1 = pages or images were skipped, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - environment configuration
mod crawl; // src/crawl/ - the page-by-page crawl loop
mod unsplash; // src/unsplash/ - search API client

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;
use crawl::{CrawlReport, CrawlSettings, FixedDelay, ImageFailurePolicy, OutputLayout};
use unsplash::UnsplashClient;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays parseable
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,photo_harvest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns:
//   Ok(0) = every planned page was fetched (or the API ran out) with no skips
//   Ok(1) = some pages or images were skipped
//   Err = configuration error, network failure, or an aborted image
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let settings = CrawlSettings {
        api_key: cli.api_key.clone().or_else(|| config.api_key.clone()),
        query: cli.query.clone(),
        num_photos: cli.num_photos,
        per_page: cli.per_page,
        image_failures: if cli.skip_failed_images {
            ImageFailurePolicy::Skip
        } else {
            ImageFailurePolicy::Abort
        },
    };

    // Fail fast: nothing below runs without a key and sane inputs
    let plan = settings.validate()?;

    let client = UnsplashClient::new(
        config.api_url.clone(),
        plan.api_key.clone(),
        Duration::from_secs(cli.timeout_secs),
    )?;
    let layout = OutputLayout::new(&cli.data_dir);
    let throttle = FixedDelay::new(Duration::from_secs(cli.delay_secs));

    info!(
        endpoint = %config.api_url,
        delay_secs = throttle.delay().as_secs(),
        "Crawling {} page(s) of \"{}\"",
        plan.pages,
        plan.query
    );

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        create_progress_bar(u64::from(plan.pages))?
    };

    let result = crawl::crawl(&client, &settings, &layout, &throttle, &progress).await;
    progress.finish_and_clear();
    let report = result?;

    print_report(&report, &layout, &plan.query, cli.json)?;

    if report.is_clean() {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Create a progress bar over the planned pages
fn create_progress_bar(total: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg} ({elapsed})")
            .context("Invalid progress bar template")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

// Prints the report either as a summary or JSON
fn print_report(
    report: &CrawlReport,
    layout: &OutputLayout,
    query: &str,
    json: bool,
) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
        return Ok(());
    }

    println!("📊 Summary for \"{}\":", query);
    println!("   📄 Pages saved: {}/{}", report.pages_saved, report.pages_planned);
    println!("   🖼️  Images saved: {}", report.images_saved);

    if let Some(page) = report.exhausted_at {
        println!("   🏁 API ran out of pages at page {}", page);
    }

    if !report.failed_pages.is_empty() {
        println!("   ❌ Skipped pages:");
        for failed in &report.failed_pages {
            println!("      page {:03}: HTTP {}", failed.page, failed.status);
        }
    }

    if report.images_failed > 0 {
        println!("   ⚠️  Images skipped: {}", report.images_failed);
    }

    println!("   📁 JSON:   {}", layout.json_dir(query).display());
    println!("   📁 Images: {}", layout.image_dir(query).display());

    Ok(())
}

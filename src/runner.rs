use crate::api::{HttpGet, PokeApiClient};
use crate::config::Settings;
use crate::error::RunError;
use crate::extract::{self, ItemFailure};
use crate::report::Reporter;
use crate::transform;
use chrono::{DateTime, Local};
use log::{debug, info};

/// What a completed run did
#[derive(Debug)]
pub struct RunSummary {
    pub listed: usize,
    pub extracted: usize,
    pub failures: Vec<ItemFailure>,
    pub types: usize,
    pub reports_complete: bool,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
}

/// Run extraction, transformation and reporting once
///
/// The output directory is cleared just before the exports. Only a failed
/// listing fetch or a failed reset aborts the run; item and export failures
/// are recorded and reflected in the summary.
pub fn run<H: HttpGet>(
    settings: &Settings,
    client: &PokeApiClient<H>,
    reporter: &Reporter,
) -> Result<RunSummary, RunError> {
    let started = Local::now();
    info!("Starting run against {} at {}", client.base_url(), started.format("%Y-%m-%d %H:%M:%S"));

    // Step 1: listing, then one detail request per entry
    let listing = client
        .fetch_listing_pages(settings.limit, settings.offset, settings.page_size)
        .map_err(RunError::Listing)?;
    info!("Listing returned {} entries", listing.len());
    let extraction = extract::build_table(client, &listing);

    // Step 2: derived tables
    let extracted = extraction.rows.len();
    let output = transform::run_pipeline(extraction.rows, settings.top_n);
    debug!("Categorized table: {:?}", output.categorized);

    // Step 3: artifacts into a freshly cleared directory
    reporter.reset().map_err(RunError::Reset)?;
    let reports_complete = reporter.generate_all_reports(&output.type_counts, &output.top, &output.type_stats);

    Ok(RunSummary {
        listed: listing.len(),
        extracted,
        failures: extraction.failures,
        types: output.type_counts.len(),
        reports_complete,
        started,
        finished: Local::now(),
    })
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;

mod api;
mod cli;
mod config;
mod error;
mod extract;
mod report;
mod runner;
mod transform;
mod types;
mod ui;

use api::{PokeApiClient, UreqTransport};
use config::Settings;
use report::Reporter;
use runner::RunSummary;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Resolve settings (validates arguments)
    let settings = match Settings::from_args(&args) {
        Ok(s) => s,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let client = PokeApiClient::new(UreqTransport::new(), &settings.base_url);
    let reporter = Reporter::new(&settings.output_dir, settings.chart_font.clone());

    ui::status(&format!(
        "Fetching {} entries from {} (offset {})",
        settings.limit, settings.base_url, settings.offset
    ));

    let summary = match runner::run(&settings, &client, &reporter) {
        Ok(summary) => summary,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    print_summary(&summary, &reporter);

    let exit_code = if summary.reports_complete { 0 } else { 2 };
    std::process::exit(exit_code);
}

/// Print what the run extracted and where the reports went
fn print_summary(summary: &RunSummary, reporter: &Reporter) {
    ui::status(&format!(
        "Extracted {} of {} listed entries ({} distinct types)",
        summary.extracted, summary.listed, summary.types
    ));

    if !summary.failures.is_empty() {
        ui::status(&format!("Skipped {} entries:", summary.failures.len()));
        for failure in &summary.failures {
            println!("  {} ({}): {}", failure.name, failure.url, failure.error);
        }
    }

    let elapsed = summary.finished - summary.started;
    ui::status_outcome(
        &format!(
            "Reports in {} (finished {}, {:.1}s):",
            reporter.output_dir().display(),
            summary.finished.format("%Y-%m-%d %H:%M:%S"),
            elapsed.num_milliseconds() as f64 / 1000.0
        ),
        if summary.reports_complete { "complete" } else { "incomplete" },
        summary.reports_complete,
    );
}

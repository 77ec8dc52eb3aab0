//! The `Reporter`: owner of one output directory for the length of a run.

use super::chart::{ChartRenderer, PlottersChart};
use super::output_dir::{self, OutputCheck};
use super::{CHART_FILE, TOP_CSV_FILE, TYPE_STATS_CSV_FILE, export};
use crate::error::ReportError;
use crate::types::{CategorizedRow, TypeCount, TypeStats};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the run's artifacts into a single output directory
///
/// Construction touches nothing on disk; call `reset` to clear the directory
/// before exporting. Export failures are logged and never abort the next
/// export.
pub struct Reporter {
    output_dir: PathBuf,
    chart: Box<dyn ChartRenderer>,
}

impl Reporter {
    /// Reporter using the plotters PNG renderer
    pub fn new(output_dir: impl Into<PathBuf>, font: Option<PathBuf>) -> Self {
        Self::with_renderer(output_dir, Box::new(PlottersChart::new(font)))
    }

    pub fn with_renderer(output_dir: impl Into<PathBuf>, chart: Box<dyn ChartRenderer>) -> Self {
        Reporter { output_dir: output_dir.into(), chart }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Delete every file currently in the output directory (non-recursive)
    ///
    /// Does nothing if the directory does not exist yet.
    pub fn reset(&self) -> Result<usize, ReportError> {
        let removed = output_dir::clear_files(&self.output_dir)?;
        info!("Cleared {} files from {}", removed, self.output_dir.display());
        Ok(removed)
    }

    fn artifact_path(&self, name: &str) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::io(&self.output_dir, e))?;
        Ok(self.output_dir.join(name))
    }

    /// Render the type distribution chart; returns the written path, or `None` after logging the failure
    pub fn export_type_distribution_chart(&self, counts: &[TypeCount]) -> Option<PathBuf> {
        info!("Building type distribution chart");
        let result = self.artifact_path(CHART_FILE).and_then(|path| match self.chart.render(counts, &path) {
            Ok(()) => Ok(path),
            Err(message) => Err(ReportError::Chart { path, message }),
        });
        log_export("chart", result)
    }

    /// Write the top-N table as CSV; returns the written path, or `None` after logging the failure
    pub fn export_top_csv(&self, top: &[CategorizedRow]) -> Option<PathBuf> {
        info!("Exporting top {} to CSV", top.len());
        let result = self
            .artifact_path(TOP_CSV_FILE)
            .and_then(|path| export::write_top_csv(&path, top).map(|_| path));
        log_export("top table", result)
    }

    /// Write the per-type statistics as CSV; returns the written path, or `None` after logging the failure
    pub fn export_type_stats_csv(&self, stats: &[TypeStats]) -> Option<PathBuf> {
        info!("Exporting type statistics to CSV");
        let result = self
            .artifact_path(TYPE_STATS_CSV_FILE)
            .and_then(|path| export::write_type_stats_csv(&path, stats).map(|_| path));
        log_export("type statistics", result)
    }

    /// Compare the directory contents with the expected artifact set
    pub fn inspect_output_directory(&self) -> Result<OutputCheck, ReportError> {
        output_dir::inspect(&self.output_dir)
    }

    /// True iff the output directory holds exactly the expected artifacts
    pub fn validate_output_directory(&self) -> bool {
        let check = match self.inspect_output_directory() {
            Ok(check) => check,
            Err(e) => {
                error!("Cannot read output directory: {}", e);
                return false;
            }
        };

        for name in &check.missing {
            error!("Report {} not found", name);
        }
        for name in &check.unexpected {
            warn!("Unexpected file {} in output directory", name);
        }
        check.is_complete()
    }

    /// Run every export, then validate the directory
    pub fn generate_all_reports(&self, counts: &[TypeCount], top: &[CategorizedRow], stats: &[TypeStats]) -> bool {
        info!("Generating all reports in {}", self.output_dir.display());
        self.export_type_distribution_chart(counts);
        self.export_top_csv(top);
        self.export_type_stats_csv(stats);

        if !self.validate_output_directory() {
            error!("Output directory validation failed");
            return false;
        }
        info!("All reports generated successfully");
        true
    }
}

fn log_export(what: &str, result: Result<PathBuf, ReportError>) -> Option<PathBuf> {
    match result {
        Ok(path) => {
            info!("Saved {} to {}", what, path.display());
            Some(path)
        }
        Err(e) => {
            error!("Failed to export {}: {}", what, e);
            None
        }
    }
}

#[cfg(test)]
#[path = "reporter_test.rs"]
mod reporter_test;

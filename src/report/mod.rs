//! Report generation module - artifacts written to the output directory.
//!
//! This module handles:
//! - Clearing the output directory before a run (explicit `reset`)
//! - Rendering the type distribution chart
//! - Exporting the top-N and type statistics tables as CSV
//! - Checking that exactly the expected artifacts are present afterwards
//!
//! # Module Organization
//!
//! - `reporter` - The `Reporter` that owns one output directory
//! - `output_dir` - Directory reset and inspection
//! - `chart` - `ChartRenderer` seam and the plotters bitmap renderer
//! - `export` - CSV writers

mod chart;
mod export;
mod output_dir;
mod reporter;

/// File name of the type distribution chart
pub const CHART_FILE: &str = "graph_pokemon_by_type.png";

/// File name of the top-N table
pub const TOP_CSV_FILE: &str = "top_5_pokemon.csv";

/// File name of the per-type statistics table
pub const TYPE_STATS_CSV_FILE: &str = "type_statistics.csv";

/// Every artifact a complete run leaves behind
pub const EXPECTED_ARTIFACTS: [&str; 3] = [CHART_FILE, TOP_CSV_FILE, TYPE_STATS_CSV_FILE];

pub use chart::ChartRenderer;
pub use reporter::Reporter;

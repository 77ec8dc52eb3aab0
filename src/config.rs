/// Configuration resolution module
///
/// This module handles:
/// - Turning validated CLI arguments (with their env fallbacks) into `Settings`
/// - Normalizing the base URL
///
/// The run only ever sees the immutable `Settings` value.
use crate::cli::CliArgs;
use log::debug;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub limit: u32,
    pub offset: u32,
    pub page_size: u32,
    pub top_n: usize,
    pub chart_font: Option<PathBuf>,
}

impl Settings {
    /// Build settings from CLI arguments
    pub fn from_args(args: &CliArgs) -> Result<Settings, String> {
        args.validate()?;

        let base_url = args.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(format!("base URL '{}' must start with http:// or https://", args.base_url));
        }

        let settings = Settings {
            base_url,
            output_dir: args.output_dir.clone(),
            limit: args.limit,
            offset: args.offset,
            page_size: args.page_size,
            top_n: args.top,
            chart_font: args.chart_font.clone(),
        };
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::transform::DEFAULT_TOP_N;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Parser, Debug, Clone)]
#[command(name = "pokedex-report")]
#[command(about = "Fetch Pokémon from PokeAPI, summarize them by type, and write a chart plus CSV reports")]
#[command(version)]
pub struct CliArgs {
    /// Base URL of the API (no trailing /pokemon)
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory the reports are written to; its files are removed at the start of a run
    #[arg(long, short = 'o', env = "POKEAPI_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Number of listing entries to process
    #[arg(long, default_value = "100")]
    pub limit: u32,

    /// Listing offset to start from
    #[arg(long, default_value = "0")]
    pub offset: u32,

    /// Listing entries requested per page
    #[arg(long, default_value = "100")]
    pub page_size: u32,

    /// Number of entries in the top table (the file is still named top_5_pokemon.csv)
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// TTF/OTF font used for chart text (default: search common system locations)
    #[arg(long, value_name = "PATH")]
    pub chart_font: Option<PathBuf>,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("--base-url must not be empty".to_string());
        }
        if self.limit == 0 {
            return Err("--limit must be at least 1".to_string());
        }
        if self.page_size == 0 {
            return Err("--page-size must be at least 1".to_string());
        }
        if self.top == 0 {
            return Err("--top must be at least 1".to_string());
        }
        if let Some(ref font) = self.chart_font
            && !font.is_file()
        {
            return Err(format!("--chart-font {} is not a file", font.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            limit: 100,
            offset: 0,
            page_size: 100,
            top: 5,
            chart_font: None,
        }
    }

    #[test]
    fn test_defaults_parse() {
        let parsed = CliArgs::try_parse_from(["pokedex-report"]).unwrap();
        assert_eq!(parsed.limit, 100);
        assert_eq!(parsed.offset, 0);
        assert_eq!(parsed.page_size, 100);
        assert_eq!(parsed.top, 5);
        assert!(parsed.chart_font.is_none());
    }

    #[test]
    fn test_flags_parse() {
        let parsed = CliArgs::try_parse_from([
            "pokedex-report",
            "--base-url",
            "http://localhost:8000/api/v2",
            "-o",
            "reports",
            "--limit",
            "20",
            "--offset",
            "40",
            "--top",
            "3",
        ])
        .unwrap();
        assert_eq!(parsed.base_url, "http://localhost:8000/api/v2");
        assert_eq!(parsed.output_dir, PathBuf::from("reports"));
        assert_eq!((parsed.limit, parsed.offset, parsed.top), (20, 40, 3));
    }

    #[test]
    fn test_top_help_names_the_fixed_file() {
        use clap::CommandFactory;
        let command = CliArgs::command();
        let top = command.get_arguments().find(|a| a.get_id() == "top").unwrap();
        let help = top.get_help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains(crate::report::TOP_CSV_FILE), "help was: {}", help);
    }

    #[test]
    fn test_validate_valid_config_succeeds() {
        assert!(args().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut a = args();
        a.limit = 0;
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size_and_top() {
        let mut a = args();
        a.page_size = 0;
        assert!(a.validate().is_err());

        let mut a = args();
        a.top = 0;
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_base_url() {
        let mut a = args();
        a.base_url = "  ".to_string();
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_font() {
        let mut a = args();
        a.chart_font = Some(PathBuf::from("/definitely/not/a/font.ttf"));
        assert!(a.validate().is_err());
    }
}

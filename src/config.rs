//! Configuration
//!
//! Command line options, with environment variable fallbacks and an optional
//! `.env` file.

use std::path::PathBuf;

use clap::{Args, Parser};
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{
    predicates::{PriceBound, current_year},
    products::DEFAULT_MANUFACTURE_YEAR,
    report::currency_from_code,
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Appliance inventory report configuration
#[derive(Debug, Parser)]
#[command(name = "applistock", about = "Appliance inventory discount report", long_about = None)]
pub struct Config {
    /// Inventory fixture (YAML); the bundled showroom is used when omitted
    #[arg(short, long, env = "APPLISTOCK_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Year the inventory prices its stock in [default: current year]
    #[arg(short, long, env = "APPLISTOCK_REFERENCE_YEAR")]
    pub reference_year: Option<i32>,

    /// Year the price predicate evaluates prices in [default: current year]
    #[arg(long, env = "APPLISTOCK_PREDICATE_YEAR")]
    pub predicate_year: Option<i32>,

    /// Year product ages are described as of in change events
    #[arg(long, env = "APPLISTOCK_DISPLAY_YEAR", default_value_t = DEFAULT_MANUFACTURE_YEAR)]
    pub display_year: i32,

    /// Price predicate used to count products
    #[arg(short, long, value_enum, default_value_t = PriceBound::Below)]
    pub predicate: PriceBound,

    /// Threshold price for the predicate
    #[arg(short, long, default_value = "300")]
    pub threshold: Decimal,

    /// Currency amounts are rendered in (GBP, USD, EUR, PLN)
    #[arg(
        short,
        long,
        env = "APPLISTOCK_CURRENCY",
        default_value = "PLN",
        value_parser = currency_from_code
    )]
    pub currency: &'static Currency,

    /// Exit straight after printing the report instead of waiting for Enter
    #[arg(long)]
    pub no_wait: bool,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Reference year, falling back to the current calendar year.
    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(current_year)
    }

    /// Predicate evaluation year, falling back to the current calendar year.
    pub fn predicate_year(&self) -> i32 {
        self.predicate_year.unwrap_or_else(current_year)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, PLN};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_match_the_showroom_run() -> TestResult {
        let config = Config::try_parse_from(["applistock"])?;

        assert_eq!(config.fixture, None);
        assert_eq!(config.display_year, 2022);
        assert_eq!(config.predicate, PriceBound::Below);
        assert_eq!(config.threshold, Decimal::from(300));
        assert_eq!(config.currency, PLN);
        assert!(!config.no_wait);

        Ok(())
    }

    #[test]
    fn years_fall_back_to_current_year() -> TestResult {
        let config = Config::try_parse_from(["applistock"])?;

        assert_eq!(config.reference_year(), current_year());
        assert_eq!(config.predicate_year(), current_year());

        Ok(())
    }

    #[test]
    fn explicit_options_are_parsed() -> TestResult {
        let config = Config::try_parse_from([
            "applistock",
            "--fixture",
            "fixtures/showroom.yml",
            "--reference-year",
            "2027",
            "--predicate-year",
            "2030",
            "--predicate",
            "above",
            "--threshold",
            "249.99",
            "--currency",
            "gbp",
            "--no-wait",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.fixture, Some(PathBuf::from("fixtures/showroom.yml")));
        assert_eq!(config.reference_year(), 2027);
        assert_eq!(config.predicate_year(), 2030);
        assert_eq!(config.predicate, PriceBound::Above);
        assert_eq!(config.threshold, Decimal::new(24_999, 2));
        assert_eq!(config.currency, GBP);
        assert!(config.no_wait);
        assert_eq!(config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = Config::try_parse_from(["applistock", "--currency", "XYZ"]);

        assert!(result.is_err());
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let result = Config::try_parse_from(["applistock", "--threshold", "cheap"]);

        assert!(result.is_err());
    }
}

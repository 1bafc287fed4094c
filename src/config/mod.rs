pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, validate_range,
    validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cafe-dashboard")]
#[command(about = "Aggregates cafe order data into daily, weekly and monthly dashboards")]
pub struct CliConfig {
    #[arg(long, help = "Anchor date in YYYY-MM-DD format, defaults to today")]
    pub date: Option<String>,

    #[arg(long, default_value = "day", help = "Aggregation granularity: day, week or month")]
    pub granularity: String,

    #[arg(long, default_value = "http://localhost:8080/api/orders")]
    pub source_endpoint: String,

    #[arg(long, help = "Read orders from a local JSON file instead of the API")]
    pub orders_file: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Abort aggregation after this many seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Also write a ZIP bundle with CSV extracts")]
    pub bundle: bool,

    #[arg(long, help = "Resolve the date window and exit without fetching")]
    pub dry_run: bool,

    #[arg(long, help = "Enable resource monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_endpoint(&self) -> &str {
        &self.source_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("granularity", &self.granularity)?;

        // 離線模式讀本地 JSON,否則走 API
        match &self.orders_file {
            Some(file) => {
                validate_file_extensions("orders_file", std::slice::from_ref(file), &["json"])?;
            }
            None => {
                validate_url("source_endpoint", &self.source_endpoint)?;
            }
        }

        validate_path("output_path", &self.output_path)?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 600)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::try_parse_from(["cafe-dashboard"]).unwrap();

        assert_eq!(config.granularity, "day");
        assert_eq!(config.output_path, "./output");
        assert!(config.date.is_none());
        assert!(config.orders_file.is_none());
        assert!(!config.bundle);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_full_arguments() {
        let config = CliConfig::try_parse_from([
            "cafe-dashboard",
            "--date",
            "2024-03-15",
            "--granularity",
            "week",
            "--source-endpoint",
            "https://api.example.com/orders",
            "--output-path",
            "./reports",
            "--timeout-seconds",
            "30",
            "--bundle",
            "--monitor",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(config.date.as_deref(), Some("2024-03-15"));
        assert_eq!(config.granularity, "week");
        assert_eq!(config.source_endpoint(), "https://api.example.com/orders");
        assert_eq!(config.timeout_seconds(), Some(30));
        assert!(config.bundle);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_invalid_endpoint() {
        let config =
            CliConfig::try_parse_from(["cafe-dashboard", "--source-endpoint", "not-a-url"])
                .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_orders_file_must_be_json() {
        let config =
            CliConfig::try_parse_from(["cafe-dashboard", "--orders-file", "./orders.json"])
                .unwrap();
        assert!(config.validate().is_ok());

        let config =
            CliConfig::try_parse_from(["cafe-dashboard", "--orders-file", "./orders.csv"])
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_timeout_range() {
        let config =
            CliConfig::try_parse_from(["cafe-dashboard", "--timeout-seconds", "0"]).unwrap();
        assert!(config.validate().is_err());

        let config =
            CliConfig::try_parse_from(["cafe-dashboard", "--timeout-seconds", "601"]).unwrap();
        assert!(config.validate().is_err());
    }
}

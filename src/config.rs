use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SalesError};
use crate::pipeline::processing::PricingConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log file
    pub directory: PathBuf,
    /// Write JSON logs to `directory` in addition to the console
    pub file_output: bool,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_output: false,
            default_filter: "sales_processor=info".to_string(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            SalesError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config = Self::from_toml(&config_content)?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.pricing.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pricing.tax_rate("CA"), dec!(1.13));
    }

    #[test]
    fn test_tax_table_replaces_builtin_rates() {
        let config = Config::from_toml(
            r#"
            [pricing]
            bulk_discount_threshold = 50

            [pricing.tax_rates]
            EU = 1.25
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.bulk_discount_threshold, 50);
        assert_eq!(config.pricing.bulk_discount_rate, dec!(0.90));
        assert_eq!(config.pricing.tax_rate("EU"), dec!(1.25));
        assert_eq!(config.pricing.tax_rate("UK"), dec!(1));
        assert_eq!(config.pricing.default_region, "US");
    }

    #[test]
    fn test_invalid_rate_is_config_error() {
        let err = Config::from_toml("[pricing]\nbulk_discount_rate = 0\n").unwrap_err();
        assert!(matches!(err, SalesError::Config(_)));
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nfile_output = true\ndirectory = \"out/logs\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.logging.file_output);
        assert_eq!(config.logging.directory, PathBuf::from("out/logs"));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load("no/such/config.toml").unwrap_err();
        assert!(err.to_string().contains("no/such/config.toml"));
    }
}

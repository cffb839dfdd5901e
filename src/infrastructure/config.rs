use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::invoice::{CurrencySelection, InvoiceDefaults, ValueObjectError};

fn default_number_prefix() -> String {
  "INV-".to_string()
}

fn default_payment_days() -> u32 {
  30
}

fn default_currency() -> String {
  "USD".to_string()
}

fn default_output_dir() -> String {
  ".".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub invoice: InvoiceConfig,
  #[serde(default)]
  pub pdf: PdfConfig,
}

/// Defaults for a freshly started invoice
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceConfig {
  #[serde(default = "default_number_prefix")]
  pub number_prefix: String,
  #[serde(default = "default_payment_days")]
  pub payment_days: u32,
  /// Registry code, or `custom`
  #[serde(default = "default_currency")]
  pub default_currency: String,
}

impl Default for InvoiceConfig {
  fn default() -> Self {
    Self {
      number_prefix: default_number_prefix(),
      payment_days: default_payment_days(),
      default_currency: default_currency(),
    }
  }
}

impl InvoiceConfig {
  pub fn defaults(&self) -> Result<InvoiceDefaults, ValueObjectError> {
    Ok(InvoiceDefaults {
      number_prefix: self.number_prefix.clone(),
      payment_days: self.payment_days,
      currency: CurrencySelection::from_str(&self.default_currency)?,
    })
  }
}

/// PDF export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
  #[serde(default = "default_output_dir")]
  pub output_dir: String,
  pub wkhtmltopdf_path: Option<String>,
}

impl Default for PdfConfig {
  fn default() -> Self {
    Self {
      output_dir: default_output_dir(),
      wkhtmltopdf_path: None,
    }
  }
}

impl PdfConfig {
  pub fn output_dir(&self) -> PathBuf {
    PathBuf::from(&self.output_dir)
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with INVOICER_ prefix
  ///
  /// # Environment Variables
  ///
  /// Sections and keys are separated by double underscores:
  /// - `INVOICER_INVOICE__NUMBER_PREFIX=ACME-`
  /// - `INVOICER_INVOICE__PAYMENT_DAYS=14`
  /// - `INVOICER_INVOICE__DEFAULT_CURRENCY=EUR`
  /// - `INVOICER_PDF__OUTPUT_DIR=./exports`
  /// - `INVOICER_PDF__WKHTMLTOPDF_PATH=/usr/local/bin/wkhtmltopdf`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("INVOICER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

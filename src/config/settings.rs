//! User settings for BudgetLens
//!
//! Display preferences and the thresholds the reports are run with. Every
//! field has a serde default so older or hand-edited files keep loading.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::LensPaths;
use crate::error::LensError;
use crate::reports::{BalanceConvention, MonthlyStatusClassifier, DEFAULT_WARNING_THRESHOLD};

/// User settings for BudgetLens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Which sign the summary headline uses
    #[serde(default)]
    pub balance_convention: BalanceConvention,

    /// Combined percentage at which a calendar month turns to warning
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_warning_threshold() -> f64 {
    DEFAULT_WARNING_THRESHOLD
}

/// Reject strftime patterns chrono cannot render
pub fn validate_date_format(format: &str) -> Result<(), LensError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LensError::Validation(format!(
            "Invalid date format '{}': use strftime specifiers such as %Y-%m-%d",
            format
        )));
    }
    Ok(())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            balance_convention: BalanceConvention::default(),
            warning_threshold: default_warning_threshold(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &LensPaths) -> Result<Self, LensError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LensError::Io(format!("Failed to read settings file: {}", e)))?;

            let mut settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| LensError::Config(format!("Failed to parse settings file: {}", e)))?;

            if let Err(e) = validate_date_format(&settings.date_format) {
                tracing::warn!(error = %e, "ignoring date_format from settings file");
                settings.date_format = default_date_format();
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LensPaths) -> Result<(), LensError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LensError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LensError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Month classifier configured with this warning threshold
    pub fn classifier(&self) -> MonthlyStatusClassifier {
        MonthlyStatusClassifier::new(self.warning_threshold)
    }

    /// Set one setting by its file key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LensError> {
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                validate_date_format(value)?;
                self.date_format = value.to_string();
            }
            "balance_convention" => {
                self.balance_convention = match value {
                    "net_spend" => BalanceConvention::NetSpend,
                    "surplus" => BalanceConvention::Surplus,
                    other => {
                        return Err(LensError::Validation(format!(
                            "Unknown balance convention '{}': use net_spend or surplus",
                            other
                        )))
                    }
                }
            }
            "warning_threshold" => {
                let threshold: f64 = value.parse().map_err(|_| {
                    LensError::Validation(format!("Warning threshold must be a number, got '{}'", value))
                })?;
                if !(0.0..=100.0).contains(&threshold) {
                    return Err(LensError::Validation(
                        "Warning threshold must be between 0 and 100".into(),
                    ));
                }
                self.warning_threshold = threshold;
            }
            other => {
                return Err(LensError::Config(format!("Unknown setting '{}'", other)));
            }
        }
        Ok(())
    }
}

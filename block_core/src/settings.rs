//! # Estimator Settings
//!
//! Defaults applied when the caller does not give a value: the currency
//! symbol used for display, the wastage allowance and the nominal block
//! size. Settings serialize to a small JSON file (see [`crate::file_io`]).
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "currency_symbol": "₦",
//!   "default_wastage_percent": 5,
//!   "default_block_length_m": 0.45,
//!   "default_block_height_m": 0.225
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::block_wall::{DEFAULT_WASTAGE_PERCENT, MAX_WASTAGE_PERCENT};
use crate::errors::{CalcResult, EstimateError};

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Estimator settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Symbol prefixed to every money amount (e.g., "₦")
    pub currency_symbol: String,

    /// Wastage allowance used when none is given, 0 to 20 percent
    pub default_wastage_percent: u8,

    /// Nominal block length in meters, mortar joint included
    pub default_block_length_m: f64,

    /// Nominal block height in meters, mortar joint included
    pub default_block_height_m: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        EstimatorSettings {
            version: SCHEMA_VERSION.to_string(),
            currency_symbol: "₦".to_string(),
            default_wastage_percent: DEFAULT_WASTAGE_PERCENT,
            // 450 × 225 mm face
            default_block_length_m: 0.45,
            default_block_height_m: 0.225,
        }
    }
}

impl EstimatorSettings {
    /// Validate settings values.
    pub fn validate(&self) -> CalcResult<()> {
        if self.currency_symbol.trim().is_empty() {
            return Err(EstimateError::invalid_input(
                "currency_symbol",
                format!("{:?}", self.currency_symbol),
                "Currency symbol cannot be empty",
            ));
        }
        if self.default_wastage_percent > MAX_WASTAGE_PERCENT {
            return Err(EstimateError::invalid_input(
                "default_wastage_percent",
                self.default_wastage_percent.to_string(),
                format!("Wastage allowance must be between 0 and {MAX_WASTAGE_PERCENT}%"),
            ));
        }
        for (field, value) in [
            ("default_block_length_m", self.default_block_length_m),
            ("default_block_height_m", self.default_block_height_m),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EstimateError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EstimatorSettings::default();
        assert_eq!(settings.currency_symbol, "₦");
        assert_eq!(settings.default_wastage_percent, 5);
        assert_eq!(settings.version, SCHEMA_VERSION);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: EstimatorSettings = serde_json::from_str(r#"{ "currency_symbol": "$" }"#).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_block_length_m, 0.45);
        assert_eq!(settings.default_wastage_percent, 5);
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = EstimatorSettings::default();
        settings.default_wastage_percent = 30;
        assert_eq!(settings.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let mut settings = EstimatorSettings::default();
        settings.currency_symbol = "  ".to_string();
        assert!(settings.validate().is_err());

        let mut settings = EstimatorSettings::default();
        settings.default_block_height_m = 0.0;
        assert!(settings.validate().is_err());
    }
}

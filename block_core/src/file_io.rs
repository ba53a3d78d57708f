//! # File I/O Module
//!
//! Reads estimator inputs and settings from JSON files. Nothing is written
//! back; estimates are computed fresh every time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use block_core::file_io::{load_input, load_settings};
//! use block_core::calculations::estimate;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("estimator.json"))?;
//! let input = load_input(Path::new("bungalow.json"), &settings)?;
//! let result = estimate(&input)?;
//! println!("{} blocks, {}{}", result.final_block_count, settings.currency_symbol, result.total_cost);
//! # Ok::<(), block_core::errors::EstimateError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::calculations::{EstimateInput, PartialEstimateInput};
use crate::errors::{CalcResult, EstimateError};
use crate::settings::{EstimatorSettings, SCHEMA_VERSION};

/// Load an estimate input from a JSON file, completing it from settings.
///
/// Fields missing from the file take the settings defaults (block size,
/// wastage) or zero. The result is checked against the form constraints
/// (non-negative measurements, wastage at most 20%) but not against the
/// estimator's own validation, which [`crate::calculations::estimate`]
/// performs.
///
/// # Returns
///
/// * `Ok(EstimateInput)` - Parsed input
/// * `Err(EstimateError::InvalidInput)` - A field breaks a form constraint
/// * `Err(EstimateError::SerializationError)` - Invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_input(path: &Path, settings: &EstimatorSettings) -> CalcResult<EstimateInput> {
    let input = load_partial_input(path)?.resolve(settings);
    input.check_form_constraints()?;
    Ok(input)
}

/// Load an input file as-is, leaving missing fields unset.
///
/// Callers that layer other sources on top (e.g. command-line flags) use
/// this, then [`PartialEstimateInput::resolve`] and
/// [`EstimateInput::check_form_constraints`].
pub fn load_partial_input(path: &Path) -> CalcResult<PartialEstimateInput> {
    let input: PartialEstimateInput = read_json(path)?;
    debug!(path = %path.display(), "loaded estimate input");
    Ok(input)
}

/// Load estimator settings from a JSON file.
///
/// # Returns
///
/// * `Ok(EstimatorSettings)` - Parsed and validated settings
/// * `Err(EstimateError::VersionMismatch)` - File version is incompatible
/// * `Err(EstimateError::InvalidInput)` - A setting is out of range
/// * `Err(EstimateError::SerializationError)` - Invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> CalcResult<EstimatorSettings> {
    let settings: EstimatorSettings = read_json(path)?;
    validate_version(&settings.version)?;
    settings.validate()?;
    debug!(path = %path.display(), "loaded estimator settings");
    Ok(settings)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_major: u32 = file_version
        .split('.')
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(mismatch)?;
    let current_major: u32 = SCHEMA_VERSION
        .split('.')
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(mismatch)?;

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }
    Ok(())
}

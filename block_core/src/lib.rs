//! # block_core - Block Wall Estimation Engine
//!
//! `block_core` turns a building's wall perimeter, wall height and block size
//! into the number of blocks to order and what they will cost. All inputs and
//! outputs are JSON-serializable so the same engine can sit behind a CLI, a
//! form, or another program.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `estimate` is a pure function, safe to call from anywhere
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use block_core::calculations::{estimate, EstimateInput};
//!
//! let input: EstimateInput = serde_json::from_str(r#"{
//!     "perimeter_m": 40.0,
//!     "wall_height_m": 3.0,
//!     "block_length_m": 0.45,
//!     "block_height_m": 0.225,
//!     "wastage_percent": 0
//! }"#).unwrap();
//!
//! let result = estimate(&input).unwrap();
//! assert_eq!(result.net_wall_area_m2, 120.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The block wall estimator
//! - [`report`] - Result sheet assembly and text rendering
//! - [`format`] - Area, count and currency formatting
//! - [`settings`] - Currency symbol and default values
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Reading inputs and settings from JSON files

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{estimate, EstimateInput, EstimateResult, PartialEstimateInput};
pub use errors::{CalcResult, EstimateError};
pub use file_io::{load_input, load_partial_input, load_settings};
pub use report::{build_report, render_text, EstimateReport};
pub use settings::EstimatorSettings;

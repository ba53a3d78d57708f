//! # Estimate Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function `fn(&*Input) -> CalcResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`block_wall`] - Block count and cost for a uniform-height wall

pub mod block_wall;

pub use block_wall::{estimate, EstimateInput, EstimateResult, PartialEstimateInput};

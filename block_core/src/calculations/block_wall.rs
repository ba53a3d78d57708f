//! # Block Wall Estimate
//!
//! Converts a wall perimeter, wall height and block face size into the
//! number of blocks needed and their cost.
//!
//! ## Method
//!
//! ```text
//! total wall area = perimeter × wall height
//! openings area   = doors × (door w × door h) + windows × (window w × window h)
//! net wall area   = max(total − openings, 0)
//! raw blocks      = net wall area / block face area
//! final blocks    = ⌈raw blocks × (1 + wastage% / 100)⌉
//! total cost      = final blocks × unit cost
//! ```
//!
//! ## Assumptions
//!
//! - Uniform wall height around the whole perimeter
//! - Internal partitions are folded into the perimeter by the caller
//! - Block dimensions are nominal (include the mortar joint)
//!
//! ## Example
//!
//! ```rust
//! use block_core::calculations::block_wall::{estimate, EstimateInput};
//!
//! let input = EstimateInput {
//!     perimeter_m: 40.0,
//!     wall_height_m: 3.0,
//!     block_length_m: 0.45,
//!     block_height_m: 0.225,
//!     door_count: 1,
//!     door_width_m: 1.0,
//!     door_height_m: 2.1,
//!     window_count: 2,
//!     window_width_m: 1.2,
//!     window_height_m: 1.2,
//!     wastage_percent: 5,
//!     unit_cost: 350.0,
//! };
//!
//! let result = estimate(&input).unwrap();
//! assert_eq!(result.final_block_count, 1193);
//! assert_eq!(result.total_cost, 417_550.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcResult, EstimateError};
use crate::settings::EstimatorSettings;
use crate::units::{Meters, SquareMeters};

/// Largest wastage allowance the form accepts, in percent
pub const MAX_WASTAGE_PERCENT: u8 = 20;

/// Wastage allowance used when none is given, in percent
pub const DEFAULT_WASTAGE_PERCENT: u8 = 5;

fn default_wastage_percent() -> u8 {
    DEFAULT_WASTAGE_PERCENT
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Input parameters for a block wall estimate.
///
/// Openings, wastage and unit cost may be omitted from JSON; they default
/// to no openings, 5% wastage and zero cost.
///
/// ## JSON Example
///
/// ```json
/// {
///   "perimeter_m": 40.0,
///   "wall_height_m": 3.0,
///   "block_length_m": 0.45,
///   "block_height_m": 0.225,
///   "door_count": 1,
///   "door_width_m": 1.0,
///   "door_height_m": 2.1,
///   "window_count": 2,
///   "window_width_m": 1.2,
///   "window_height_m": 1.2,
///   "wastage_percent": 5,
///   "unit_cost": 350.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    /// Total wall length in meters, external walls plus any partitions
    pub perimeter_m: f64,

    /// Average wall height in meters
    pub wall_height_m: f64,

    /// Nominal block length in meters (e.g., 0.45)
    pub block_length_m: f64,

    /// Nominal block height in meters (e.g., 0.225)
    pub block_height_m: f64,

    /// Number of doors
    #[serde(default)]
    pub door_count: u32,
    /// Door width in meters
    #[serde(default)]
    pub door_width_m: f64,
    /// Door height in meters
    #[serde(default)]
    pub door_height_m: f64,

    /// Number of windows
    #[serde(default)]
    pub window_count: u32,
    /// Window width in meters
    #[serde(default)]
    pub window_width_m: f64,
    /// Window height in meters
    #[serde(default)]
    pub window_height_m: f64,

    /// Allowance for breakage and cutting, 0 to 20 percent
    #[serde(default = "default_wastage_percent")]
    pub wastage_percent: u8,

    /// Price of one block
    #[serde(default)]
    pub unit_cost: f64,
}

impl EstimateInput {
    /// Validate the dimensions the estimate depends on.
    ///
    /// Geometry is checked before block size; the first failure wins.
    /// Opening counts and sizes are not checked here, zero is valid.
    /// NaN and infinite dimensions fail the same way as non-positive ones.
    pub fn validate(&self) -> CalcResult<()> {
        if !(is_positive(self.perimeter_m) && is_positive(self.wall_height_m)) {
            return Err(EstimateError::invalid_geometry(self.perimeter_m, self.wall_height_m));
        }
        if !(is_positive(self.block_length_m) && is_positive(self.block_height_m)) {
            return Err(EstimateError::invalid_block_size(self.block_length_m, self.block_height_m));
        }
        Ok(())
    }

    /// Check the constraints the input form enforces on its fields.
    ///
    /// Every measurement and the unit cost must be a non-negative number
    /// and the wastage allowance must not exceed [`MAX_WASTAGE_PERCENT`].
    /// Readers of untrusted input (files, flags) call this before
    /// [`estimate`].
    pub fn check_form_constraints(&self) -> CalcResult<()> {
        let fields = [
            ("perimeter_m", self.perimeter_m),
            ("wall_height_m", self.wall_height_m),
            ("block_length_m", self.block_length_m),
            ("block_height_m", self.block_height_m),
            ("door_width_m", self.door_width_m),
            ("door_height_m", self.door_height_m),
            ("window_width_m", self.window_width_m),
            ("window_height_m", self.window_height_m),
            ("unit_cost", self.unit_cost),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(EstimateError::invalid_input(field, value.to_string(), "Must be a finite number"));
            }
            if value < 0.0 {
                return Err(EstimateError::invalid_input(field, value.to_string(), "Cannot be negative"));
            }
        }
        if self.wastage_percent > MAX_WASTAGE_PERCENT {
            return Err(EstimateError::invalid_input(
                "wastage_percent",
                self.wastage_percent.to_string(),
                format!("Wastage allowance must be between 0 and {MAX_WASTAGE_PERCENT}%"),
            ));
        }
        Ok(())
    }

    /// Gross wall area A = perimeter × height
    pub fn total_wall_area(&self) -> SquareMeters {
        Meters(self.perimeter_m) * Meters(self.wall_height_m)
    }

    /// Combined area of all door and window openings
    pub fn openings_area(&self) -> SquareMeters {
        let door = Meters(self.door_width_m) * Meters(self.door_height_m);
        let window = Meters(self.window_width_m) * Meters(self.window_height_m);
        door * f64::from(self.door_count) + window * f64::from(self.window_count)
    }

    /// Face area of a single block
    pub fn block_face_area(&self) -> SquareMeters {
        Meters(self.block_length_m) * Meters(self.block_height_m)
    }

    /// Multiplier applied to the raw block count, e.g. 1.05 for 5%
    pub fn wastage_factor(&self) -> f64 {
        1.0 + f64::from(self.wastage_percent) / 100.0
    }
}

/// An input whose fields may each be missing, as read from a file or flags.
///
/// Layers are combined with [`PartialEstimateInput::overlay`] and then
/// completed from [`EstimatorSettings`] by [`PartialEstimateInput::resolve`],
/// so the precedence is settings → file → flags. A missing perimeter or
/// height resolves to 0 and is reported by [`estimate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialEstimateInput {
    pub perimeter_m: Option<f64>,
    pub wall_height_m: Option<f64>,
    pub block_length_m: Option<f64>,
    pub block_height_m: Option<f64>,
    pub door_count: Option<u32>,
    pub door_width_m: Option<f64>,
    pub door_height_m: Option<f64>,
    pub window_count: Option<u32>,
    pub window_width_m: Option<f64>,
    pub window_height_m: Option<f64>,
    pub wastage_percent: Option<u8>,
    pub unit_cost: Option<f64>,
}

impl PartialEstimateInput {
    /// Fields set in `top` replace the ones in `self`.
    pub fn overlay(self, top: PartialEstimateInput) -> Self {
        PartialEstimateInput {
            perimeter_m: top.perimeter_m.or(self.perimeter_m),
            wall_height_m: top.wall_height_m.or(self.wall_height_m),
            block_length_m: top.block_length_m.or(self.block_length_m),
            block_height_m: top.block_height_m.or(self.block_height_m),
            door_count: top.door_count.or(self.door_count),
            door_width_m: top.door_width_m.or(self.door_width_m),
            door_height_m: top.door_height_m.or(self.door_height_m),
            window_count: top.window_count.or(self.window_count),
            window_width_m: top.window_width_m.or(self.window_width_m),
            window_height_m: top.window_height_m.or(self.window_height_m),
            wastage_percent: top.wastage_percent.or(self.wastage_percent),
            unit_cost: top.unit_cost.or(self.unit_cost),
        }
    }

    /// Fill the gaps from settings; openings and cost default to zero.
    pub fn resolve(&self, settings: &EstimatorSettings) -> EstimateInput {
        EstimateInput {
            perimeter_m: self.perimeter_m.unwrap_or(0.0),
            wall_height_m: self.wall_height_m.unwrap_or(0.0),
            block_length_m: self.block_length_m.unwrap_or(settings.default_block_length_m),
            block_height_m: self.block_height_m.unwrap_or(settings.default_block_height_m),
            door_count: self.door_count.unwrap_or(0),
            door_width_m: self.door_width_m.unwrap_or(0.0),
            door_height_m: self.door_height_m.unwrap_or(0.0),
            window_count: self.window_count.unwrap_or(0),
            window_width_m: self.window_width_m.unwrap_or(0.0),
            window_height_m: self.window_height_m.unwrap_or(0.0),
            wastage_percent: self.wastage_percent.unwrap_or(settings.default_wastage_percent),
            unit_cost: self.unit_cost.unwrap_or(0.0),
        }
    }
}

/// Results of a block wall estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_wall_area_m2": 120.0,
///   "openings_area_m2": 4.98,
///   "net_wall_area_m2": 115.02,
///   "block_face_area_m2": 0.10125,
///   "raw_block_count": 1136.0,
///   "final_block_count": 1193,
///   "total_cost": 417550.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Perimeter × wall height (m²)
    pub total_wall_area_m2: f64,

    /// Doors plus windows (m²)
    pub openings_area_m2: f64,

    /// Wall area left to build after openings, never negative (m²)
    pub net_wall_area_m2: f64,

    /// Face area of one block (m²)
    pub block_face_area_m2: f64,

    /// Blocks needed before wastage and rounding
    pub raw_block_count: f64,

    /// Blocks to order: wastage applied, rounded up
    pub final_block_count: u64,

    /// final_block_count × unit cost
    pub total_cost: f64,
}

impl EstimateResult {
    /// True when the openings were larger than the wall and the net area
    /// was clamped to zero
    pub fn openings_exceed_wall(&self) -> bool {
        self.openings_area_m2 > self.total_wall_area_m2
    }
}

/// Estimate blocks and cost for a wall.
///
/// # Arguments
///
/// * `input` - Wall, block, opening and cost parameters
///
/// # Returns
///
/// * `Ok(EstimateResult)` - Areas, block counts and total cost
/// * `Err(EstimateError::InvalidGeometry)` - perimeter or height ≤ 0
/// * `Err(EstimateError::InvalidBlockSize)` - block length or height ≤ 0
pub fn estimate(input: &EstimateInput) -> CalcResult<EstimateResult> {
    debug!(?input, "estimating block wall");
    input.validate()?;

    let total_wall_area = input.total_wall_area();
    let openings_area = input.openings_area();
    let net_wall_area = (total_wall_area - openings_area).clamp_non_negative();
    if openings_area > total_wall_area {
        warn!(
            total_wall_area_m2 = total_wall_area.value(),
            openings_area_m2 = openings_area.value(),
            "openings exceed wall area, net wall area clamped to zero"
        );
    }

    let block_face_area = input.block_face_area();
    // Unreachable after validate(), kept so the division never sees zero
    let raw_block_count = if block_face_area.value() > 0.0 {
        net_wall_area / block_face_area
    } else {
        0.0
    };

    let final_block_count = (raw_block_count * input.wastage_factor()).ceil() as u64;
    let total_cost = final_block_count as f64 * input.unit_cost;

    debug!(
        net_wall_area_m2 = net_wall_area.value(),
        block_face_area_m2 = block_face_area.value(),
        raw_block_count,
        final_block_count,
        "block wall estimate complete"
    );

    Ok(EstimateResult {
        total_wall_area_m2: total_wall_area.value(),
        openings_area_m2: openings_area.value(),
        net_wall_area_m2: net_wall_area.value(),
        block_face_area_m2: block_face_area.value(),
        raw_block_count,
        final_block_count,
        total_cost,
    })
}

//! # Unit Types
//!
//! Lightweight newtype wrappers for the two quantities the estimator works
//! in. Everything is metric and there is no conversion between systems:
//! lengths are meters, areas are square meters.
//!
//! ## Example
//!
//! ```rust
//! use block_core::units::{Meters, SquareMeters};
//!
//! let wall = Meters(40.0) * Meters(3.0);
//! assert_eq!(wall, SquareMeters(120.0));
//!
//! // Area divided by area is a plain count
//! let blocks = SquareMeters(1.0) / SquareMeters(0.25);
//! assert_eq!(blocks, 4.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

// ============================================================================
// Area
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Self) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Div for SquareMeters {
    type Output = f64;
    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

impl SquareMeters {
    /// Clamp negative areas to zero
    pub fn clamp_non_negative(self) -> Self {
        SquareMeters(self.0.max(0.0))
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_times_length_is_area() {
        let area = Meters(1.2) * Meters(1.5);
        assert!((area.value() - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_area_arithmetic() {
        let a = SquareMeters(10.0);
        let b = SquareMeters(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((b * 2.0).0, 8.0);
        assert_eq!(a / b, 2.5);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!((SquareMeters(2.0) - SquareMeters(5.0)).clamp_non_negative(), SquareMeters(0.0));
        assert_eq!(SquareMeters(3.0).clamp_non_negative(), SquareMeters(3.0));
    }

    #[test]
    fn test_serialization() {
        let m = Meters(0.45);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "0.45");
    }
}

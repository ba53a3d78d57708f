//! # Estimate Report
//!
//! Builds the result sheet shown after an estimate: the headline metrics in
//! two columns, a details block, and the measuring instructions and tip that
//! go around the form.
//!
//! ## Example
//!
//! ```rust
//! use block_core::calculations::EstimateInput;
//! use block_core::report::{build_report, render_text};
//! use block_core::settings::EstimatorSettings;
//!
//! let input = EstimateInput {
//!     perimeter_m: 40.0,
//!     wall_height_m: 3.0,
//!     block_length_m: 0.45,
//!     block_height_m: 0.225,
//!     door_count: 0,
//!     door_width_m: 0.0,
//!     door_height_m: 0.0,
//!     window_count: 0,
//!     window_width_m: 0.0,
//!     window_height_m: 0.0,
//!     wastage_percent: 5,
//!     unit_cost: 350.0,
//! };
//!
//! let report = build_report(&input, &EstimatorSettings::default()).unwrap();
//! let text = render_text(&report);
//! assert!(text.contains("Total Wall Area"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{estimate, EstimateInput, EstimateResult};
use crate::errors::CalcResult;
use crate::format::{format_area, format_count, format_currency};
use crate::settings::EstimatorSettings;

/// How to measure the walls before filling in the form
pub const INSTRUCTIONS: &str = "\
Enter the total wall perimeter of your bungalow.
  - Measure all external walls around the building.
  - If there are courtyards, re-entrant corners, or projections, include those lengths too.
  - To include internal partitions / room walls, add their lengths to the perimeter before entering it here.
  - Use the average wall height. If heights differ, consider splitting into segments and summing areas.

Formula used: Wall Area = Perimeter × Height, then we subtract openings and divide by block face area.";

/// Shown under every result sheet
pub const TIP: &str = "Tip: For split heights or inner courtyards, sum each segment's length × height \
and use that as your effective area.";

/// Assumptions behind every estimate
pub const ASSUMPTIONS: &str =
    "Uniform height; openings subtracted; partitions included via perimeter; wastage applied.";

/// Secondary figures shown under the headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateDetails {
    /// Block face area rounded to 4 decimals (m²)
    pub block_face_area_m2: f64,

    /// Raw block count with the fraction dropped
    pub blocks_raw: u64,

    pub assumptions: String,
}

impl EstimateDetails {
    pub fn from_result(result: &EstimateResult) -> Self {
        EstimateDetails {
            block_face_area_m2: (result.block_face_area_m2 * 10_000.0).round() / 10_000.0,
            blocks_raw: result.raw_block_count.trunc() as u64,
            assumptions: ASSUMPTIONS.to_string(),
        }
    }
}

/// A labelled, display-ready value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Metric {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Everything the result sheet shows, JSON-serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    pub generated_at: DateTime<Utc>,
    pub currency_symbol: String,
    pub input: EstimateInput,
    pub result: EstimateResult,
    pub details: EstimateDetails,
}

impl EstimateReport {
    /// Headline metrics, left column then right column.
    pub fn metrics(&self) -> (Vec<Metric>, Vec<Metric>) {
        let symbol = &self.currency_symbol;
        let left = vec![
            Metric::new("Total Wall Area", format_area(self.result.total_wall_area_m2)),
            Metric::new("Openings Area", format_area(self.result.openings_area_m2)),
            Metric::new(
                format!("Blocks (+{}%)", self.input.wastage_percent),
                format_count(self.result.final_block_count),
            ),
        ];
        let right = vec![
            Metric::new("Net Wall Area", format_area(self.result.net_wall_area_m2)),
            Metric::new(
                format!("Unit Cost ({symbol}/block)"),
                format_currency(symbol, self.input.unit_cost),
            ),
            Metric::new(
                format!("Total Cost ({symbol})"),
                format_currency(symbol, self.result.total_cost),
            ),
        ];
        (left, right)
    }

    /// Pretty JSON for machine consumers
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the estimate and assemble its report.
///
/// # Returns
///
/// * `Ok(EstimateReport)` - Estimate succeeded
/// * `Err(EstimateError)` - The estimator rejected the input
pub fn build_report(input: &EstimateInput, settings: &EstimatorSettings) -> CalcResult<EstimateReport> {
    let result = estimate(input)?;
    let details = EstimateDetails::from_result(&result);
    Ok(EstimateReport {
        generated_at: Utc::now(),
        currency_symbol: settings.currency_symbol.clone(),
        input: input.clone(),
        result,
        details,
    })
}

/// Render the result sheet as plain text.
pub fn render_text(report: &EstimateReport) -> String {
    let (left, right) = report.metrics();
    let width = left
        .iter()
        .map(|m| m.label.chars().count().max(m.value.chars().count()))
        .max()
        .unwrap_or(0)
        + 4;

    let mut out = String::new();
    out.push_str("Calculation complete\n\n");
    for (l, r) in left.iter().zip(right.iter()) {
        out.push_str(&format!("{}{}\n", pad(&l.label, width), r.label));
        out.push_str(&format!("{}{}\n\n", pad(&l.value, width), r.value));
    }

    out.push_str("Details\n");
    out.push_str(&format!("  block_face_area_m2: {:.4}\n", report.details.block_face_area_m2));
    out.push_str(&format!("  blocks_raw:         {}\n", report.details.blocks_raw));
    out.push_str(&format!("  assumptions:        {}\n", report.details.assumptions));
    if report.result.openings_exceed_wall() {
        out.push_str("  note:               openings exceed wall area; net wall area set to 0\n");
    }
    out.push('\n');
    out.push_str(TIP);
    out.push('\n');
    out
}

// Pads by characters, not bytes, so "m²" and "₦" line up.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bungalow() -> EstimateInput {
        EstimateInput {
            perimeter_m: 40.0,
            wall_height_m: 3.0,
            block_length_m: 0.45,
            block_height_m: 0.225,
            door_count: 1,
            door_width_m: 1.0,
            door_height_m: 2.1,
            window_count: 2,
            window_width_m: 1.2,
            window_height_m: 1.2,
            wastage_percent: 5,
            unit_cost: 350.0,
        }
    }

    #[test]
    fn test_details() {
        let report = build_report(&bungalow(), &EstimatorSettings::default()).unwrap();
        assert_eq!(report.details.block_face_area_m2, 0.1013);
        // 115.02 / 0.10125 lands just under 1136 in f64
        assert_eq!(report.details.blocks_raw, 1135);
        assert_eq!(report.details.assumptions, ASSUMPTIONS);
    }

    #[test]
    fn test_metrics() {
        let report = build_report(&bungalow(), &EstimatorSettings::default()).unwrap();
        let (left, right) = report.metrics();

        assert_eq!(left[0], Metric::new("Total Wall Area", "120.00 m²"));
        assert_eq!(left[1], Metric::new("Openings Area", "4.98 m²"));
        assert_eq!(left[2], Metric::new("Blocks (+5%)", "1193"));
        assert_eq!(right[0], Metric::new("Net Wall Area", "115.02 m²"));
        assert_eq!(right[1], Metric::new("Unit Cost (₦/block)", "₦350.00"));
        assert_eq!(right[2], Metric::new("Total Cost (₦)", "₦417,550.00"));
    }

    #[test]
    fn test_custom_currency_symbol() {
        let settings = EstimatorSettings {
            currency_symbol: "$".to_string(),
            ..EstimatorSettings::default()
        };
        let report = build_report(&bungalow(), &settings).unwrap();
        let (_, right) = report.metrics();
        assert_eq!(right[2].value, "$417,550.00");
    }

    #[test]
    fn test_render_text() {
        let report = build_report(&bungalow(), &EstimatorSettings::default()).unwrap();
        let text = render_text(&report);
        assert!(text.starts_with("Calculation complete"));
        assert!(text.contains("Blocks (+5%)"));
        assert!(text.contains("₦417,550.00"));
        assert!(text.contains("blocks_raw:         1135"));
        assert!(text.contains(TIP));
        assert!(!text.contains("openings exceed"));
    }

    #[test]
    fn test_render_notes_clamped_area() {
        let mut input = bungalow();
        input.door_count = 200;
        let report = build_report(&input, &EstimatorSettings::default()).unwrap();
        assert!(render_text(&report).contains("openings exceed wall area"));
    }

    #[test]
    fn test_invalid_input_has_no_report() {
        let mut input = bungalow();
        input.perimeter_m = 0.0;
        let err = build_report(&input, &EstimatorSettings::default()).unwrap_err();
        assert_eq!(err.to_string(), "Perimeter and wall height must be greater than 0.");
    }

    #[test]
    fn test_json_report() {
        let report = build_report(&bungalow(), &EstimatorSettings::default()).unwrap();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"final_block_count\": 1193"));
        assert!(json.contains("\"blocks_raw\": 1135"));
        assert!(json.contains("generated_at"));
    }
}

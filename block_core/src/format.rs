//! # Display Formatting
//!
//! Text formatting for estimate values: areas carry two decimals and an
//! "m²" suffix, block counts are plain integers, and money is written as
//! `<symbol><amount>` with comma thousands separators and two decimals.
//!
//! ```rust
//! use block_core::format::{format_area, format_currency};
//!
//! assert_eq!(format_area(115.02), "115.02 m²");
//! assert_eq!(format_currency("₦", 417_550.0), "₦417,550.00");
//! ```

/// Suffix appended to every formatted area
pub const AREA_UNIT: &str = "m²";

/// Format an area to two decimal places with the unit suffix.
pub fn format_area(value_m2: f64) -> String {
    format!("{value_m2:.2} {AREA_UNIT}")
}

/// Format a block count as a plain integer.
pub fn format_count(count: u64) -> String {
    count.to_string()
}

/// Format a money amount, e.g. `₦1,234,567.89`.
///
/// Non-finite amounts cannot be grouped and fall back to the unformatted
/// value after the symbol.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    match group_thousands(amount) {
        Some(grouped) => format!("{symbol}{grouped}"),
        None => format!("{symbol}{amount}"),
    }
}

/// `1234567.891` -> `1,234,567.89`
fn group_thousands(amount: f64) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.')?;

    let mut grouped = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if amount < 0.0 && fixed.bytes().any(|b| b != b'0' && b != b'.') {
        grouped.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(fraction);
    Some(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(120.0), "120.00 m²");
        assert_eq!(format_area(4.98), "4.98 m²");
        assert_eq!(format_area(0.0), "0.00 m²");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1193), "1193");
        assert_eq!(format_count(0), "0");
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency("₦", 0.0), "₦0.00");
        assert_eq!(format_currency("₦", 350.0), "₦350.00");
        assert_eq!(format_currency("₦", 1000.0), "₦1,000.00");
        assert_eq!(format_currency("₦", 417_550.0), "₦417,550.00");
        assert_eq!(format_currency("$", 1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency("₦", 999.999), "₦1,000.00");
    }

    #[test]
    fn test_negative_currency() {
        assert_eq!(format_currency("₦", -1500.5), "₦-1,500.50");
        assert_eq!(format_currency("₦", -0.001), "₦0.00");
    }

    #[test]
    fn test_currency_fallback() {
        assert_eq!(format_currency("₦", f64::INFINITY), "₦inf");
        assert_eq!(format_currency("₦", f64::NAN), "₦NaN");
    }
}

//! Fixed-point quantity utilities.
//!
//! ## Overview
//!
//! Quantities, rates, scores and carbon figures are all [`Decimal`] values.
//! Floating-point arithmetic can produce different results on different
//! hardware; decimal math keeps every score reproducible.
//!
//! ## Quantity Labels
//!
//! Manifests describe their cargo with a free-text label such as `"500 kg"`
//! or `"2 tons"`. [`parse_quantity_label`] splits such a label into an
//! amount and a [`Unit`], and [`to_kg`] normalizes it to kilograms.
//!
//! ```
//! use rust_decimal::Decimal;
//! use symbiosis_core::types::quantity::{parse_quantity_label, to_kg};
//! use symbiosis_core::types::Unit;
//!
//! let (amount, unit) = parse_quantity_label("2 tons").unwrap();
//! assert_eq!(unit, Unit::Tons);
//! assert_eq!(to_kg(amount, &unit), Some(Decimal::from(2000)));
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::types::Unit;

/// Kilograms per metric ton
pub const KG_PER_TON: u64 = 1_000;

/// Upper bound of every score in the engine
pub const SCORE_MAX: u8 = 100;

// ============================================================================
// Parsing
// ============================================================================

/// Parse a decimal amount, tolerating thousands separators (`"1,000.5"`).
///
/// Returns `None` for empty, negative or non-numeric input.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    let value = Decimal::from_str(&cleaned).ok()?;
    if value.is_sign_negative() {
        return None;
    }
    Some(value)
}

/// Split a quantity label into its amount and unit.
///
/// Accepts `"500 kg"`, `"500kg"`, `"1,200 liters"`. A label without a unit
/// is rejected: there is nothing to normalize it against.
pub fn parse_quantity_label(label: &str) -> Option<(Decimal, Unit)> {
    let trimmed = label.trim();
    let split_at = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(trimmed.len());
    let (number, rest) = trimmed.split_at(split_at);

    let amount = parse_amount(number)?;
    let unit_text = rest.trim();
    if unit_text.is_empty() {
        return None;
    }
    Some((amount, Unit::parse(unit_text)))
}

// ============================================================================
// Normalization
// ============================================================================

/// Convert an amount to kilograms.
///
/// Mass units convert exactly. Liters and units are counted one-for-one as
/// kilogram equivalents, which is what the impact figures assume; custom
/// units have no known conversion.
pub fn to_kg(amount: Decimal, unit: &Unit) -> Option<Decimal> {
    match unit {
        Unit::Liters | Unit::Units => Some(amount),
        Unit::Custom(_) => None,
        _ => amount.checked_mul(unit.kg_factor()?),
    }
}

/// Round half away from zero to a whole number.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to two decimal places (currency and kg CO2 figures).
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ============================================================================
// Saturating arithmetic
// ============================================================================

/// `a * b`, pinned to `Decimal::MAX` / `Decimal::MIN` when the product
/// does not fit.
pub fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        if a.is_sign_negative() != b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Sum that saturates at the bounds instead of overflowing.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, |total, value| {
        total.checked_add(value).unwrap_or(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    })
}

/// Round and clamp a score into `0..=100`.
pub fn clamp_score(value: Decimal) -> u8 {
    let rounded = round_whole(value);
    if rounded.is_sign_negative() {
        return 0;
    }
    rounded
        .to_u8()
        .map(|score| score.min(SCORE_MAX))
        .unwrap_or(SCORE_MAX)
}

// ============================================================================
// Formatting
// ============================================================================

/// Render an amount without trailing zeros (`500.00` becomes `"500"`).
pub fn format_amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Render an amount with thousands separators (`7500` becomes `"7,500"`).
pub fn format_grouped(value: Decimal) -> String {
    let text = format_amount(value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("500"), Some(Decimal::from(500)));
        assert_eq!(parse_amount(" 1,000.5 "), Some(Decimal::new(10005, 1)));
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_parse_quantity_label() {
        assert_eq!(parse_quantity_label("500 kg"), Some((Decimal::from(500), Unit::Kg)));
        assert_eq!(parse_quantity_label("1 ton"), Some((Decimal::from(1), Unit::Tons)));
        assert_eq!(parse_quantity_label("200kg"), Some((Decimal::from(200), Unit::Kg)));
        assert_eq!(
            parse_quantity_label("3 drums"),
            Some((Decimal::from(3), Unit::Custom("drums".to_string())))
        );
        assert_eq!(parse_quantity_label("500"), None);
        assert_eq!(parse_quantity_label("lots of kg"), None);
    }

    #[test]
    fn test_to_kg() {
        assert_eq!(to_kg(Decimal::from(2), &Unit::Tons), Some(Decimal::from(2000)));
        assert_eq!(to_kg(Decimal::from(7), &Unit::Kg), Some(Decimal::from(7)));
        assert_eq!(to_kg(Decimal::from(7), &Unit::Liters), Some(Decimal::from(7)));
        assert_eq!(to_kg(Decimal::from(7), &Unit::Custom("bales".into())), None);
    }

    #[test]
    fn test_round_whole_half_away_from_zero() {
        assert_eq!(round_whole(Decimal::new(845, 1)), Decimal::from(85));
        assert_eq!(round_whole(Decimal::new(844, 1)), Decimal::from(84));
        assert_eq!(round_whole(Decimal::new(865, 1)), Decimal::from(87));
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(Decimal::from(100)), 100);
        assert_eq!(clamp_score(Decimal::from(250)), 100);
        assert_eq!(clamp_score(Decimal::from(-4)), 0);
        assert_eq!(clamp_score(Decimal::new(995, 1)), 100);
    }

    #[test]
    fn test_saturating_mul() {
        assert_eq!(saturating_mul(Decimal::from(300), Decimal::from(150)), Decimal::from(45000));
        assert_eq!(saturating_mul(Decimal::MAX / Decimal::from(10), Decimal::from(150)), Decimal::MAX);
        assert_eq!(saturating_mul(Decimal::MAX, Decimal::from(-2)), Decimal::MIN);
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum(vec![Decimal::from(2), Decimal::from(3)]), Decimal::from(5));
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
        assert_eq!(saturating_sum(vec![Decimal::MAX, Decimal::ONE, Decimal::from(7)]), Decimal::MAX);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(Decimal::from(7500)), "7,500");
        assert_eq!(format_grouped(Decimal::from(150)), "150");
        assert_eq!(format_grouped(Decimal::new(123456789, 2)), "1,234,567.89");
        assert_eq!(format_grouped(Decimal::new(50000, 2)), "500");
    }
}

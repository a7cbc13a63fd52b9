//! Normalization rules shared by every bookkeeping record.
//!
//! Text is trimmed before it is measured; optional text that is blank after
//! trimming becomes `None`. Money is stored as `DECIMAL(18,2)`.

use rust_decimal::Decimal;

/// Fraction digits kept by money columns.
pub const MONEY_SCALE: u32 = 2;

/// Integer digits that fit a `DECIMAL(18,2)` column.
pub const MONEY_INTEGER_DIGITS: u32 = 16;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    /// Absent or blank.
    Missing,
    /// Longer than `max` characters.
    TooLong {
        /// Maximum character count.
        max: usize,
    },
}

/// Trims a required value and checks its length.
pub fn required_text(value: &str, max: usize) -> Result<String, FieldViolation> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldViolation::Missing);
    }
    check_length(value, max)?;
    Ok(value.to_string())
}

/// Trims an optional value; blank becomes `None`.
pub fn optional_text(value: Option<&str>, max: usize) -> Result<Option<String>, FieldViolation> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            check_length(value, max)?;
            Ok(Some(value.to_string()))
        }
    }
}

fn check_length(value: &str, max: usize) -> Result<(), FieldViolation> {
    if value.chars().count() > max {
        return Err(FieldViolation::TooLong { max });
    }
    Ok(())
}

/// True when the amount fits a two-decimal money column without rounding.
///
/// Trailing zeros do not count: `10.500` is accepted, `10.505` is not.
#[must_use]
pub fn fits_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

/// True when the integer part fits a money column.
#[must_use]
pub fn fits_money_precision(amount: Decimal) -> bool {
    let limit = Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS));
    amount.abs() < limit
}

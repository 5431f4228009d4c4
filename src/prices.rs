//! Prices

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors from price arithmetic outside of `rusty_money`.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Price of `quantity` units at `unit` each.
pub fn times<'a>(unit: Money<'a, Currency>, quantity: u32) -> Money<'a, Currency> {
    Money::from_minor(
        unit.to_minor_units().saturating_mul(i64::from(quantity)),
        unit.currency(),
    )
}

/// Calculate `percent` of an amount in minor units, rounded half away from zero.
///
/// # Errors
///
/// Returns [`PriceError::PercentConversion`] if the calculation overflows.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, PriceError> {
    let minor = Decimal::from_i64(minor).ok_or(PriceError::PercentConversion)?;

    (percent * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PriceError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PriceError::PercentConversion)
}

/// Check that `price` is denominated in `currency`.
///
/// # Errors
///
/// Returns [`MoneyError::CurrencyMismatch`] when the currencies differ.
pub fn ensure_currency(price: &Money<'_, Currency>, currency: &Currency) -> Result<(), MoneyError> {
    if price.currency() == currency {
        Ok(())
    } else {
        Err(MoneyError::CurrencyMismatch {
            expected: currency.iso_alpha_code,
            actual: price.currency().iso_alpha_code,
        })
    }
}

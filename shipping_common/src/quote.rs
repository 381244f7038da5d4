//! Quote value type and conversion from currency amounts.
//!
//! A `Quote` is a price split into whole currency units and sub-units (1/100th of a
//! unit). Amounts are rounded to two decimal places with midpoint-away-from-zero in
//! exact decimal arithmetic before splitting, so `10.555` becomes `$10.56`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::QuoteError;

/// Number of sub-units in one currency unit.
pub const SUBUNITS_PER_UNIT: u32 = 100;

/// A computed shipping price. `subunits` is always in `[0, 99]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Quote {
    units: u32,
    subunits: u32,
}

impl Quote {
    /// The zero quote, `$0.00`.
    pub const ZERO: Quote = Quote {
        units: 0,
        subunits: 0,
    };

    /// Builds a quote from its parts, rejecting `subunits >= 100`.
    pub fn new(units: u32, subunits: u32) -> Result<Self, QuoteError> {
        if subunits >= SUBUNITS_PER_UNIT {
            return Err(QuoteError::AmountOutOfRange(format!(
                "{} subunits do not fit a single unit",
                subunits
            )));
        }
        Ok(Quote { units, subunits })
    }

    /// Builds a quote from a total count of sub-units.
    pub fn from_subunits(total: u64) -> Result<Self, QuoteError> {
        let per_unit = u64::from(SUBUNITS_PER_UNIT);
        let units = u32::try_from(total / per_unit).map_err(|_| {
            QuoteError::AmountOutOfRange(format!("{} subunits exceed the unit range", total))
        })?;
        // The remainder is below 100 so it always fits.
        let subunits = (total % per_unit) as u32;
        Ok(Quote { units, subunits })
    }

    /// Converts a non-negative decimal amount, rounding to the nearest sub-unit.
    pub fn from_decimal(amount: Decimal) -> Result<Self, QuoteError> {
        if amount.is_zero() {
            return Ok(Quote::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(QuoteError::NegativeAmount(amount.to_f64().unwrap_or(f64::NEG_INFINITY)));
        }

        let units = amount.trunc();
        let fraction = amount - units;
        let rounded_subunits = (fraction * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        let total = units
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.checked_add(rounded_subunits))
            .and_then(|cents| cents.to_u64())
            .ok_or_else(|| QuoteError::AmountOutOfRange(amount.to_string()))?;

        Self::from_subunits(total)
    }

    /// Converts a floating-point amount.
    ///
    /// The float is read through its shortest round-tripping decimal form, so the
    /// rounding sees `10.555` rather than the binary approximation below it.
    pub fn from_f64(value: f64) -> Result<Self, QuoteError> {
        if !value.is_finite() {
            return Err(QuoteError::NonFiniteAmount(value));
        }
        if value < 0.0 {
            return Err(QuoteError::NegativeAmount(value));
        }
        if value == 0.0 {
            return Ok(Quote::ZERO);
        }

        let amount = Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(value))
            .ok_or_else(|| QuoteError::AmountOutOfRange(value.to_string()))?;

        Self::from_decimal(amount)
    }

    /// Whole currency units.
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Sub-units (cents), always below 100.
    pub fn subunits(&self) -> u32 {
        self.subunits
    }

    /// Total amount expressed in sub-units.
    pub fn total_subunits(&self) -> u64 {
        u64::from(self.units) * u64::from(SUBUNITS_PER_UNIT) + u64::from(self.subunits)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.units, self.subunits)
    }
}

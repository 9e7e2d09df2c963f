use std::{
    fmt,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub},
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Number of decimal places between a major unit and a subunit.
const SUBUNIT_SCALE: u32 = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("{0} is more precise than the smallest currency subunit")]
    TooPrecise(Decimal),
    #[error("{0} does not fit into the currency range")]
    OutOfRange(Decimal),
}

/// Signed fixed-point amount, counted in the smallest currency subunit.
///
/// A major unit is worth [`Currency::MAJOR_UNIT`] subunits and a minor unit
/// [`Currency::MINOR_UNIT`], so `1000 * Currency::MAJOR_UNIT + 50 * Currency::MINOR_UNIT`
/// reads as "1000.50".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(i64);

impl Currency {
    pub const ZERO: Currency = Currency(0);
    pub const MAJOR_UNIT: Currency = Currency(10_000);
    pub const MINOR_UNIT: Currency = Currency(100);

    pub const fn from_subunits(subunits: i64) -> Self {
        Self(subunits)
    }

    pub const fn subunits(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Currency) -> Option<Currency> {
        self.0.checked_add(other.0).map(Currency)
    }

    /// Amount expressed in major units, e.g. `1870.5`.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, SUBUNIT_SCALE).normalize()
    }

    /// Parses an amount given in major units.
    pub fn from_decimal(amount: Decimal) -> Result<Self, CurrencyError> {
        let subunits = amount
            .checked_mul(Decimal::from(Self::MAJOR_UNIT.0))
            .ok_or(CurrencyError::OutOfRange(amount))?;
        if !subunits.fract().is_zero() {
            return Err(CurrencyError::TooPrecise(amount));
        }
        subunits
            .to_i64()
            .map(Currency)
            .ok_or(CurrencyError::OutOfRange(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_decimal(), f)
    }
}

impl Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Currency) -> Currency {
        Currency(self.0 + rhs.0)
    }
}

impl Sub for Currency {
    type Output = Currency;

    fn sub(self, rhs: Currency) -> Currency {
        Currency(self.0 - rhs.0)
    }
}

impl Neg for Currency {
    type Output = Currency;

    fn neg(self) -> Currency {
        Currency(-self.0)
    }
}

impl Mul<i64> for Currency {
    type Output = Currency;

    fn mul(self, rhs: i64) -> Currency {
        Currency(self.0 * rhs)
    }
}

impl Mul<Currency> for i64 {
    type Output = Currency;

    fn mul(self, rhs: Currency) -> Currency {
        Currency(self * rhs.0)
    }
}

impl Sum for Currency {
    fn sum<I: Iterator<Item = Currency>>(iter: I) -> Currency {
        iter.fold(Currency::ZERO, Add::add)
    }
}

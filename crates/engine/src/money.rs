use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Signed money amount represented as **integer cents**.
///
/// The dataset is currency-agnostic; amounts are shown with a `$` sign.
/// Sums are done on cents so totals never drift.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "$12.34");
/// assert_eq!(Money::from_units(1500.0).compact(), "$2k");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a decimal amount in major units, rounding to the nearest cent.
    #[must_use]
    pub fn from_units(units: f64) -> Self {
        Self((units * 100.0).round() as i64)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the value in major units.
    #[must_use]
    pub fn units(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Short label used on chart axes and tooltips (`$500`, `$2k`, `$2.5M`).
    #[must_use]
    pub fn compact(self) -> String {
        format_compact(self.units())
    }

    /// Plain number without currency sign or trailing zeros, as written in
    /// exports (`1234.5`, `100`, `-0.05`).
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let (whole, cents) = (abs / 100, abs % 100);
        match cents {
            0 => format!("{sign}{whole}"),
            c if c % 10 == 0 => format!("{sign}{whole}.{}", c / 10),
            c => format!("{sign}{whole}.{c:02}"),
        }
    }
}

/// Formats a value in major units with `k`/`M` suffixes.
///
/// Values from one million up keep one decimal, thousands are rounded to
/// whole thousands, smaller values to whole units. Halves round away from
/// zero. Negative values keep their sign in front of the `$`.
#[must_use]
pub fn format_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if abs >= 1_000_000.0 {
        let millions = (abs / 100_000.0).round() / 10.0;
        format!("{sign}${millions:.1}M")
    } else if abs >= 1_000.0 {
        let thousands = (abs / 1_000.0).round();
        format!("{sign}${thousands:.0}k")
    } else {
        format!("{sign}${:.0}", abs.round())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_dollars() {
        assert_eq!(Money::new(0).to_string(), "$0.00");
        assert_eq!(Money::new(1).to_string(), "$0.01");
        assert_eq!(Money::new(1050).to_string(), "$10.50");
        assert_eq!(Money::new(-1050).to_string(), "-$10.50");
    }

    #[test]
    fn from_units_rounds_to_cents() {
        assert_eq!(Money::from_units(1749.04).cents(), 174_904);
        assert_eq!(Money::from_units(3834.3).cents(), 383_430);
        assert_eq!(Money::from_units(0.005).cents(), 1);
    }

    #[test]
    fn compact_uses_suffixes() {
        assert_eq!(format_compact(0.0), "$0");
        assert_eq!(format_compact(500.0), "$500");
        assert_eq!(format_compact(999.4), "$999");
        assert_eq!(format_compact(1500.0), "$2k");
        assert_eq!(format_compact(2500.0), "$3k");
        assert_eq!(format_compact(12_345.0), "$12k");
        assert_eq!(format_compact(2_500_000.0), "$2.5M");
        assert_eq!(format_compact(1_000_000.0), "$1.0M");
    }

    #[test]
    fn compact_keeps_sign_of_negative_values() {
        assert_eq!(format_compact(-1500.0), "-$2k");
        assert_eq!(format_compact(-20.0), "-$20");
    }

    #[test]
    fn decimal_string_drops_trailing_zeros() {
        assert_eq!(Money::new(123_450).to_decimal_string(), "1234.5");
        assert_eq!(Money::new(10_000).to_decimal_string(), "100");
        assert_eq!(Money::new(1_205).to_decimal_string(), "12.05");
        assert_eq!(Money::new(-5).to_decimal_string(), "-0.05");
    }
}

//! Money type for representing prices and totals.
//!
//! Uses integer minor units (piastres, cents) to avoid floating-point
//! drift when quantities and prices are summed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EGP,
    USD,
    EUR,
    GBP,
    SAR,
    AED,
}

impl Currency {
    /// Get the currency code (e.g., "EGP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EGP => "EGP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::SAR => "SAR",
            Currency::AED => "AED",
        }
    }

    /// Get the currency symbol (e.g., "E£").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EGP => "E\u{00a3}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::SAR => "SR ",
            Currency::AED => "AED ",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the minor unit.
    ///
    /// Out-of-range amounts saturate.
    ///
    /// ```
    /// use storefront_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::EGP);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "E£49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add an amount in the same currency, clamping at the numeric bounds.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents), self.currency)
    }

    /// Subtract an amount in the same currency, clamping at the numeric bounds.
    pub fn saturating_sub(&self, other: &Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents), self.currency)
    }

    /// Multiply by a scalar, clamping at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99, Currency::EGP).amount_cents, 4999);
        assert_eq!(Money::from_decimal(10.0, Currency::USD).amount_cents, 1000);
        assert_eq!(Money::from_decimal(0.005, Currency::EGP).amount_cents, 1);
    }

    #[test]
    fn test_money_from_decimal_saturates() {
        let m = Money::from_decimal(1e300, Currency::EGP);
        assert_eq!(m.amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");
        assert_eq!(m.display_amount(), "49.99");
        assert_eq!(Money::new(1250, Currency::EGP).to_string(), "E\u{00a3}12.50");
    }

    #[test]
    fn test_money_saturating_add_sub() {
        let a = Money::new(1000, Currency::EGP);
        let b = Money::new(300, Currency::EGP);
        assert_eq!(a.saturating_add(&b).amount_cents, 1300);
        assert_eq!(b.saturating_sub(&a).amount_cents, -700);
        assert_eq!(Money::new(i64::MAX, Currency::EGP).saturating_add(&b).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_saturating_multiply() {
        let m = Money::new(1000, Currency::EGP);
        assert_eq!(m.saturating_multiply(3).amount_cents, 3000);
        assert_eq!(m.saturating_multiply(i64::MAX).amount_cents, i64::MAX);
    }
}

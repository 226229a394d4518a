//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paisa).
    pub amount: Decimal,
    /// Currency the amount is denominated in.
    pub currency: Currency,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format for display (e.g., "Rs 450.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency.symbol(), self.amount)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {:.2}", self.currency.symbol(), self.amount)
    }
}

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Nepalese rupee - the menu's native currency.
    #[default]
    Npr,
    Usd,
}

impl Currency {
    /// Display symbol used in front of amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Npr => "Rs",
            Self::Usd => "$",
        }
    }

    /// ISO 4217 currency code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Npr => "NPR",
            Self::Usd => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_two_decimals() {
        let price = Price::new(Decimal::new(45000, 2), Currency::Npr);
        assert_eq!(price.to_string(), "Rs 450.00");
    }

    #[test]
    fn test_price_display_pads_scale() {
        // A raw decimal with less scale still renders with two places.
        let price = Price::new(Decimal::new(101, 1), Currency::Npr);
        assert_eq!(price.to_string(), "Rs 10.10");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Npr.code(), "NPR");
        assert_eq!(Currency::Usd.symbol(), "$");
    }
}

//! Price type for monetary values.
//!
//! Amounts are held as whole hundredths (cents) to keep cart totals exact.
//! On the wire a price is a plain JSON number, so persisted carts and
//! document-store records read `20` or `12.5` rather than a cents integer.

use mutajary_data::docstore::FieldValue;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::CommerceError;

const CENTS_PER_UNIT: u64 = 100;

/// A non-negative amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price {
    amount_cents: u64,
}

impl Price {
    /// Zero.
    pub const ZERO: Price = Price { amount_cents: 0 };

    /// Create a price from cents.
    pub fn from_cents(amount_cents: u64) -> Self {
        Self { amount_cents }
    }

    /// Create a price from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use mutajary_commerce::Price;
    /// let price = Price::from_decimal(49.99).unwrap();
    /// assert_eq!(price.cents(), 4999);
    /// assert!(Price::from_decimal(-1.0).is_err());
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, CommerceError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidPrice(amount));
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents > u64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        Ok(Self::from_cents(cents as u64))
    }

    /// Amount in cents.
    pub fn cents(&self) -> u64 {
        self.amount_cents
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    fn whole_units(&self) -> Option<u64> {
        (self.amount_cents % CENTS_PER_UNIT == 0).then(|| self.amount_cents / CENTS_PER_UNIT)
    }

    /// Format without trailing zero decimals: `35`, `12.5`, `9.99`.
    pub fn display_amount(&self) -> String {
        let whole = self.amount_cents / CENTS_PER_UNIT;
        let frac = self.amount_cents % CENTS_PER_UNIT;
        if frac == 0 {
            whole.to_string()
        } else if frac % 10 == 0 {
            format!("{}.{}", whole, frac / 10)
        } else {
            format!("{}.{:02}", whole, frac)
        }
    }

    /// Add another price, clamping at the largest representable amount.
    pub fn saturating_add(&self, other: &Price) -> Price {
        Price::from_cents(self.amount_cents.saturating_add(other.amount_cents))
    }

    /// Multiply by a quantity, clamping at the largest representable amount.
    pub fn saturating_multiply(&self, quantity: u32) -> Price {
        Price::from_cents(self.amount_cents.saturating_mul(u64::from(quantity)))
    }

    /// The JSON number for this price: an integer when there are no cents.
    pub fn to_json_number(&self) -> serde_json::Number {
        match self.whole_units() {
            Some(whole) => serde_json::Number::from(whole),
            None => serde_json::Number::from_f64(self.to_decimal())
                .unwrap_or_else(|| serde_json::Number::from(self.amount_cents / CENTS_PER_UNIT)),
        }
    }

    /// The document-store value for this price.
    pub fn to_field_value(&self) -> FieldValue {
        match self.whole_units().and_then(|whole| i64::try_from(whole).ok()) {
            Some(whole) => FieldValue::Integer(whole),
            None => FieldValue::Double(self.to_decimal()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_amount())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_number().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_decimal(amount).map_err(de::Error::custom)
    }
}

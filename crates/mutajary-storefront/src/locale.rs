//! User-facing strings.

use serde::{Deserialize, Serialize};

/// Default currency label.
pub const DEFAULT_CURRENCY: &str = "درهم";

/// Labels shown on rendered pages and in alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub currency: String,
    pub add_to_cart: String,
    pub added_to_cart: String,
    pub quantity: String,
    pub price: String,
    pub remove: String,
    pub total: String,
    pub empty_cart: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            add_to_cart: "أضف إلى السلة".to_string(),
            added_to_cart: "تم إضافة المنتج إلى السلة".to_string(),
            quantity: "الكمية".to_string(),
            price: "السعر".to_string(),
            remove: "إزالة".to_string(),
            total: "الإجمالي".to_string(),
            empty_cart: "السلة فارغة!".to_string(),
        }
    }
}

impl Locale {
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// `<amount> <currency>`
    pub fn money(&self, amount: impl std::fmt::Display) -> String {
        format!("{} {}", amount, self.currency)
    }

    /// `<label>: <value>`
    pub fn labelled(label: &str, value: impl std::fmt::Display) -> String {
        format!("{}: {}", label, value)
    }
}

//! Orders submitted at checkout.

use chrono::{DateTime, Utc};
use mutajary_data::docstore::{FieldValue, Fields};
use mutajary_data::relay::RelayMessage;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};
use crate::money::Price;
use crate::CommerceError;

/// Customer details as entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl CustomerDetails {
    /// Build from raw form input, trimming surrounding whitespace.
    pub fn new(name: &str, email: &str, address: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            address: address.trim().to_string(),
        }
    }
}

/// A snapshot of the cart at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot `cart` for `customer`.
    ///
    /// Fails with [`CommerceError::EmptyCart`] when there is nothing to
    /// order.
    pub fn new(
        customer: CustomerDetails,
        cart: &Cart,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            customer_name: customer.name,
            customer_email: customer.email,
            customer_address: customer.address,
            items: cart.items().to_vec(),
            total: cart.total(),
            created_at,
        })
    }

    /// Document fields for the `orders` collection.
    pub fn to_fields(&self) -> Fields {
        let items = self.items.iter().map(item_field).collect();

        let mut fields = Fields::new();
        fields.insert("customer_name".into(), self.customer_name.as_str().into());
        fields.insert("customer_email".into(), self.customer_email.as_str().into());
        fields.insert("customer_address".into(), self.customer_address.as_str().into());
        fields.insert("items".into(), FieldValue::Array(items));
        fields.insert("total".into(), self.total.to_field_value());
        fields.insert("created_at".into(), FieldValue::Timestamp(self.created_at));
        fields
    }

    /// The notification posted to the email relay.
    pub fn relay_message(&self, subject: &str) -> Result<RelayMessage, CommerceError> {
        Ok(RelayMessage {
            subject: subject.to_string(),
            name: self.customer_name.clone(),
            email: self.customer_email.clone(),
            address: self.customer_address.clone(),
            items: serde_json::to_string(&self.items)?,
            total: self.total.to_json_number(),
        })
    }
}

fn item_field(item: &CartItem) -> FieldValue {
    let mut map = Fields::new();
    map.insert("id".into(), item.id.as_str().into());
    map.insert("name".into(), item.name.as_str().into());
    map.insert("price".into(), item.price.to_field_value());
    map.insert("quantity".into(), FieldValue::Integer(i64::from(item.quantity)));
    FieldValue::Map(map)
}

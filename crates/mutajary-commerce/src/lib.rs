//! Storefront domain types for Mutajary.
//!
//! - **Catalog**: products read from the remote `products` collection
//! - **Cart**: line items persisted under a single local key
//! - **Order**: the snapshot submitted at checkout
//!
//! # Example
//!
//! ```rust,ignore
//! use mutajary_cache::MemoryBackend;
//! use mutajary_commerce::prelude::*;
//!
//! let store = CartStore::new(MemoryBackend::new());
//! store.add_to_cart(&ProductId::new("p1"), "Argan oil", Price::from_cents(12_000));
//!
//! let cart = store.get_cart();
//! println!("Total: {}", cart.total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod order;

pub use cart::{Cart, CartItem, CartStore, DEFAULT_CART_KEY};
pub use catalog::Product;
pub use error::CommerceError;
pub use ids::*;
pub use money::Price;
pub use order::{CustomerDetails, Order};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartItem, CartStore, DEFAULT_CART_KEY};
    pub use crate::catalog::Product;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Price;
    pub use crate::order::{CustomerDetails, Order};
}

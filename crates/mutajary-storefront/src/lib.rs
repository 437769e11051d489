//! Storefront flows for Mutajary: catalog listing, cart display and
//! checkout.
//!
//! Everything renders into a [`Page`], which exposes elements by id plus
//! alerts and navigation. [`MemoryPage`] is the in-process implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use mutajary_storefront::prelude::*;
//!
//! let mut config = StorefrontConfig::discover(&std::env::current_dir()?)?;
//! config.apply_env_overrides();
//! let shop = config.storefront()?;
//!
//! let mut page = MemoryPage::products();
//! let products = shop.fetch_products(&mut page).await;
//!
//! let mut checkout = MemoryPage::checkout("Amina", "amina@example.com", "Rabat");
//! let receipt = shop.place_order(&mut checkout).await?;
//! ```

pub mod cart_view;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod locale;
pub mod page;
mod storefront;

pub use checkout::OrderReceipt;
pub use config::{
    ConfigError, ConfiguredCart, ConfiguredStorefront, StorefrontConfig, Validation,
};
pub use locale::Locale;
pub use page::{MemoryPage, Page};
pub use storefront::{
    Storefront, StorefrontSettings, DEFAULT_CONFIRMATION_PAGE, DEFAULT_RELAY_SUBJECT,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::checkout::OrderReceipt;
    pub use crate::config::{ConfigError, StorefrontConfig};
    pub use crate::locale::Locale;
    pub use crate::page::{MemoryPage, Page};
    pub use crate::storefront::{Storefront, StorefrontSettings};
    pub use mutajary_commerce::prelude::*;
}

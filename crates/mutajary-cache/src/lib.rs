//! Type-safe key-value storage for the Mutajary storefront.
//!
//! A [`Cache`] wraps any [`KvBackend`] and adds JSON serialization on top of
//! raw byte storage. Backends:
//!
//! - [`MemoryBackend`]: process-local map, used by tests.
//! - [`FileBackend`]: one file per key under a data directory, the local
//!   counterpart of browser storage.
//! - `SpinBackend` (`wasm32` only): Spin's Key-Value Store.
//!
//! # Example
//!
//! ```rust,ignore
//! use mutajary_cache::{Cache, FileBackend};
//!
//! let cache = Cache::new(FileBackend::open("/var/lib/mutajary")?);
//!
//! cache.set("cart", &items)?;
//! let items: Option<Vec<CartItem>> = cache.get("cart")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
#[cfg(target_arch = "wasm32")]
pub use backend::SpinBackend;
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}

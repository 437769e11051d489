//! Persisted cart.

use mutajary_cache::{Cache, KvBackend};

use super::{Cart, CartItem};
use crate::ids::ProductId;
use crate::money::Price;

/// Default storage key for the cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Reads and writes the cart under a single key.
///
/// Nothing here fails outward: unreadable data loads as an empty cart and
/// write failures are logged.
#[derive(Debug)]
pub struct CartStore<B> {
    cache: Cache<B>,
    key: String,
}

impl<B: KvBackend> CartStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_CART_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(backend),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        self.cache.backend()
    }

    /// The persisted cart, or an empty one if there is none or it can't be
    /// read.
    pub fn get_cart(&self) -> Cart {
        match self.cache.get::<Cart>(&self.key) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "discarding unreadable cart");
                Cart::new()
            }
        }
    }

    /// Overwrite the persisted cart.
    pub fn save_cart(&self, cart: &Cart) {
        if let Err(e) = self.cache.set(&self.key, cart) {
            tracing::error!(key = %self.key, error = %e, "failed to save cart");
        }
    }

    /// Add one unit of a product and persist. Returns the updated line.
    pub fn add_to_cart(&self, id: &ProductId, name: &str, price: Price) -> CartItem {
        let mut cart = self.get_cart();
        let item = cart.add(id, name, price).clone();
        self.save_cart(&cart);
        tracing::debug!(product_id = %id, quantity = item.quantity, "added to cart");
        item
    }

    /// Remove a product's line and persist. An absent id writes nothing and
    /// returns `false`.
    pub fn remove_from_cart(&self, id: &ProductId) -> bool {
        let mut cart = self.get_cart();
        if !cart.remove(id) {
            return false;
        }
        self.save_cart(&cart);
        tracing::debug!(product_id = %id, "removed from cart");
        true
    }

    pub fn clear_cart(&self) {
        self.save_cart(&Cart::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutajary_cache::{CacheError, MemoryBackend};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    /// Counts writes on top of a memory backend.
    #[derive(Default)]
    struct CountingBackend {
        inner: MemoryBackend,
        writes: AtomicUsize,
    }

    impl KvBackend for CountingBackend {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }
    }

    struct ReadOnlyBackend;

    impl KvBackend for ReadOnlyBackend {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_empty_when_absent() {
        let store = CartStore::new(MemoryBackend::new());
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn test_corrupted_data_reads_as_empty() {
        let backend = MemoryBackend::new();
        backend.set("cart", b"{not json").unwrap();
        let store = CartStore::new(backend);
        assert!(store.get_cart().is_empty());

        store.backend().set("cart", br#"{"id":"p1"}"#).unwrap();
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn test_zero_quantity_lines_are_dropped() {
        let backend = MemoryBackend::new();
        backend
            .set(
                "cart",
                br#"[{"id":"a","name":"A","price":5,"quantity":0},{"id":"b","name":"B","price":2,"quantity":1}]"#,
            )
            .unwrap();
        let store = CartStore::new(backend);

        let cart = store.get_cart();
        assert_eq!(cart.items(), &[CartItem::new("b", "B", Price::from_cents(200))]);
        assert_eq!(cart.total(), Price::from_cents(200));

        store
            .backend()
            .set("cart", br#"[{"id":"a","name":"A","price":5,"quantity":0}]"#)
            .unwrap();
        assert!(store.get_cart().is_empty());
    }

    #[test]
    fn test_add_persists() {
        let store = CartStore::new(MemoryBackend::new());
        store.add_to_cart(&pid("p1"), "Tea", Price::from_cents(1000));
        let item = store.add_to_cart(&pid("p1"), "Tea", Price::from_cents(1000));
        assert_eq!(item.quantity, 2);

        let raw = store.backend().get("cart").unwrap().unwrap();
        assert_eq!(
            String::from_utf8(raw).unwrap(),
            r#"[{"id":"p1","name":"Tea","price":10,"quantity":2}]"#
        );
    }

    #[test]
    fn test_reads_existing_array() {
        let backend = MemoryBackend::new();
        backend
            .set("cart", br#"[{"id":"p1","name":"X","price":20,"quantity":2}]"#)
            .unwrap();
        let store = CartStore::new(backend);

        let cart = store.get_cart();
        assert_eq!(cart.items(), &[CartItem::new("p1", "X", Price::from_cents(2000)).with_quantity(2)]);
        assert_eq!(cart.total(), Price::from_cents(4000));
    }

    #[test]
    fn test_remove_only_target() {
        let store = CartStore::new(MemoryBackend::new());
        store.add_to_cart(&pid("a"), "A", Price::from_cents(100));
        store.add_to_cart(&pid("b"), "B", Price::from_cents(200));
        store.add_to_cart(&pid("b"), "B", Price::from_cents(200));

        assert!(store.remove_from_cart(&pid("a")));
        assert_eq!(
            store.get_cart().items(),
            &[CartItem::new("b", "B", Price::from_cents(200)).with_quantity(2)]
        );
    }

    #[test]
    fn test_remove_absent_writes_nothing() {
        let store = CartStore::new(CountingBackend::default());
        store.add_to_cart(&pid("a"), "A", Price::from_cents(100));
        let writes = store.backend().writes.load(Ordering::SeqCst);

        assert!(!store.remove_from_cart(&pid("missing")));
        assert_eq!(store.backend().writes.load(Ordering::SeqCst), writes);
        assert_eq!(store.get_cart().len(), 1);
    }

    #[test]
    fn test_clear_cart() {
        let store = CartStore::with_key(MemoryBackend::new(), "shop-cart");
        store.add_to_cart(&pid("a"), "A", Price::from_cents(100));
        store.clear_cart();

        assert!(store.get_cart().is_empty());
        let raw = store.backend().get("shop-cart").unwrap().unwrap();
        assert_eq!(raw, b"[]");
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let store = CartStore::new(ReadOnlyBackend);
        let item = store.add_to_cart(&pid("a"), "A", Price::from_cents(100));
        assert_eq!(item.quantity, 1);
        assert!(store.get_cart().is_empty());
    }
}

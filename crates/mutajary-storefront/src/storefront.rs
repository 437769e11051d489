//! Storefront facade.

use mutajary_cache::KvBackend;
use mutajary_commerce::{CartItem, CartStore, CommerceError, Price, Product, ProductId};
use mutajary_data::docstore::DocumentStore;
use mutajary_data::relay::EmailRelay;
use serde::{Deserialize, Serialize};

use crate::checkout::OrderReceipt;
use crate::locale::Locale;
use crate::page::Page;
use crate::{cart_view, catalog, checkout};

/// Default email subject for order notifications.
pub const DEFAULT_RELAY_SUBJECT: &str = "طلب جديد من متجري";

/// Default page shown after checkout.
pub const DEFAULT_CONFIRMATION_PAGE: &str = "confirmation.html";

/// Collection names and checkout destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontSettings {
    pub products_collection: String,
    pub orders_collection: String,
    pub relay_subject: String,
    pub confirmation_page: String,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            products_collection: "products".to_string(),
            orders_collection: "orders".to_string(),
            relay_subject: DEFAULT_RELAY_SUBJECT.to_string(),
            confirmation_page: DEFAULT_CONFIRMATION_PAGE.to_string(),
        }
    }
}

/// The storefront's page actions over a cart, a document store and an
/// optional email relay.
pub struct Storefront<B, S, R> {
    cart: CartStore<B>,
    store: S,
    relay: Option<R>,
    settings: StorefrontSettings,
    locale: Locale,
}

impl<B, S, R> Storefront<B, S, R>
where
    B: KvBackend,
    S: DocumentStore,
    R: EmailRelay,
{
    pub fn new(cart: CartStore<B>, store: S, relay: Option<R>) -> Self {
        Self {
            cart,
            store,
            relay,
            settings: StorefrontSettings::default(),
            locale: Locale::default(),
        }
    }

    pub fn with_settings(mut self, settings: StorefrontSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn cart(&self) -> &CartStore<B> {
        &self.cart
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn relay(&self) -> Option<&R> {
        self.relay.as_ref()
    }

    pub fn settings(&self) -> &StorefrontSettings {
        &self.settings
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Load and render the catalog.
    pub async fn fetch_products<P: Page + ?Sized>(&self, page: &mut P) -> Vec<Product> {
        catalog::fetch_products(
            &self.store,
            &self.settings.products_collection,
            page,
            &self.locale,
        )
        .await
    }

    /// Look a product up by id in the catalog.
    pub async fn find_product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        let documents = self.store.list(&self.settings.products_collection).await?;
        let document = documents
            .iter()
            .find(|doc| doc.id == id.as_str())
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        Product::from_document(document)
    }

    /// Add one unit to the cart and confirm with an alert.
    pub fn add_to_cart<P: Page + ?Sized>(
        &self,
        page: &mut P,
        id: &ProductId,
        name: &str,
        price: Price,
    ) -> CartItem {
        let item = self.cart.add_to_cart(id, name, price);
        page.alert(&self.locale.added_to_cart);
        item
    }

    /// Remove a line from the cart and re-render it. Absent ids change
    /// nothing.
    pub fn remove_from_cart<P: Page + ?Sized>(&self, page: &mut P, id: &ProductId) -> bool {
        let removed = self.cart.remove_from_cart(id);
        if removed {
            self.render_cart(page);
        }
        removed
    }

    pub fn render_cart<P: Page + ?Sized>(&self, page: &mut P) -> Option<Price> {
        cart_view::render_cart(&self.cart, page, &self.locale)
    }

    /// Submit the cart as an order. See [`checkout::place_order`].
    pub async fn place_order<P: Page + ?Sized>(
        &self,
        page: &mut P,
    ) -> Result<OrderReceipt, CommerceError> {
        checkout::place_order(
            &self.cart,
            &self.store,
            self.relay.as_ref(),
            &self.settings,
            page,
            &self.locale,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{MemoryPage, CART_ITEMS, CART_TOTAL};
    use mutajary_cache::MemoryBackend;
    use mutajary_data::docstore::{Document, FieldValue, Fields, MemoryDocumentStore};
    use mutajary_data::relay::FormRelay;

    fn storefront() -> Storefront<MemoryBackend, MemoryDocumentStore, FormRelay> {
        let mut fields = Fields::new();
        fields.insert("name".into(), "Argan oil".into());
        fields.insert("price".into(), FieldValue::Integer(120));
        let store = MemoryDocumentStore::new()
            .with_documents("products", vec![Document::new("p1", fields)]);
        Storefront::new(CartStore::new(MemoryBackend::new()), store, None)
    }

    #[test]
    fn test_add_alerts() {
        let shop = storefront();
        let mut page = MemoryPage::products();
        let id = ProductId::new("p1");

        shop.add_to_cart(&mut page, &id, "Argan oil", Price::from_cents(12_000));
        let item = shop.add_to_cart(&mut page, &id, "Argan oil", Price::from_cents(12_000));

        assert_eq!(item.quantity, 2);
        assert_eq!(page.alerts().len(), 2);
        assert_eq!(page.alerts()[0], "تم إضافة المنتج إلى السلة");
    }

    #[test]
    fn test_remove_rerenders() {
        let shop = storefront();
        let mut page = MemoryPage::cart();
        shop.add_to_cart(&mut page, &ProductId::new("a"), "A", Price::from_cents(1000));
        shop.add_to_cart(&mut page, &ProductId::new("b"), "B", Price::from_cents(500));

        assert!(shop.remove_from_cart(&mut page, &ProductId::new("a")));
        assert_eq!(page.inner_html(CART_TOTAL), Some("الإجمالي: 5 درهم"));
        assert!(!page.inner_html(CART_ITEMS).unwrap().contains(r#"data-id="a""#));
    }

    #[test]
    fn test_remove_absent_does_not_render() {
        let shop = storefront();
        let mut page = MemoryPage::cart();

        assert!(!shop.remove_from_cart(&mut page, &ProductId::new("zzz")));
        assert_eq!(page.inner_html(CART_TOTAL), Some(""));
        assert_eq!(shop.cart().backend().get("cart").unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_product() {
        let shop = storefront();
        let product = shop.find_product(&ProductId::new("p1")).await.unwrap();
        assert_eq!(product.price, Price::from_cents(12_000));

        let missing = shop.find_product(&ProductId::new("p9")).await;
        assert!(matches!(missing, Err(CommerceError::ProductNotFound(ref id)) if id == "p9"));
    }

    #[tokio::test]
    async fn test_fetch_uses_configured_collection() {
        let shop = storefront().with_settings(StorefrontSettings {
            products_collection: "catalog".to_string(),
            ..StorefrontSettings::default()
        });
        let mut page = MemoryPage::products();
        assert!(shop.fetch_products(&mut page).await.is_empty());
    }
}

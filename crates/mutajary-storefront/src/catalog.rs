//! Catalog rendering.

use mutajary_commerce::Product;
use mutajary_data::docstore::DocumentStore;

use crate::locale::Locale;
use crate::page::{escape_html, Page, PRODUCT_LIST};

/// Load every product in `collection` and render a card for each into
/// `product-list`.
///
/// A failed fetch is logged and leaves the page as it was. Documents that
/// are not valid products are skipped. The decoded products are returned
/// even when the page has no `product-list`.
pub async fn fetch_products<S, P>(
    store: &S,
    collection: &str,
    page: &mut P,
    locale: &Locale,
) -> Vec<Product>
where
    S: DocumentStore + ?Sized,
    P: Page + ?Sized,
{
    let documents = match store.list(collection).await {
        Ok(documents) => documents,
        Err(e) => {
            tracing::error!(collection, error = %e, "failed to fetch products");
            return Vec::new();
        }
    };

    let products: Vec<Product> = documents
        .iter()
        .filter_map(|doc| match Product::from_document(doc) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(document_id = %doc.id, error = %e, "skipping product");
                None
            }
        })
        .collect();

    if !page.has_element(PRODUCT_LIST) {
        tracing::debug!("no product list on page");
        return products;
    }

    page.set_inner_html(PRODUCT_LIST, "");
    for product in &products {
        page.append_html(PRODUCT_LIST, &render_product_card(product, locale));
    }
    tracing::info!(count = products.len(), "rendered products");

    products
}

/// Render a product card. The add button carries the product's id, name
/// and price in `data-*` attributes.
pub fn render_product_card(product: &Product, locale: &Locale) -> String {
    let name = escape_html(&product.name);
    let price = product.price.display_amount();

    format!(
        r#"<div class="product-card" data-product-id="{id}">
    <img src="{image}" alt="{name}">
    <h3>{name}</h3>
    <p class="price">{label}</p>
    <button class="add-to-cart" data-id="{id}" data-name="{name}" data-price="{price}">{button}</button>
</div>"#,
        id = escape_html(product.id.as_str()),
        image = escape_html(product.image.as_deref().unwrap_or_default()),
        name = name,
        label = escape_html(&locale.money(&price)),
        price = price,
        button = escape_html(&locale.add_to_cart),
    )
}

//! Cart rendering.

use mutajary_cache::KvBackend;
use mutajary_commerce::{CartItem, CartStore, Price};

use crate::locale::Locale;
use crate::page::{escape_html, Page, CART_ITEMS, CART_TOTAL};

/// Render the persisted cart into `cart-items` and `cart-total`.
///
/// Does nothing unless both elements exist. Returns the total that was
/// displayed.
pub fn render_cart<B, P>(cart_store: &CartStore<B>, page: &mut P, locale: &Locale) -> Option<Price>
where
    B: KvBackend,
    P: Page + ?Sized,
{
    if !page.has_element(CART_ITEMS) || !page.has_element(CART_TOTAL) {
        return None;
    }

    let cart = cart_store.get_cart();
    let total = cart.total();

    page.set_inner_html(CART_ITEMS, "");
    for item in cart.items() {
        page.append_html(CART_ITEMS, &render_cart_row(item, locale));
    }
    page.set_text(
        CART_TOTAL,
        &Locale::labelled(&locale.total, locale.money(total)),
    );

    Some(total)
}

/// Render one line item with its remove button.
pub fn render_cart_row(item: &CartItem, locale: &Locale) -> String {
    let line_total = item.line_total();

    format!(
        r#"<div class="cart-item">
    <span>{name}</span>
    <span>{quantity}</span>
    <span>{price}</span>
    <button class="remove-from-cart" data-id="{id}">{remove}</button>
</div>"#,
        name = escape_html(&item.name),
        quantity = escape_html(&Locale::labelled(&locale.quantity, item.quantity)),
        price = escape_html(&Locale::labelled(&locale.price, locale.money(line_total))),
        id = escape_html(item.id.as_str()),
        remove = escape_html(&locale.remove),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use mutajary_cache::MemoryBackend;
    use mutajary_commerce::ProductId;

    fn store_with(items: &[(&str, &str, u64, u32)]) -> CartStore<MemoryBackend> {
        let store = CartStore::new(MemoryBackend::new());
        for (id, name, cents, quantity) in items {
            for _ in 0..*quantity {
                store.add_to_cart(&ProductId::new(*id), name, Price::from_cents(*cents));
            }
        }
        store
    }

    #[test]
    fn test_renders_rows_and_total() {
        let store = store_with(&[("a", "Tea", 1000, 2), ("b", "Oil", 500, 3)]);
        let mut page = MemoryPage::cart();

        let total = render_cart(&store, &mut page, &Locale::default());

        assert_eq!(total, Some(Price::from_cents(3500)));
        assert_eq!(page.inner_html(CART_TOTAL), Some("الإجمالي: 35 درهم"));
        let rows = page.inner_html(CART_ITEMS).unwrap();
        assert_eq!(rows.matches(r#"class="cart-item""#).count(), 2);
        assert!(rows.contains("<span>الكمية: 2</span>"));
        assert!(rows.contains("<span>السعر: 20 درهم</span>"));
        assert!(rows.contains("<span>السعر: 15 درهم</span>"));
        assert!(rows.contains(r#"data-id="b">إزالة</button>"#));
    }

    #[test]
    fn test_empty_cart() {
        let store = store_with(&[]);
        let mut page = MemoryPage::cart();
        page.set_inner_html(CART_ITEMS, "<div>stale</div>");

        assert_eq!(render_cart(&store, &mut page, &Locale::default()), Some(Price::ZERO));
        assert_eq!(page.inner_html(CART_ITEMS), Some(""));
        assert_eq!(page.inner_html(CART_TOTAL), Some("الإجمالي: 0 درهم"));
    }

    #[test]
    fn test_requires_both_regions() {
        let store = store_with(&[("a", "Tea", 1000, 1)]);
        let mut page = MemoryPage::new().with_element(CART_ITEMS);

        assert_eq!(render_cart(&store, &mut page, &Locale::default()), None);
        assert_eq!(page.inner_html(CART_ITEMS), Some(""));
    }

    #[test]
    fn test_oversized_cart_still_renders() {
        let store = CartStore::new(MemoryBackend::new());
        store
            .backend()
            .set(
                "cart",
                br#"[{"id":"a","name":"A","price":100000000000000,"quantity":1000000}]"#,
            )
            .unwrap();
        let mut page = MemoryPage::cart();
        page.set_inner_html(CART_ITEMS, "<div>stale</div>");

        let total = render_cart(&store, &mut page, &Locale::default());

        assert_eq!(total, Some(Price::from_cents(u64::MAX)));
        let rows = page.inner_html(CART_ITEMS).unwrap();
        assert!(!rows.contains("stale"));
        assert!(rows.contains(r#"data-id="a""#));
    }

    #[test]
    fn test_row_escapes_name() {
        let item = CartItem::new("x", "<script>", Price::from_cents(150));
        let html = render_cart_row(&item, &Locale::default());
        assert!(html.contains("<span>&lt;script&gt;</span>"));
        assert!(html.contains("السعر: 1.5 درهم"));
    }
}

//! The page the storefront renders into.
//!
//! Renderers only touch elements by id. Every mutating call reports whether
//! the element existed, and a missing element is never an error.

use std::collections::BTreeMap;

/// Product card container on the catalog page.
pub const PRODUCT_LIST: &str = "product-list";
/// Line item container on the cart page.
pub const CART_ITEMS: &str = "cart-items";
/// Total line on the cart page.
pub const CART_TOTAL: &str = "cart-total";
/// Checkout form inputs.
pub const NAME_INPUT: &str = "name";
pub const EMAIL_INPUT: &str = "email";
pub const ADDRESS_INPUT: &str = "address";

/// Element access, alerts and navigation for one page.
pub trait Page {
    fn has_element(&self, id: &str) -> bool;

    /// Replace an element's markup.
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;

    /// Append markup after an element's existing children.
    fn append_html(&mut self, id: &str, html: &str) -> bool;

    /// Replace an element's content with plain text.
    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Current value of a form input.
    fn input_value(&self, id: &str) -> Option<String>;

    /// Show a blocking notification.
    fn alert(&mut self, message: &str);

    /// Leave for another page.
    fn navigate(&mut self, path: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Element {
    html: String,
    value: Option<String>,
}

/// A page held in memory. Records alerts and navigation so callers can
/// inspect what happened.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: BTreeMap<String, Element>,
    alerts: Vec<String>,
    location: Option<String>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog page with an empty `product-list`.
    pub fn products() -> Self {
        Self::new().with_element(PRODUCT_LIST)
    }

    /// Cart page with `cart-items` and `cart-total`.
    pub fn cart() -> Self {
        Self::new().with_element(CART_ITEMS).with_element(CART_TOTAL)
    }

    /// Checkout form with its three inputs filled in.
    pub fn checkout(name: &str, email: &str, address: &str) -> Self {
        Self::new()
            .with_input(NAME_INPUT, name)
            .with_input(EMAIL_INPUT, email)
            .with_input(ADDRESS_INPUT, address)
    }

    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.entry(id.to_string()).or_default();
        self
    }

    pub fn with_input(mut self, id: &str, value: &str) -> Self {
        self.elements.entry(id.to_string()).or_default().value = Some(value.to_string());
        self
    }

    /// Markup of an element, if it exists.
    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.html.as_str())
    }

    /// Alerts shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Where the page navigated to, if anywhere.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.html = html.to_string();
                true
            }
            None => false,
        }
    }

    fn append_html(&mut self, id: &str, html: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.html.push_str(html);
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.set_inner_html(id, &escape_html(text))
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.elements.get(id).and_then(|e| e.value.clone())
    }

    fn alert(&mut self, message: &str) {
        tracing::debug!(text = message, "alert");
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "navigate");
        self.location = Some(path.to_string());
    }
}

/// Escape text for use in element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_elements_are_ignored() {
        let mut page = MemoryPage::new();
        assert!(!page.set_inner_html(PRODUCT_LIST, "<p>x</p>"));
        assert!(!page.append_html(CART_ITEMS, "<p>x</p>"));
        assert!(!page.set_text(CART_TOTAL, "x"));
        assert_eq!(page.inner_html(PRODUCT_LIST), None);
    }

    #[test]
    fn test_append_and_replace() {
        let mut page = MemoryPage::products();
        page.append_html(PRODUCT_LIST, "<a>");
        page.append_html(PRODUCT_LIST, "<b>");
        assert_eq!(page.inner_html(PRODUCT_LIST), Some("<a><b>"));

        page.set_inner_html(PRODUCT_LIST, "");
        assert_eq!(page.inner_html(PRODUCT_LIST), Some(""));
    }

    #[test]
    fn test_set_text_escapes() {
        let mut page = MemoryPage::cart();
        page.set_text(CART_TOTAL, "<b>&</b>");
        assert_eq!(page.inner_html(CART_TOTAL), Some("&lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_inputs_alerts_navigation() {
        let mut page = MemoryPage::checkout("Amina", "a@example.com", "Rabat");
        assert_eq!(page.input_value(NAME_INPUT).as_deref(), Some("Amina"));
        assert_eq!(page.input_value("phone"), None);

        page.alert("hello");
        page.navigate("confirmation.html");
        assert_eq!(page.alerts(), ["hello".to_string()]);
        assert_eq!(page.location(), Some("confirmation.html"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'>&"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt;&amp;"
        );
    }
}

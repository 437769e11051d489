//! Order submission.

use chrono::Utc;
use mutajary_cache::KvBackend;
use mutajary_commerce::{CartStore, CommerceError, CustomerDetails, Order, OrderId};
use mutajary_data::docstore::DocumentStore;
use mutajary_data::relay::EmailRelay;
use mutajary_data::{RelayError, StoreError};

use crate::locale::Locale;
use crate::page::{Page, ADDRESS_INPUT, EMAIL_INPUT, NAME_INPUT};
use crate::StorefrontSettings;

/// What happened to a submitted order.
///
/// Storing and relaying are independent; either may fail without
/// stopping checkout.
#[derive(Debug)]
pub struct OrderReceipt {
    pub order: Order,
    /// Id of the stored order document.
    pub stored: Result<OrderId, StoreError>,
    pub relayed: Result<(), RelayError>,
}

impl OrderReceipt {
    /// Both the store and the relay accepted the order.
    pub fn is_complete(&self) -> bool {
        self.stored.is_ok() && self.relayed.is_ok()
    }
}

/// Read the customer details from the checkout form. Missing inputs read
/// as empty.
pub fn read_customer<P: Page + ?Sized>(page: &P) -> CustomerDetails {
    let field = |id: &str| page.input_value(id).unwrap_or_default();
    CustomerDetails::new(&field(NAME_INPUT), &field(EMAIL_INPUT), &field(ADDRESS_INPUT))
}

/// Submit the cart as an order.
///
/// An empty cart raises an alert and returns [`CommerceError::EmptyCart`]
/// without touching the network. Otherwise the order is stored, then
/// relayed, then the cart is cleared and the page navigates to the
/// confirmation page whatever the outcome of the first two steps.
pub async fn place_order<B, S, R, P>(
    cart_store: &CartStore<B>,
    store: &S,
    relay: Option<&R>,
    settings: &StorefrontSettings,
    page: &mut P,
    locale: &Locale,
) -> Result<OrderReceipt, CommerceError>
where
    B: KvBackend,
    S: DocumentStore + ?Sized,
    R: EmailRelay + ?Sized,
    P: Page + ?Sized,
{
    let customer = read_customer(page);
    let cart = cart_store.get_cart();
    if cart.is_empty() {
        page.alert(&locale.empty_cart);
        return Err(CommerceError::EmptyCart);
    }

    let order = Order::new(customer, &cart, Utc::now())?;
    tracing::info!(items = order.items.len(), total = %order.total, "placing order");

    let stored = store
        .add(&settings.orders_collection, order.to_fields())
        .await
        .map(OrderId::new);
    match &stored {
        Ok(id) => tracing::info!(order_id = %id, "order stored"),
        Err(e) => tracing::error!(error = %e, "failed to store order"),
    }

    let relayed = send_notification(&order, relay, &settings.relay_subject).await;
    if let Err(e) = &relayed {
        tracing::error!(error = %e, "failed to send order email");
    }

    cart_store.clear_cart();
    page.navigate(&settings.confirmation_page);

    Ok(OrderReceipt {
        order,
        stored,
        relayed,
    })
}

async fn send_notification<R: EmailRelay + ?Sized>(
    order: &Order,
    relay: Option<&R>,
    subject: &str,
) -> Result<(), RelayError> {
    let relay = relay.ok_or_else(|| RelayError::Config("no relay endpoint configured".to_string()))?;
    let message = order
        .relay_message(subject)
        .map_err(|e| RelayError::Encode(e.to_string()))?;
    relay.send(&message).await
}

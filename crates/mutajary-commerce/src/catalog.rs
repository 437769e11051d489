//! Product catalog types.

use mutajary_data::docstore::Document;
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Price;
use crate::CommerceError;

/// A product in the catalog.
///
/// Products are owned by the remote store; the storefront only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: Option<String>,
}

/// Document body of a product; the id lives outside the fields.
#[derive(Debug, Deserialize)]
struct ProductFields {
    name: String,
    price: Price,
    #[serde(default)]
    image: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Read a product from a `products` document.
    ///
    /// An empty `image` string counts as no image.
    pub fn from_document(document: &Document) -> Result<Self, CommerceError> {
        let fields: ProductFields =
            document
                .decode()
                .map_err(|e| CommerceError::InvalidProduct {
                    id: document.id.clone(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            id: ProductId::new(document.id.clone()),
            name: fields.name,
            price: fields.price,
            image: fields.image.filter(|url| !url.trim().is_empty()),
        })
    }
}

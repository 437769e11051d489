//! Form-to-email relay.
//!
//! The relay accepts a flat JSON form and forwards it as an email. The
//! `_subject` field sets the email subject line.

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::{FetchClient, RelayError};

/// An order notification as posted to the relay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayMessage {
    #[serde(rename = "_subject")]
    pub subject: String,
    pub name: String,
    pub email: String,
    pub address: String,
    /// Line items serialized as a JSON string.
    pub items: String,
    pub total: serde_json::Number,
}

/// Delivers relay messages.
#[async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send(&self, message: &RelayMessage) -> Result<(), RelayError>;
}

/// Relay that posts JSON to a FormSubmit-style AJAX endpoint.
#[derive(Debug, Clone)]
pub struct FormRelay {
    fetch: FetchClient,
    endpoint: Url,
}

impl FormRelay {
    /// Create a relay for `endpoint`, which must be an absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self, RelayError> {
        Self::with_fetch_client(FetchClient::new(), endpoint)
    }

    pub fn with_fetch_client(fetch: FetchClient, endpoint: &str) -> Result<Self, RelayError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| RelayError::Config(format!("endpoint {endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RelayError::Config(format!(
                "endpoint {endpoint} must use http or https"
            )));
        }
        Ok(Self { fetch, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EmailRelay for FormRelay {
    async fn send(&self, message: &RelayMessage) -> Result<(), RelayError> {
        let response = self
            .fetch
            .post(self.endpoint.as_str())
            .accept("application/json")
            .json(message)?
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(
            endpoint = %self.endpoint,
            status = response.status,
            "relay accepted message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> RelayMessage {
        RelayMessage {
            subject: "طلب جديد من متجري".to_string(),
            name: "Amina".to_string(),
            email: "amina@example.com".to_string(),
            address: "12 Rue Tarik, Rabat".to_string(),
            items: r#"[{"id":"p1","name":"X","price":20,"quantity":2}]"#.to_string(),
            total: 40.into(),
        }
    }

    #[test]
    fn test_message_wire_shape() {
        assert_eq!(
            serde_json::to_value(message()).unwrap(),
            json!({
                "_subject": "طلب جديد من متجري",
                "name": "Amina",
                "email": "amina@example.com",
                "address": "12 Rue Tarik, Rabat",
                "items": r#"[{"id":"p1","name":"X","price":20,"quantity":2}]"#,
                "total": 40
            })
        );
    }

    #[test]
    fn test_endpoint_validation() {
        assert!(FormRelay::new("https://formsubmit.co/ajax/shop@example.com").is_ok());
        assert!(matches!(
            FormRelay::new("not a url"),
            Err(RelayError::Config(_))
        ));
        assert!(matches!(
            FormRelay::new("ftp://example.com/drop"),
            Err(RelayError::Config(_))
        ));
    }
}

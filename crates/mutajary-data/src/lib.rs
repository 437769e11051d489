//! Outbound clients for the Mutajary storefront.
//!
//! - [`FetchClient`]: builder-style HTTP client. Sends through `reqwest`
//!   natively and through Spin's outbound HTTP on `wasm32`.
//! - [`docstore`]: the remote document store holding products and orders,
//!   with a Firestore REST implementation.
//! - [`relay`]: the form-to-email relay notified of new orders.
//!
//! # Example
//!
//! ```rust,ignore
//! use mutajary_data::FetchClient;
//!
//! let client = FetchClient::new();
//! let ack: serde_json::Value = client
//!     .post("https://formsubmit.co/ajax/orders@example.com")
//!     .accept("application/json")
//!     .json(&message)?
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

pub mod docstore;
mod error;
pub mod relay;
mod request;
mod response;

pub use error::{FetchError, RelayError, StoreError};
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::HashMap;

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            builder: RequestBuilder::new(method, url),
            #[cfg(not(target_arch = "wasm32"))]
            http: self.http.clone(),
        }
    }
}

/// A request builder bound to a client.
#[derive(Debug)]
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl ClientRequestBuilder {
    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// Inspect the request that would be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        let url = reqwest::Url::parse(&url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http.request(method, url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?
            .to_vec();

        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body))
    }

    /// Send the request and return the response.
    #[cfg(target_arch = "wasm32")]
    pub async fn send(self) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match self.builder.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
        };

        let mut request = Request::builder();
        request.method(method);
        request.uri(self.builder.url.as_str());
        for (key, value) in &self.builder.headers {
            request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request.body(body);
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(request.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        let body = response.body().to_vec();

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::docstore::{Document, DocumentStore, FieldValue, Fields};
    pub use crate::relay::{EmailRelay, RelayMessage};
    pub use crate::{FetchClient, FetchError, Method, RelayError, Response, StoreError};
}

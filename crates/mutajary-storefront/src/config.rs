//! Storefront configuration.
//!
//! Read from `mutajary.toml`, `.mutajary.toml` or `mutajary.json`. A few
//! settings, credentials in particular, can be overridden from the
//! environment:
//!
//! | Variable                  | Setting            |
//! |---------------------------|--------------------|
//! | `MUTAJARY_API_KEY`        | `docstore.api_key` |
//! | `MUTAJARY_PROJECT_ID`     | `docstore.project_id` |
//! | `MUTAJARY_RELAY_ENDPOINT` | `relay.endpoint`   |
//! | `MUTAJARY_DATA_DIR`       | `cart.data_dir`    |

use std::path::{Path, PathBuf};

use mutajary_cache::{CacheError, FileBackend};
use mutajary_commerce::{CartStore, DEFAULT_CART_KEY};
use mutajary_data::docstore::{FirestoreClient, FirestoreConfig, DEFAULT_FIRESTORE_URL};
use mutajary_data::relay::FormRelay;
use mutajary_data::{RelayError, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale::{Locale, DEFAULT_CURRENCY};
use crate::storefront::{
    Storefront, StorefrontSettings, DEFAULT_CONFIRMATION_PAGE, DEFAULT_RELAY_SUBJECT,
};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["mutajary.toml", ".mutajary.toml", "mutajary.json"];

pub const ENV_API_KEY: &str = "MUTAJARY_API_KEY";
pub const ENV_PROJECT_ID: &str = "MUTAJARY_PROJECT_ID";
pub const ENV_RELAY_ENDPOINT: &str = "MUTAJARY_RELAY_ENDPOINT";
pub const ENV_DATA_DIR: &str = "MUTAJARY_DATA_DIR";

/// The cart as built from configuration.
pub type ConfiguredCart = CartStore<FileBackend>;

/// The storefront as built from configuration.
pub type ConfiguredStorefront = Storefront<FileBackend, FirestoreClient, FormRelay>;

/// Errors raised while loading configuration or building services from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Cart storage error: {0}")]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub docstore: DocstoreSection,

    #[serde(default)]
    pub relay: RelaySection,

    #[serde(default)]
    pub cart: CartSection,

    #[serde(default)]
    pub pages: PagesSection,
}

/// Shop identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency label shown after amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_store_name() -> String {
    "متجري".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            currency: default_currency(),
        }
    }
}

/// Remote document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocstoreSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_products_collection")]
    pub products_collection: String,

    #[serde(default = "default_orders_collection")]
    pub orders_collection: String,
}

fn default_base_url() -> String {
    DEFAULT_FIRESTORE_URL.to_string()
}

fn default_products_collection() -> String {
    "products".to_string()
}

fn default_orders_collection() -> String {
    "orders".to_string()
}

impl Default for DocstoreSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            project_id: String::new(),
            api_key: None,
            products_collection: default_products_collection(),
            orders_collection: default_orders_collection(),
        }
    }
}

/// Order notification relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_subject() -> String {
    DEFAULT_RELAY_SUBJECT.to_string()
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            endpoint: None,
            subject: default_subject(),
        }
    }
}

/// Local cart storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSection {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory holding the cart file. Defaults to
    /// `$HOME/.local/share/mutajary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for CartSection {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagesSection {
    #[serde(default = "default_confirmation")]
    pub confirmation: String,
}

fn default_confirmation() -> String {
    DEFAULT_CONFIRMATION_PAGE.to_string()
}

impl Default for PagesSection {
    fn default() -> Self {
        Self {
            confirmation: default_confirmation(),
        }
    }
}

/// Problems found by [`StorefrontConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Save config to a file in the format its extension implies.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find the nearest config file, walking up from `start`.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load the nearest config file, or defaults when there is none.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match Self::find(start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply `MUTAJARY_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.docstore.api_key = Some(key);
        }
        if let Some(project) = get(ENV_PROJECT_ID) {
            self.docstore.project_id = project;
        }
        if let Some(endpoint) = get(ENV_RELAY_ENDPOINT) {
            self.relay.endpoint = Some(endpoint);
        }
        if let Some(dir) = get(ENV_DATA_DIR) {
            self.cart.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Check the config for missing or malformed settings.
    pub fn validate(&self) -> Validation {
        let mut report = Validation::default();

        if self.docstore.project_id.trim().is_empty() {
            report.errors.push(format!(
                "docstore.project_id is required (or set {})",
                ENV_PROJECT_ID
            ));
        } else if let Err(e) = FirestoreClient::new(self.firestore_config()) {
            report.errors.push(e.to_string());
        }
        if self.docstore.api_key.is_none() {
            report
                .warnings
                .push(format!("docstore.api_key is not set (or set {})", ENV_API_KEY));
        }
        for (key, name) in [
            ("docstore.products_collection", &self.docstore.products_collection),
            ("docstore.orders_collection", &self.docstore.orders_collection),
            ("cart.storage_key", &self.cart.storage_key),
            ("pages.confirmation", &self.pages.confirmation),
        ] {
            if name.trim().is_empty() {
                report.errors.push(format!("{} must not be empty", key));
            }
        }

        match &self.relay.endpoint {
            Some(endpoint) => {
                if let Err(e) = FormRelay::new(endpoint) {
                    report.errors.push(e.to_string());
                }
            }
            None => report.warnings.push(format!(
                "relay.endpoint is not set; orders will not be emailed (or set {})",
                ENV_RELAY_ENDPOINT
            )),
        }

        report
    }

    /// Directory holding local cart storage.
    pub fn data_dir(&self) -> PathBuf {
        self.cart.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn firestore_config(&self) -> FirestoreConfig {
        let config = FirestoreConfig::new(self.docstore.project_id.trim())
            .with_base_url(self.docstore.base_url.clone());
        match &self.docstore.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }

    pub fn settings(&self) -> StorefrontSettings {
        StorefrontSettings {
            products_collection: self.docstore.products_collection.clone(),
            orders_collection: self.docstore.orders_collection.clone(),
            relay_subject: self.relay.subject.clone(),
            confirmation_page: self.pages.confirmation.clone(),
        }
    }

    pub fn locale(&self) -> Locale {
        Locale::default().with_currency(self.store.currency.clone())
    }

    /// Open the file-backed cart.
    pub fn cart_store(&self) -> Result<ConfiguredCart, ConfigError> {
        let backend = FileBackend::open(self.data_dir())?;
        Ok(CartStore::with_key(backend, self.cart.storage_key.clone()))
    }

    pub fn document_store(&self) -> Result<FirestoreClient, ConfigError> {
        Ok(FirestoreClient::new(self.firestore_config())?)
    }

    /// The relay, if an endpoint is configured.
    pub fn relay(&self) -> Result<Option<FormRelay>, ConfigError> {
        self.relay
            .endpoint
            .as_deref()
            .map(FormRelay::new)
            .transpose()
            .map_err(ConfigError::from)
    }

    /// Build the full storefront.
    pub fn storefront(&self) -> Result<ConfiguredStorefront, ConfigError> {
        Ok(
            Storefront::new(self.cart_store()?, self.document_store()?, self.relay()?)
                .with_settings(self.settings())
                .with_locale(self.locale()),
        )
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn default_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".local").join("share").join("mutajary"),
        None => std::env::temp_dir().join("mutajary"),
    }
}

/// Generate a starter `mutajary.toml`.
pub fn generate_default_config(project_id: &str) -> String {
    format!(
        r#"# Mutajary storefront configuration

[store]
name = "{store_name}"
currency = "{currency}"

[docstore]
base_url = "{base_url}"
project_id = "{project_id}"
# api_key = "..."   # or set {env_api_key}
products_collection = "products"
orders_collection = "orders"

[relay]
# endpoint = "https://formsubmit.co/ajax/you@example.com"   # or set {env_relay}
subject = "{subject}"

[cart]
storage_key = "{storage_key}"
# data_dir = "/var/lib/mutajary"   # or set {env_data_dir}

[pages]
confirmation = "{confirmation}"
"#,
        store_name = default_store_name(),
        currency = DEFAULT_CURRENCY,
        base_url = DEFAULT_FIRESTORE_URL,
        project_id = project_id,
        env_api_key = ENV_API_KEY,
        env_relay = ENV_RELAY_ENDPOINT,
        subject = DEFAULT_RELAY_SUBJECT,
        storage_key = DEFAULT_CART_KEY,
        env_data_dir = ENV_DATA_DIR,
        confirmation = DEFAULT_CONFIRMATION_PAGE,
    )
}

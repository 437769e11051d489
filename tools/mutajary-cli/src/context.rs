//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use mutajary_storefront::cart_view::render_cart;
use mutajary_storefront::{ConfiguredCart, ConfiguredStorefront, Locale, MemoryPage, StorefrontConfig};

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration, with environment overrides applied.
    pub config: StorefrontConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => StorefrontConfig::find(&cwd),
        };
        let mut config = match &config_path {
            Some(path) => StorefrontConfig::load(path)?,
            None => StorefrontConfig::default(),
        };
        config.apply_env_overrides();
        tracing::debug!(config = ?config_path, data_dir = %config.data_dir().display(), "context loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Open the local cart.
    pub fn cart(&self) -> Result<ConfiguredCart> {
        self.config
            .cart_store()
            .with_context(|| format!("Failed to open cart in {}", self.config.data_dir().display()))
    }

    /// Build the storefront with its remote services.
    pub fn storefront(&self) -> Result<ConfiguredStorefront> {
        self.config
            .storefront()
            .context("Storefront is not configured; run `mutajary config validate`")
    }

    pub fn locale(&self) -> Locale {
        self.config.locale()
    }

    /// Render the cart into a fresh cart page.
    pub fn cart_page(&self, cart: &ConfiguredCart) -> MemoryPage {
        let mut page = MemoryPage::cart();
        render_cart(cart, &mut page, &self.locale());
        page
    }
}

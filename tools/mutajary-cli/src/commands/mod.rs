//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Print the rendered product cards instead of a table.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,

    /// Print the rendered cart instead of a table.
    #[arg(long)]
    pub html: bool,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default)
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },

    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },

    /// Empty the cart
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Customer email.
    #[arg(long)]
    pub email: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Skip prompts; missing details are left empty.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Create a mutajary.toml in the current directory
    Init {
        /// Firebase project id
        #[arg(long, default_value = "")]
        project_id: String,

        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

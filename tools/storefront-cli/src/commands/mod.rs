//! CLI command implementations.

pub mod address;
pub mod catalog;
pub mod config;
pub mod notify;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List option dimensions and their values.
    Options {
        /// Catalog JSON file.
        file: String,
    },
    /// Resolve the active variant for a set of selections.
    Resolve {
        /// Catalog JSON file.
        file: String,

        /// Option selection, e.g. `--select Size=M`. Repeatable.
        #[arg(short, long = "select", value_name = "NAME=VALUE")]
        selections: Vec<String>,

        /// Quantity to add to cart.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
}

/// Arguments for the address command.
#[derive(Args)]
pub struct AddressArgs {
    #[command(subcommand)]
    pub command: AddressCommand,

    /// Address book owner (default: `store.user` from config).
    #[arg(short, long, global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum AddressCommand {
    /// List saved addresses.
    List,
    /// Add an address. Missing fields are prompted for.
    Add(AddressFields),
    /// Remove an address.
    Remove {
        /// Address ID.
        id: String,
    },
    /// Make an address the default.
    Default {
        /// Address ID.
        id: String,
    },
}

/// Address fields accepted on the command line.
#[derive(Args, Default)]
pub struct AddressFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// GST registration number.
    #[arg(long)]
    pub gst: Option<String>,
    /// Make this the default address.
    #[arg(long)]
    pub default: bool,
}

/// Arguments for the notify command.
#[derive(Args)]
pub struct NotifyArgs {
    #[command(subcommand)]
    pub command: NotifyCommand,

    /// Recipient push token.
    #[arg(long, global = true)]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum NotifyCommand {
    /// Send a custom notification.
    Send {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// JSON object attached as data.
        #[arg(long)]
        data: Option<String>,
        /// Sound name.
        #[arg(long)]
        sound: Option<String>,
    },
    /// Send the test notification.
    Test,
    /// Announce a new order.
    Order {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        customer: String,
        /// Order total in major units, e.g. 2599.50.
        #[arg(long)]
        total: f64,
        #[arg(long, default_value = "pending")]
        status: String,
    },
    /// Send a low stock alert.
    Inventory {
        #[arg(long)]
        product: String,
        #[arg(long)]
        stock: i64,
        #[arg(long)]
        min_stock: i64,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default storefront.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,

        /// App name used in the test notification.
        #[arg(long, default_value = "Silver POS")]
        app_name: String,
    },
}

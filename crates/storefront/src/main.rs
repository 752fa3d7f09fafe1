//! Bakehouse storefront
//!
//! Browse the catalog, keep a cart between runs and send the order over WhatsApp.

use std::process;

use bakehouse::{cart::{CartStore, FileStorage}, catalog::CatalogQuery, orders::Checkout};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    catalog::HttpCatalog, config::StorefrontConfig, errors::StorefrontError,
    opener::SystemOpener, storefront::Storefront,
};

mod catalog;
mod config;
mod errors;
mod opener;
mod render;
mod storefront;

#[derive(Debug, Parser)]
#[command(name = "bakehouse", about = "Bakehouse storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse products, grouped by category
    Catalog {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,

        /// Match title, description or category
        #[arg(long)]
        search: Option<String>,
    },

    /// Show current promotions
    Banners,

    /// Add a product to the cart
    Add {
        /// Product ID from the catalog
        product_id: String,
    },

    /// Show the cart
    Cart,

    /// Change a line's quantity
    Quantity {
        /// Cart line number
        line: usize,

        /// New quantity, at least 1
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Choose an option for a line
    Select {
        /// Cart line number
        line: usize,

        /// Variation category name, or `type`
        key: String,

        /// Option label
        label: String,
    },

    /// Remove a line from the cart
    Remove {
        /// Cart line number
        line: usize,
    },

    /// Empty the cart
    Clear,

    /// Send the order
    Checkout {
        /// Your name
        #[arg(long)]
        name: String,

        /// Your phone number
        #[arg(long)]
        phone: String,

        /// Open the WhatsApp link in the browser
        #[arg(long)]
        open: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_ignored| EnvFilter::new("warn"));

    if tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[tokio::main]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging();

    match run(cli).await {
        Ok(output) => {
            #[expect(clippy::print_stdout, reason = "command output")]
            {
                print!("{output}");
            }
        }
        Err(error) => {
            #[expect(clippy::print_stderr, reason = "command errors")]
            {
                eprintln!("{error}");
            }

            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, StorefrontError> {
    let config = cli.config;
    let currency = config.currency()?;

    let launch = matches!(cli.command, Command::Checkout { open: true, .. });

    let mut shop = Storefront::new(
        HttpCatalog::new(&config.api_url),
        CartStore::new(FileStorage::new(config.cart_dir.clone())),
        Checkout::new(config.whatsapp_number.clone(), SystemOpener::new(launch)),
        currency,
    );

    match cli.command {
        Command::Catalog { category, search } => {
            shop.catalog(CatalogQuery { category, search }).await
        }
        Command::Banners => shop.banners().await,
        Command::Add { product_id } => shop.add(&product_id).await,
        Command::Cart => Ok(shop.cart()),
        Command::Quantity { line, quantity } => shop.set_quantity(line, quantity),
        Command::Select { line, key, label } => shop.select(line, &key, &label),
        Command::Remove { line } => shop.remove(line),
        Command::Clear => shop.clear(),
        Command::Checkout { name, phone, .. } => shop.checkout(&name, &phone),
    }
}

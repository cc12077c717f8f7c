//! Mini Shop CLI - browse the catalog and drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products matching "mug", cheapest first
//! mshop products --search mug --sort price-asc
//!
//! # Add two of p3 to the cart, then review and place the order
//! mshop cart add p3 --quantity 2
//! mshop checkout
//! mshop checkout --confirm
//!
//! # Search as you type: one query per line on stdin
//! mshop browse
//!
//! # Answer the quiz (1-based answer numbers, one per question)
//! mshop quiz 2 4 2 3 2
//! ```
//!
//! # Commands
//!
//! - `products` / `product` - Catalog listing and details
//! - `cart` - Show, add, remove, clear
//! - `checkout` - Review the cart, `--confirm` to place the order
//! - `browse` - Debounced live search over stdin
//! - `contact`, `joke`, `quiz` - Page widgets
//!
//! State lives under `--data-dir` (default `.mini-shop`): the cart in the
//! directory itself and the generated catalog in its `session/` subdirectory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mini_shop_core::{CurrencyCode, SortKey};
use mini_shop_storefront::catalog::DEFAULT_CATALOG_SIZE;

mod commands;

#[derive(Parser)]
#[command(name = "mshop")]
#[command(author, version, about = "Mini Shop CLI")]
struct Cli {
    /// Directory holding the cart and catalog
    #[arg(long, global = true, default_value = ".mini-shop", env = "MINI_SHOP_DATA_DIR")]
    data_dir: PathBuf,

    /// Currency used to display prices
    #[arg(long, global = true, default_value = "INR", env = "MINI_SHOP_CURRENCY")]
    currency: CurrencyCode,

    /// Products to generate when the session catalog is first created (1-100)
    #[arg(
        long,
        global = true,
        env = "MINI_SHOP_CATALOG_SIZE",
        default_value_t = DEFAULT_CATALOG_SIZE,
        value_parser = parse_catalog_size
    )]
    catalog_size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,

        /// Ordering (`none`, `price-asc`, `price-desc`)
        #[arg(long, default_value = "none")]
        sort: SortKey,
    },
    /// Show one product
    Product {
        /// Product id, e.g. p3
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Review the cart, optionally placing the order
    Checkout {
        /// Place the order and clear the cart
        #[arg(long)]
        confirm: bool,
    },
    /// Search as you type, reading one query per line from stdin
    Browse {
        /// Ordering (`none`, `price-asc`, `price-desc`)
        #[arg(long, default_value = "none")]
        sort: SortKey,

        /// Quiet period before a query is applied, in milliseconds
        #[arg(
            long,
            env = "MINI_SHOP_SEARCH_DEBOUNCE_MS",
            default_value_t = mini_shop_storefront::debounce::DEFAULT_SEARCH_DEBOUNCE_MS
        )]
        debounce_ms: u64,
    },
    /// Validate a contact form
    Contact {
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(short, long, default_value = "")]
        message: String,
    },
    /// Fetch a joke
    Joke {
        /// Joke endpoint
        #[arg(
            long,
            env = "JOKE_API_URL",
            default_value = mini_shop_storefront::services::DEFAULT_JOKE_API_URL
        )]
        url: String,
    },
    /// Take the quiz
    Quiz {
        /// YAML question bank (built-in bank if omitted)
        #[arg(long, env = "QUIZ_BANK_PATH")]
        bank: Option<PathBuf>,

        /// Answer numbers, 1-based, one per question
        answers: Vec<usize>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        /// Product id
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

fn parse_catalog_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if (1..=100).contains(&size) {
        Ok(size)
    } else {
        Err(format!("must be between 1 and 100 (got {size})"))
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::shop::Storage::new(cli.data_dir, cli.currency, cli.catalog_size);

    match cli.command {
        Commands::Products { search, sort } => commands::shop::products(&store, &search, sort)?,
        Commands::Product { id } => commands::shop::product(&store, &id)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::shop::cart_show(&store)?,
            CartAction::Add { id, quantity } => commands::shop::cart_add(&store, &id, quantity)?,
            CartAction::Remove { id } => commands::shop::cart_remove(&store, &id)?,
            CartAction::Clear => commands::shop::cart_clear(&store)?,
        },
        Commands::Checkout { confirm } => commands::shop::checkout(&store, confirm)?,
        Commands::Browse { sort, debounce_ms } => {
            commands::shop::browse(&store, sort, debounce_ms).await?;
        }
        Commands::Contact {
            name,
            email,
            message,
        } => commands::widgets::contact(name, email, message)?,
        Commands::Joke { url } => commands::widgets::joke(&url).await?,
        Commands::Quiz { bank, answers } => {
            commands::widgets::quiz(bank.as_deref(), &answers)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_defaults_and_bounds() {
        let cli = Cli::try_parse_from(["mshop", "products"]).unwrap();
        assert_eq!(cli.catalog_size, DEFAULT_CATALOG_SIZE);

        let cli = Cli::try_parse_from(["mshop", "products", "--catalog-size", "30"]).unwrap();
        assert_eq!(cli.catalog_size, 30);

        for bad in ["0", "101", "many"] {
            assert!(Cli::try_parse_from(["mshop", "products", "--catalog-size", bad]).is_err());
        }
    }
}

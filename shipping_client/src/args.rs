//! Command-line arguments for the shipping quote client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use shipping_common::CartItem;
use shipping_common::net::QUOTE_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Server IP address (IPv4 or IPv6) where the quote service is running.
    #[clap(long)]
    pub server_ip: String,

    /// TCP port of the quote service.
    #[clap(long, default_value_t = QUOTE_PORT)]
    pub port: u16,

    /// What to get a quote for.
    #[command(subcommand)]
    pub request: RequestArgs,
}

/// Quote request kinds.
#[derive(Debug, Subcommand)]
pub enum RequestArgs {
    /// Quote shipping for cart items.
    Items {
        /// Path to a cart file with one `product_id quantity` entry per line.
        #[clap(long, conflicts_with = "item")]
        path: Option<String>,

        /// Cart item as `product_id:quantity`; may be repeated.
        #[clap(long)]
        item: Vec<CartItem>,
    },
    /// Convert a raw amount into a quote.
    Amount {
        /// Amount in currency units, e.g. `10.555`.
        #[clap(allow_negative_numbers = true)]
        value: f64,
    },
}

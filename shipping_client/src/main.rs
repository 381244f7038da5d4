//! Shipping Quote Client — sends one quote request to the shipping server and prints
//! the answer.
//!
//! Usage example (CLI):
//! ```bash
//! shipping_client --server-ip 127.0.0.1 items --path ./cart.txt
//! shipping_client --server-ip 127.0.0.1 items --item OLJCESPC7Z:3 --item 66VCHSJNUP:1
//! shipping_client --server-ip 127.0.0.1 amount 10.555
//! ```
//!
//! The cart file holds one `product_id quantity` entry per line; blank lines and lines
//! starting with `#` are skipped. See `shipping_common::cart` for details.
#![warn(missing_docs)]
mod args;
mod sender;

use crate::args::{Args, RequestArgs};
use crate::sender::{QuoteSender, RESPONSE_TIMEOUT};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::{error, info};
use shipping_common::cart::{CartItem, CartParser};
use shipping_common::net::addr;
use shipping_common::request::{QuoteRequest, ResponseStatus};
use shipping_common::{Result, ShippingError};
use std::fs::File;
use std::io::BufReader;
use std::net::TcpStream;
use std::path::PathBuf;

fn main() -> Result<(), ShippingError> {
    init_logger();
    let args = Args::parse();

    let server_ip = args.server_ip.trim().replace('"', "");
    let server_address = addr(&server_ip, args.port);
    let request = build_request(args.request)?;

    info!("Connecting to TCP server at {}", server_address);
    let mut stream = TcpStream::connect(&server_address)
        .map_err(|e| ShippingError::Format(format!("Failed to connect to server: {}", e)))?;

    let response = QuoteSender::send_request(&mut stream, &request, RESPONSE_TIMEOUT)?;
    let quoted_at = DateTime::<Utc>::from_timestamp_millis(response.timestamp as i64)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| response.timestamp.to_string());

    match response.status {
        ResponseStatus::Ok => {
            let quote = response.quote()?;
            info!("QUOTE: {} (units={} subunits={}) at {}", quote, quote.units(), quote.subunits(), quoted_at);
            Ok(())
        }
        status => {
            let reason = response.reason.unwrap_or_default();
            error!("Request {}: {}", status, reason);
            Err(ShippingError::Format(format!("request {}: {}", status, reason)))
        }
    }
}

/// Turn the parsed subcommand into a wire request.
fn build_request(request: RequestArgs) -> Result<QuoteRequest, ShippingError> {
    match request {
        RequestArgs::Amount { value } => Ok(QuoteRequest::FromAmount { amount: value }),
        RequestArgs::Items { path: Some(path), .. } => {
            let file_path = normalize_path(&path);
            if !is_file_exist(&file_path) {
                return Err(ShippingError::Format(format!(
                    "cart file not found: {}",
                    file_path.display()
                )));
            }
            let items = CartItem::parse_from_reader(BufReader::new(File::open(&file_path)?))?;
            info!("Cart items: {:?}", items);
            Ok(QuoteRequest::FromItems { items })
        }
        RequestArgs::Items { path: None, item } => Ok(QuoteRequest::FromItems { items: item }),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_quotes() {
        assert_eq!(normalize_path("  \"C:\\cart.txt\" "), PathBuf::from("C:\\cart.txt"));
        assert_eq!(normalize_path("./cart.txt"), PathBuf::from("./cart.txt"));
    }

    #[test]
    fn amount_request_is_passed_through() {
        let request = build_request(RequestArgs::Amount { value: 10.555 }).unwrap();
        assert_eq!(request, QuoteRequest::FromAmount { amount: 10.555 });
    }

    #[test]
    fn missing_cart_file_is_an_error() {
        let result = build_request(RequestArgs::Items {
            path: Some(String::from("/definitely/not/here/cart.txt")),
            item: Vec::new(),
        });
        assert!(matches!(result, Err(ShippingError::Format(_))));
    }
}

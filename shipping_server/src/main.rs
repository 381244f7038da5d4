//! Shipping quote TCP server.
//!
//! This binary accepts TCP connections and answers line-delimited JSON quote requests.
//! Internally, it wires together three building blocks:
//!
//! - `QuoteReceiver` — accepts connections and hands each `TcpStream` to the dispatcher
//!   through a `crossbeam_channel`.
//! - Dispatcher — spawns one stream thread per client; all of them share one
//!   `QuoteCalculator` behind an `Arc`. A client silent for `--idle-timeout-secs` is
//!   disconnected.
//! - `handler` — decodes a request line, prices it, and writes one response line.
//!
//! Concurrency and shutdown:
//! - The calculator is stateless, so stream threads share it without locks.
//! - Crossbeam `select!` in `main` waits for either Ctrl+C or a fatal accept-loop error.
//! - Errors on a single connection are logged and never affect other clients.
//!
//! Network protocol (high-level):
//! - Bind address: `0.0.0.0:50051` by default (see `Args`).
//! - Client sends `{"method":"from_items","items":[...]}` or
//!   `{"method":"from_amount","amount":...}` followed by a newline.
//! - Server replies with a `QuoteResponse` JSON line (`ok`, `rejected` or `invalid`).
#![warn(missing_docs)]
mod args;
mod handler;
mod receiver;
mod worker;

use crate::args::Args;
use crate::receiver::QuoteReceiver;
use crate::worker::spawn_dispatcher;
use clap::Parser;
use crossbeam_channel::{select, unbounded};
use log::{error, info};
use shipping_common::net::addr;
use shipping_common::observer::LogObserver;
use shipping_common::{QuoteCalculator, Result, ShippingError, ShippingRates};
use std::net::TcpStream;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), ShippingError> {
    init_logger();
    let args = Args::parse();

    let rates = ShippingRates::new(args.base_fee, args.per_item);
    info!(
        "Shipping rates: base fee {} + {} per item",
        rates.base_fee, rates.per_item
    );
    let calculator = Arc::new(QuoteCalculator::new(rates, LogObserver));

    let (shutdown_tx, shutdown_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| ShippingError::Format(format!("Failed to set Ctrl+C handler: {}", e)))?;

    let receiver = QuoteReceiver::new(&addr(&args.bind_ip, args.port))?;
    info!("Accepting quote requests on {}", receiver.local_addr()?);
    let (conn_tx, conn_rx) = unbounded::<TcpStream>();
    spawn_dispatcher(conn_rx, calculator, Duration::from_secs(args.idle_timeout_secs))?;

    let (fatal_tx, fatal_rx) = unbounded::<ShippingError>();
    thread::spawn(move || {
        if let Err(e) = receiver.accept_loop_with_channel(conn_tx) {
            let _ = fatal_tx.send(e);
        }
    });

    select! {
        recv(shutdown_rx) -> _ => {
            info!("Ctrl+C received. Shutting down server...");
            Ok(())
        },
        recv(fatal_rx) -> msg => match msg {
            Ok(e) => {
                error!("Receiver loop failed: {}", e);
                Err(e)
            }
            Err(e) => Err(ShippingError::ChannelRecv(e.to_string())),
        },
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

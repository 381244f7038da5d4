//! Connection dispatch.
//!
//! A dispatcher thread takes accepted streams from the channel and spawns one thread
//! per client, so a slow or idle client only ever holds its own thread. Every client
//! socket gets a read timeout; a client that stays silent that long is disconnected.
use crate::handler::serve_connection;
use crossbeam_channel::Receiver;
use log::{error, info};
use shipping_common::observer::QuoteObserver;
use shipping_common::{QuoteCalculator, Result};
use std::io::BufReader;
use std::net::TcpStream;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Serve one client connection until it closes or stays idle for `idle_timeout`.
pub fn handle_client<O: QuoteObserver>(
    calculator: &QuoteCalculator<O>,
    stream: TcpStream,
    idle_timeout: Duration,
) -> Result<usize> {
    stream.set_read_timeout(Some(idle_timeout))?;
    let reader = BufReader::new(stream.try_clone()?);
    serve_connection(calculator, reader, stream)
}

/// Spawn the dispatcher that starts a stream thread for every connection on `rx`.
///
/// The dispatcher finishes once the channel is closed and drained.
pub fn spawn_dispatcher<O>(
    rx: Receiver<TcpStream>,
    calculator: Arc<QuoteCalculator<O>>,
    idle_timeout: Duration,
) -> Result<JoinHandle<()>>
where
    O: QuoteObserver + 'static,
{
    let handle = thread::Builder::new()
        .name(String::from("quote-dispatcher"))
        .spawn(move || {
            for stream in rx.iter() {
                let peer = stream
                    .peer_addr()
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|_| String::from("unknown"));
                let calculator = Arc::clone(&calculator);
                let thread_peer = peer.clone();
                let spawned = thread::Builder::new()
                    .name(format!("quote-client-{}", peer))
                    .spawn(move || match handle_client(&calculator, stream, idle_timeout) {
                        Ok(answered) => {
                            info!("Connection {} closed after {} request(s)", thread_peer, answered)
                        }
                        Err(e) => error!("Connection {} failed: {}", thread_peer, e),
                    });
                if let Err(e) = spawned {
                    error!("Failed to start stream thread for {}: {}", peer, e);
                }
            }
        })?;
    Ok(handle)
}

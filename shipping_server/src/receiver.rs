//! TCP accept loop for the quote server.
//!
//! Accepted connections are not read here; they go to the dispatcher in `worker`.
use crossbeam_channel::Sender;
use log::{debug, error, info};
use shipping_common::ShippingError;
use std::net::{SocketAddr, TcpListener, TcpStream};

/// TCP receiver that accepts client connections for quote requests.
///
/// Each accepted connection is handed over to the dispatcher through a channel.
pub struct QuoteReceiver {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
}

impl QuoteReceiver {
    /// Bind a new TCP receiver to the provided `bind_addr` (e.g., `0.0.0.0:50051`).
    pub fn new(bind_addr: &str) -> Result<Self, ShippingError> {
        let socket = TcpListener::bind(bind_addr)?;
        Ok(Self { socket })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ShippingError> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocking loop that accepts TCP connections and forwards each one to `tx`.
    ///
    /// A failed accept only affects that client and is logged. The loop ends with an
    /// error once the dispatcher no longer receives connections.
    pub(crate) fn accept_loop_with_channel(self, tx: Sender<TcpStream>) -> Result<(), ShippingError> {
        info!("Quote TCP server is started on {}", self.socket.local_addr()?);

        for stream in self.socket.incoming() {
            match stream {
                Ok(stream) => {
                    match stream.peer_addr() {
                        Ok(peer) => debug!("Accepted connection from {}", peer),
                        Err(e) => debug!("Accepted connection with unknown peer: {}", e),
                    }
                    tx.send(stream)
                        .map_err(|e| ShippingError::ChannelSend(format!("dispatcher closed: {}", e)))?;
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
        Ok(())
    }
}

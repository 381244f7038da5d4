//! Sending quote requests to the shipping server over TCP.
use log::{debug, info};
use shipping_common::ShippingError;
use shipping_common::request::{QuoteRequest, QuoteResponse};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::net::TcpStream;
use std::time::Duration;

/// How long to wait for the server's answer.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Helper type for sending requests to the server.
pub struct QuoteSender;

impl QuoteSender {
    /// Send `request` as one JSON line and wait up to `timeout` for the response line.
    pub fn send_request(
        stream: &mut TcpStream,
        request: &QuoteRequest,
        timeout: Duration,
    ) -> Result<QuoteResponse, ShippingError> {
        stream.set_read_timeout(Some(timeout))?;
        let line = request.to_json_line()?;
        info!("Sending request: {}", String::from_utf8_lossy(&line).trim());
        stream.write_all(&line)?;
        stream.flush()?;

        let mut reader = BufReader::new(stream.try_clone()?);
        let mut response_line = String::new();
        let read = reader.read_line(&mut response_line).map_err(|e| match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                ShippingError::Format(format!("no response from server within {:?}", timeout))
            }
            _ => ShippingError::Io(e),
        })?;
        if read == 0 {
            return Err(ShippingError::Format(String::from(
                "server closed the connection without answering",
            )));
        }
        debug!("Received response: {}", response_line.trim());
        Ok(serde_json::from_str(&response_line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_millis(500));
            drop(stream);
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        let request = QuoteRequest::FromAmount { amount: 1.0 };
        let result = QuoteSender::send_request(&mut stream, &request, Duration::from_millis(100));
        assert!(matches!(result, Err(ShippingError::Format(_))));
        server.join().unwrap();
    }

    #[test]
    fn reads_one_response_line() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut line = String::new();
            BufReader::new(stream.try_clone().unwrap()).read_line(&mut line).unwrap();
            let response = QuoteResponse::ok(shipping_common::Quote::new(1, 0).unwrap(), 1);
            stream.write_all(&response.to_json_line().unwrap()).unwrap();
        });

        let mut stream = TcpStream::connect(addr).unwrap();
        let request = QuoteRequest::FromAmount { amount: 1.0 };
        let response = QuoteSender::send_request(&mut stream, &request, RESPONSE_TIMEOUT).unwrap();
        assert_eq!(response.display, "$1.00");
        server.join().unwrap();
    }
}

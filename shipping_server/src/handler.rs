//! Request handling for a single client connection.
//!
//! Each non-blank line read from the client is decoded as a `QuoteRequest`, priced
//! with the shared calculator, and answered with exactly one `QuoteResponse` line.
//! Undecodable lines get an `invalid` response; the connection stays open.
use chrono::Utc;
use log::{debug, warn};
use shipping_common::Result;
use shipping_common::observer::QuoteObserver;
use shipping_common::request::{QuoteRequest, QuoteResponse};
use shipping_common::QuoteCalculator;
use std::io::{BufRead, ErrorKind, Write};

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Compute the response for one decoded request.
pub fn handle_request<O: QuoteObserver>(
    calculator: &QuoteCalculator<O>,
    request: &QuoteRequest,
) -> QuoteResponse {
    let result = match request {
        QuoteRequest::FromItems { items } => calculator.try_quote_from_items(items),
        QuoteRequest::FromAmount { amount } => calculator.try_quote_from_amount(*amount),
    };

    match result {
        Ok(quote) => QuoteResponse::ok(quote, now_millis()),
        Err(e) => QuoteResponse::rejected(&e, now_millis()),
    }
}

/// Decode and answer one request line.
pub fn handle_line<O: QuoteObserver>(calculator: &QuoteCalculator<O>, line: &str) -> QuoteResponse {
    match serde_json::from_str::<QuoteRequest>(line) {
        Ok(request) => {
            debug!("Received request {:?}", request);
            handle_request(calculator, &request)
        }
        Err(e) => {
            warn!("Invalid request line: {}", e);
            QuoteResponse::invalid(&format!("JSON error: {}", e), now_millis())
        }
    }
}

/// Serve requests from `reader` until EOF, writing responses to `writer`.
///
/// A read that times out ends the connection like EOF does. Returns the number of
/// requests answered.
pub fn serve_connection<O, R, W>(calculator: &QuoteCalculator<O>, reader: R, mut writer: W) -> Result<usize>
where
    O: QuoteObserver,
    R: BufRead,
    W: Write,
{
    let mut answered = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                debug!("Closing idle connection after {} request(s)", answered);
                break;
            }
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(calculator, &line);
        writer.write_all(&response.to_json_line()?)?;
        writer.flush()?;
        answered += 1;
    }
    Ok(answered)
}

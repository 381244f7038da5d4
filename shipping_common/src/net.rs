//! Shared networking constants and helpers used by client and server.

/// TCP port the quote service listens on by default.
pub const QUOTE_PORT: u16 = 50051;
/// Address the server binds to when none is given.
pub const DEFAULT_BIND_IP: &str = "0.0.0.0";

/// Helper to format an IP address with a port like "ip:port".
///
/// IPv6 literals are wrapped in brackets so the result parses as a `SocketAddr`.
pub fn addr(ip: &str, port: u16) -> String {
    if ip.contains(':') && !ip.starts_with('[') {
        format!("[{}]:{}", ip, port)
    } else {
        format!("{}:{}", ip, port)
    }
}

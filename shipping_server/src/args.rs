//! Command-line arguments for the shipping quote server.
use clap::Parser;
use rust_decimal::Decimal;
use shipping_common::net::{DEFAULT_BIND_IP, QUOTE_PORT};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// IP address to bind the TCP listener to.
    #[clap(long, default_value = DEFAULT_BIND_IP)]
    pub bind_ip: String,

    /// TCP port to accept quote requests on.
    #[clap(long, default_value_t = QUOTE_PORT)]
    pub port: u16,

    /// Seconds a client may stay silent before its connection is closed.
    #[clap(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub idle_timeout_secs: u64,

    /// Flat fee charged once per non-empty cart.
    #[clap(long, default_value = "10.00")]
    pub base_fee: Decimal,

    /// Fee charged for every unit in the cart.
    #[clap(long, default_value = "0.50")]
    pub per_item: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_rates() {
        let args = Args::parse_from(["shipping_server"]);
        assert_eq!(args.port, QUOTE_PORT);
        assert_eq!(args.idle_timeout_secs, 30);
        assert_eq!(args.base_fee, Decimal::TEN);
        assert_eq!(args.per_item, Decimal::new(5, 1));
    }

    #[test]
    fn rejects_zero_idle_timeout() {
        assert!(Args::try_parse_from(["shipping_server", "--idle-timeout-secs", "0"]).is_err());
    }
}

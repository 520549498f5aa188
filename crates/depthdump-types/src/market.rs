//! Exchange and instrument identifiers.

use serde::{Deserialize, Serialize};

/// A trading venue and instrument pair.
///
/// Both identifiers are opaque and passed verbatim into API paths,
/// e.g. `coinbase` and `btc-usd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market {
    exchange: String,
    instrument: String,
}

impl Market {
    /// Creates a new market.
    #[must_use]
    pub fn new(exchange: impl Into<String>, instrument: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            instrument: instrument.into(),
        }
    }

    /// Returns the exchange identifier.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Returns the instrument identifier.
    #[must_use]
    pub fn instrument(&self) -> &str {
        &self.instrument
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.exchange, self.instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_display() {
        let market = Market::new("coinbase", "btc-usd");
        assert_eq!(market.exchange(), "coinbase");
        assert_eq!(market.instrument(), "btc-usd");
        assert_eq!(market.to_string(), "coinbase/btc-usd");
    }
}

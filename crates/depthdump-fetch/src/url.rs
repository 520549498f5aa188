//! CryptoChassis API URL construction.

use depthdump_types::Market;

/// Base URL for the CryptoChassis v1 API.
pub const BASE_URL: &str = "https://api.cryptochassis.com/v1";

/// Builds the trade endpoint URL used to resolve the end of the data window.
///
/// URL format: `{base}/trade/{exchange}/{instrument}?startTime={start}`
///
/// # Example
///
/// ```
/// use depthdump_fetch::url::{BASE_URL, trade_url};
/// use depthdump_types::Market;
///
/// let market = Market::new("coinbase", "btc-usd");
/// let url = trade_url(BASE_URL, &market, 1_609_459_200);
/// assert_eq!(url, "https://api.cryptochassis.com/v1/trade/coinbase/btc-usd?startTime=1609459200");
/// ```
#[must_use]
pub fn trade_url(base: &str, market: &Market, start_time: i64) -> String {
    endpoint_url(base, "trade", market, start_time)
}

/// Builds the market-depth endpoint URL that resolves a day's file URL.
///
/// URL format: `{base}/market-depth/{exchange}/{instrument}?startTime={day}`
#[must_use]
pub fn market_depth_url(base: &str, market: &Market, day: i64) -> String {
    endpoint_url(base, "market-depth", market, day)
}

fn endpoint_url(base: &str, endpoint: &str, market: &Market, start_time: i64) -> String {
    format!(
        "{}/{}/{}/{}?startTime={}",
        base.trim_end_matches('/'),
        endpoint,
        market.exchange(),
        market.instrument(),
        start_time
    )
}

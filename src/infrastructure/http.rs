use crate::domain::{
    errors::{ChartError, FetchError},
    logging::LogComponent,
    market_data::{PriceFeed, RawSeries, Resolution, TickerSymbol},
};
use crate::config::AppConfig;
use crate::{log_debug, log_error, log_info};
use gloo_net::http::Request;
use serde::Deserialize;

/// Status envelope shared by all TradingView-shim responses
#[derive(Debug, Deserialize)]
struct HistoryStatus {
    #[serde(default)]
    s: Option<String>,
    #[serde(default)]
    errmsg: Option<String>,
}

/// Feed entry as returned by `/price_feeds`
#[derive(Debug, Deserialize)]
struct PriceFeedDto {
    attributes: PriceFeedAttributes,
}

#[derive(Debug, Deserialize)]
struct PriceFeedAttributes {
    symbol: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    base: String,
}

impl From<PriceFeedDto> for PriceFeed {
    fn from(dto: PriceFeedDto) -> Self {
        let attributes = dto.attributes;
        let symbol = attributes
            .symbol
            .strip_prefix(TickerSymbol::FEED_PREFIX)
            .unwrap_or(&attributes.symbol)
            .to_string();
        PriceFeed { symbol, description: attributes.description, base: attributes.base }
    }
}

/// HTTP client for the Pyth benchmarks API
#[derive(Clone, Debug)]
pub struct PythBenchmarksClient {
    base_url: String,
}

impl Default for PythBenchmarksClient {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl PythBenchmarksClient {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn history_url(&self, symbol: &TickerSymbol, resolution: Resolution, from: u64, to: u64) -> String {
        let feed_symbol = symbol.feed_symbol();
        let (from, to) = (from.to_string(), to.to_string());
        let params = [
            ("symbol", feed_symbol.as_str()),
            ("resolution", resolution.as_query_value()),
            ("from", from.as_str()),
            ("to", to.as_str()),
        ];
        HttpUtils::build_url_with_params(&format!("{}/shims/tradingview/history", self.base_url), &params)
    }

    pub fn price_feeds_url(&self) -> String {
        HttpUtils::build_url_with_params(&format!("{}/price_feeds/", self.base_url), &[("asset_type", "crypto")])
    }

    /// OHLC history for `symbol` between `from` and `to` (Unix seconds)
    pub async fn fetch_series(
        &self,
        symbol: &TickerSymbol,
        resolution: Resolution,
        from: u64,
        to: u64,
    ) -> Result<RawSeries, ChartError> {
        log_info!(
            LogComponent::Infrastructure("PythBenchmarks"),
            "📡 Fetching {} @{} from {} to {}",
            symbol,
            resolution,
            from,
            to
        );

        let body = self.get_text(&self.history_url(symbol, resolution, from, to)).await?;
        let series = Self::parse_series(symbol, &body)?;

        log_info!(
            LogComponent::Infrastructure("PythBenchmarks"),
            "✅ Loaded {} samples for {}",
            series.len(),
            symbol
        );
        Ok(series)
    }

    /// All crypto feeds, `Crypto.` prefix stripped
    pub async fn fetch_price_feeds(&self) -> Result<Vec<PriceFeed>, ChartError> {
        let body = self.get_text(&self.price_feeds_url()).await?;
        let feeds = Self::parse_price_feeds(&body)?;

        log_debug!(LogComponent::Infrastructure("PythBenchmarks"), "📋 {} price feeds", feeds.len());
        Ok(feeds)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        log_debug!(LogComponent::Infrastructure("HTTP"), "🌐 GET: {}", url);

        let response = Request::get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request(format!("{e:?}")))?;

        if !HttpUtils::is_success_status(response.status()) {
            let error = FetchError::HttpStatus { status: response.status(), status_text: response.status_text() };
            log_error!(LogComponent::Infrastructure("HTTP"), "{}", error);
            return Err(error);
        }

        response.text().await.map_err(|e| FetchError::Request(format!("Failed to read response: {e:?}")))
    }

    /// Decodes a history body, mapping TradingView status codes to fetch errors.
    pub fn parse_series(symbol: &TickerSymbol, body: &str) -> Result<RawSeries, FetchError> {
        let status: HistoryStatus = serde_json::from_str(body)?;
        match status.s.as_deref() {
            Some("no_data") => return Err(FetchError::NoData(symbol.to_string())),
            Some("error") => {
                return Err(FetchError::Api(status.errmsg.unwrap_or_else(|| "unknown error".to_string())));
            }
            _ => {}
        }
        Ok(serde_json::from_str(body)?)
    }

    pub fn parse_price_feeds(body: &str) -> Result<Vec<PriceFeed>, FetchError> {
        let feeds: Vec<PriceFeedDto> = serde_json::from_str(body)?;
        Ok(feeds.into_iter().map(PriceFeed::from).collect())
    }
}

/// Query-string helpers
pub struct HttpUtils;

impl HttpUtils {
    pub fn is_success_status(status: u16) -> bool {
        (200..300).contains(&status)
    }

    /// Parameters are percent-encoded and kept in the given order.
    pub fn build_url_with_params(base_url: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return base_url.to_string();
        }

        let query_string = params
            .iter()
            .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", base_url, query_string)
    }
}

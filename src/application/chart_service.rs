use crate::{
    config::AppConfig,
    domain::{
        chart::ChartModel,
        errors::ChartResult,
        logging::{LogComponent, LogEntry, LogLevel, get_logger, get_time_provider},
        market_data::{PriceFeed, PriceFeedSearch, TickerSymbol},
    },
    infrastructure::PythBenchmarksClient,
};

/// Result of loading one page: the chart and the picker can fail independently
#[derive(Debug, Clone)]
pub struct ChartPage {
    pub ticker: TickerSymbol,
    pub chart: ChartResult<ChartModel>,
    pub feeds: ChartResult<Vec<PriceFeed>>,
}

/// Application service tying the benchmark client to the chart pipeline
#[derive(Clone, Debug)]
pub struct ChartApplicationService {
    client: PythBenchmarksClient,
    config: AppConfig,
}

impl ChartApplicationService {
    pub fn new(config: AppConfig) -> Self {
        Self { client: PythBenchmarksClient::from_config(&config), config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current time in Unix seconds, from the installed time provider
    pub fn now_secs() -> u64 {
        get_time_provider().current_timestamp() / 1000
    }

    /// Fetches the lookback window ending at `now_secs` and runs the pipeline.
    pub async fn load_chart(&self, ticker: &TickerSymbol, now_secs: u64) -> ChartResult<ChartModel> {
        let (from, to) = self.config.time_window(now_secs);
        let series = self.client.fetch_series(ticker, self.config.resolution, from, to).await?;
        let model = ChartModel::from_series(&series)?;

        get_logger().log(
            LogEntry::new(LogLevel::Info, LogComponent::Application("ChartService"), &format!("📈 {} loaded", ticker))
                .with_metadata(&format!(
                    "points={} window=[{}, {}] domain=[{}, {}]",
                    model.len(),
                    from,
                    to,
                    model.domain.lower,
                    model.domain.upper
                )),
        );
        Ok(model)
    }

    pub async fn load_price_feeds(&self) -> ChartResult<Vec<PriceFeed>> {
        self.client.fetch_price_feeds().await
    }

    /// Chart and feed list requested concurrently
    pub async fn load_page(&self, ticker: TickerSymbol, now_secs: u64) -> ChartPage {
        let (chart, feeds) =
            futures::future::join(self.load_chart(&ticker, now_secs), self.load_price_feeds()).await;

        if let Err(e) = &chart {
            get_logger().error(LogComponent::Application("ChartService"), &format!("❌ {}: {}", ticker, e));
        }
        if let Err(e) = &feeds {
            get_logger().warn(LogComponent::Application("ChartService"), &format!("⚠️ price feeds: {}", e));
        }

        ChartPage { ticker, chart, feeds }
    }

    /// Picker entries for `query`, limited by configuration
    pub fn search(&self, feeds: &[PriceFeed], query: &str) -> Vec<PriceFeed> {
        PriceFeedSearch::filter(feeds, query, self.config.search_limit)
    }
}

impl Default for ChartApplicationService {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

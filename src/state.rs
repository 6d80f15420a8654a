use crate::config::Config;
use crate::models::{stock::StockList, summary::Summary};
use crate::series::ChartSeries;
use crate::services::{
    eastmoney::EastMoneyClient,
    market::MarketService,
    metals::MetalsClient,
    poller::MetalsPoller,
};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    market: MarketService,
    series: Arc<RwLock<ChartSeries>>,
    metals: MetalsPoller,
}

/// One manual refresh of the A-share board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardData {
    pub summary: Summary,
    pub hot: StockList,
    pub fall: StockList,
    pub series: ChartSeries,
}

impl AppState {
    pub fn new(market: MarketService, metals: MetalsPoller) -> Self {
        Self {
            market,
            series: Arc::new(RwLock::new(ChartSeries::new())),
            metals,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let market = MarketService::new(EastMoneyClient::with_base_url(
            config.eastmoney_base_url.as_str(),
        ));
        let metals = MetalsPoller::new(
            MetalsClient::with_base_url(config.metals_base_url.as_str()),
            config.metals_api_key.as_str(),
            config.currency.as_str(),
        );
        Self::new(market, metals)
    }

    pub fn market(&self) -> &MarketService {
        &self.market
    }

    pub fn metals(&self) -> &MetalsPoller {
        &self.metals
    }

    /// Fetches a fresh summary and appends it to the chart series.
    pub async fn refresh_summary(&self) -> Summary {
        let summary = self.market.summary().await;
        self.series.write().await.record(&summary);
        summary
    }

    pub async fn series(&self) -> ChartSeries {
        self.series.read().await.clone()
    }

    /// Summary, gainers and losers built from one snapshot download.
    pub async fn refresh_board(&self) -> BoardData {
        let (summary, hot, fall) = self.market.board().await;
        let series = {
            let mut series = self.series.write().await;
            series.record(&summary);
            series.clone()
        };
        BoardData {
            summary,
            hot,
            fall,
            series,
        }
    }
}

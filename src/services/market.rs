use crate::models::{
    stock::{StockList, StockRow, StockSnapshot},
    summary::{IndexQuote, MarketBreadth, MarketSection, Summary},
};
use crate::services::eastmoney::EastMoneyClient;
use chrono::Local;

/// Rows returned by the gainers / losers endpoints.
pub const TOP_MOVERS: usize = 15;

/// Percentage treated as hitting the daily limit. Approximate: ignores the
/// 20% and 30% boards.
pub const LIMIT_PCT: f64 = 9.9;

const SH_PREFIXES: [&str; 7] = ["600", "601", "603", "605", "688", "689", "900"];
const SZ_PREFIXES: [&str; 6] = ["000", "001", "002", "003", "300", "301"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Gainers,
    Losers,
}

/// Exchange from the first three digits of a stock code.
pub fn detect_market(code: &str) -> &'static str {
    let Some(prefix) = code.get(..3) else {
        return "OTHER";
    };
    if SH_PREFIXES.contains(&prefix) {
        "SH"
    } else if SZ_PREFIXES.contains(&prefix) {
        "SZ"
    } else {
        "OTHER"
    }
}

pub fn summarize(snapshot: &[StockSnapshot]) -> anyhow::Result<MarketBreadth> {
    if snapshot.is_empty() {
        anyhow::bail!("未获取到行情数据");
    }

    let mut breadth = MarketBreadth::default();
    let mut total_amount = 0.0;
    for item in snapshot {
        let pct = item.pct_change.unwrap_or(0.0);
        total_amount += item.amount.unwrap_or(0.0);

        if pct > 0.0 {
            breadth.up += 1;
        } else if pct < 0.0 {
            breadth.down += 1;
        } else {
            breadth.flat += 1;
        }

        if pct >= LIMIT_PCT {
            breadth.limit_up += 1;
        } else if pct <= -LIMIT_PCT {
            breadth.limit_down += 1;
        }
    }
    breadth.total_amount = (total_amount * 100.0).round() / 100.0;
    breadth.total_count = snapshot.len() as u32;
    Ok(breadth)
}

/// Top `n` stocks by percentage change; ties keep snapshot order.
pub fn top_movers(snapshot: &[StockSnapshot], direction: Direction, n: usize) -> Vec<StockRow> {
    let mut sorted: Vec<&StockSnapshot> = snapshot.iter().collect();
    let pct = |item: &StockSnapshot| item.pct_change.unwrap_or(0.0);
    match direction {
        Direction::Gainers => sorted.sort_by(|a, b| pct(*b).total_cmp(&pct(*a))),
        Direction::Losers => sorted.sort_by(|a, b| pct(*a).total_cmp(&pct(*b))),
    }
    sorted.into_iter().take(n).map(StockRow::from).collect()
}

/// Builds the dashboard payloads from EastMoney data.
#[derive(Clone)]
pub struct MarketService {
    client: EastMoneyClient,
}

impl MarketService {
    pub fn new(client: EastMoneyClient) -> Self {
        Self { client }
    }

    /// Index quotes plus market breadth. Upstream failures are reported
    /// inside the summary rather than failing the whole call.
    pub async fn summary(&self) -> Summary {
        let (indices, snapshot) = tokio::join!(
            self.client.fetch_index_spot(),
            self.client.fetch_a_share_list()
        );
        summary_from(indices, snapshot.as_deref())
    }

    pub async fn movers(&self, direction: Direction) -> StockList {
        movers_from(self.client.fetch_a_share_list().await.as_deref(), direction)
    }

    /// Summary, gainers and losers from a single A-share snapshot download.
    pub async fn board(&self) -> (Summary, StockList, StockList) {
        let (indices, snapshot) = tokio::join!(
            self.client.fetch_index_spot(),
            self.client.fetch_a_share_list()
        );
        let snapshot = snapshot.as_deref();
        (
            summary_from(indices, snapshot),
            movers_from(snapshot, Direction::Gainers),
            movers_from(snapshot, Direction::Losers),
        )
    }
}

fn summary_from(
    indices: anyhow::Result<Vec<IndexQuote>>,
    snapshot: Result<&[StockSnapshot], &anyhow::Error>,
) -> Summary {
    let (indices, indices_error) = match indices {
        Ok(indices) => (indices, None),
        Err(err) => {
            tracing::warn!(error = %err, "failed to fetch index quotes");
            (Vec::new(), Some(format!("获取指数失败: {err}")))
        }
    };

    let breadth = match snapshot {
        Ok(snapshot) => summarize(snapshot),
        Err(err) => Err(anyhow::anyhow!("{err}")),
    };
    let market = match breadth {
        Ok(breadth) => MarketSection::Breadth(breadth),
        Err(err) => {
            tracing::warn!(error = %err, "failed to build market breadth");
            MarketSection::Error {
                error: err.to_string(),
            }
        }
    };

    let now = Local::now();
    Summary {
        date: now.format("%Y-%m-%d").to_string(),
        time: now.format("%H:%M:%S").to_string(),
        ok: market.breadth().is_some(),
        indices,
        indices_error,
        market,
    }
}

fn movers_from(snapshot: Result<&[StockSnapshot], &anyhow::Error>, direction: Direction) -> StockList {
    match snapshot {
        Ok(snapshot) => StockList {
            list: top_movers(snapshot, direction, TOP_MOVERS),
            ok: true,
        },
        Err(err) => {
            tracing::warn!(error = %err, ?direction, "failed to fetch stock list");
            StockList::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(code: &str, pct: Option<f64>, amount: Option<f64>) -> StockSnapshot {
        StockSnapshot {
            code: code.to_string(),
            name: Some(format!("S{code}")),
            price: Some(10.0),
            pct_change: pct,
            change: None,
            amount,
            market: detect_market(code).to_string(),
        }
    }

    #[test]
    fn market_from_code_prefix() {
        assert_eq!(detect_market("600519"), "SH");
        assert_eq!(detect_market("688981"), "SH");
        assert_eq!(detect_market("300750"), "SZ");
        assert_eq!(detect_market("002594"), "SZ");
        assert_eq!(detect_market("830799"), "OTHER");
        assert_eq!(detect_market(""), "OTHER");
        assert_eq!(detect_market("60"), "OTHER");
    }

    #[test]
    fn breadth_counts_and_limits() {
        let snapshot = vec![
            stock("600000", Some(10.0), Some(1.25)),
            stock("600001", Some(9.9), Some(2.0)),
            stock("000001", Some(-9.95), Some(3.0)),
            stock("000002", Some(-0.5), None),
            stock("300001", None, Some(4.0)),
            stock("300002", Some(0.0), None),
        ];

        let breadth = summarize(&snapshot).expect("breadth");
        assert_eq!(breadth.up, 2);
        assert_eq!(breadth.down, 2);
        assert_eq!(breadth.flat, 2);
        assert_eq!(breadth.limit_up, 2);
        assert_eq!(breadth.limit_down, 1);
        assert_eq!(breadth.total_count, 6);
        assert_eq!(breadth.total_amount, 10.25);
    }

    #[test]
    fn empty_snapshot_is_an_error() {
        let err = summarize(&[]).unwrap_err();
        assert_eq!(err.to_string(), "未获取到行情数据");
    }

    #[test]
    fn movers_are_sorted_by_direction() {
        let snapshot = vec![
            stock("600000", Some(1.0), None),
            stock("600001", Some(5.0), None),
            stock("600002", None, None),
            stock("600003", Some(-3.0), None),
        ];

        let gainers: Vec<_> = top_movers(&snapshot, Direction::Gainers, 2)
            .into_iter()
            .map(|row| row.code)
            .collect();
        assert_eq!(gainers, vec!["600001", "600000"]);

        let losers = top_movers(&snapshot, Direction::Losers, 15);
        assert_eq!(losers.len(), 4);
        assert_eq!(losers[0].code, "600003");
        assert_eq!(losers[1].code, "600002");
        assert_eq!(losers[1].pct_change, 0.0);
    }
}

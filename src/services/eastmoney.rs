use crate::models::{stock::StockSnapshot, summary::IndexQuote};
use crate::services::market::detect_market;
use anyhow::Context;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://push2.eastmoney.com";

/// Major indices, keyed by EastMoney `secid` (`market.code`).
pub const INDEX_SECIDS: [(&str, &str); 7] = [
    ("1.000001", "上证指数"),
    ("0.399001", "深证成指"),
    ("0.399006", "创业板指"),
    ("1.000688", "科创50"),
    ("1.000300", "沪深300"),
    ("1.000016", "上证50"),
    ("0.399005", "中小100"),
];

/// Client for the EastMoney push2 quote endpoints.
#[derive(Clone)]
pub struct EastMoneyClient {
    client: reqwest::Client,
    base_url: String,
}

impl EastMoneyClient {
    /// Client for `base_url`, normally [`DEFAULT_BASE_URL`].
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> anyhow::Result<Value> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .headers(headers)
            .timeout(Duration::from_secs(5))
            .send()
            .await?
            .error_for_status()?;

        resp.json()
            .await
            .with_context(|| format!("invalid EastMoney payload from {path}"))
    }

    /// Snapshot of every A-share (SH, SZ and BJ boards).
    pub async fn fetch_a_share_list(&self) -> anyhow::Result<Vec<StockSnapshot>> {
        let data = self
            .get(
                "/api/qt/clist/get",
                &[
                    ("pn", "1"),
                    ("pz", "5000"),
                    ("po", "1"),
                    ("np", "1"),
                    ("fltt", "2"),
                    ("invt", "2"),
                    ("fid", "f3"),
                    ("fs", "m:0+t:6"),
                    ("fields", "f12,f14,f2,f3,f4,f6"),
                ],
            )
            .await?;

        Ok(diff_rows(&data).map(parse_stock).collect())
    }

    pub async fn fetch_index_spot(&self) -> anyhow::Result<Vec<IndexQuote>> {
        let secids = INDEX_SECIDS
            .iter()
            .map(|(secid, _)| *secid)
            .collect::<Vec<_>>()
            .join(",");
        let data = self
            .get(
                "/api/qt/ulist.np/get",
                &[
                    ("fltt", "2"),
                    ("invt", "2"),
                    ("fields", "f2,f3,f4,f12,f13,f14,f5,f6,f15,f16,f17,f18"),
                    ("secids", secids.as_str()),
                ],
            )
            .await?;

        Ok(diff_rows(&data).map(parse_index).collect())
    }
}

/// `data.diff` is an array with `np=1` and an index-keyed object otherwise.
fn diff_rows(payload: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match payload.get("data").and_then(|data| data.get("diff")) {
        Some(Value::Array(rows)) => Box::new(rows.iter()),
        Some(Value::Object(rows)) => Box::new(rows.values()),
        _ => Box::new(std::iter::empty()),
    }
}

/// Numbers arrive as JSON numbers, numeric strings, or `"-"` when absent.
fn number(row: &Value, field: &str) -> Option<f64> {
    let value = match row.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn text(row: &Value, field: &str) -> Option<String> {
    match row.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_stock(row: &Value) -> StockSnapshot {
    let code = text(row, "f12").unwrap_or_default();
    StockSnapshot {
        market: detect_market(&code).to_string(),
        code,
        name: text(row, "f14"),
        price: number(row, "f2"),
        pct_change: number(row, "f3"),
        change: number(row, "f4"),
        amount: number(row, "f6"),
    }
}

fn parse_index(row: &Value) -> IndexQuote {
    let code = text(row, "f12").unwrap_or_default();
    let secid = format!("{}.{code}", text(row, "f13").unwrap_or_default());
    let name = INDEX_SECIDS
        .iter()
        .find(|(id, _)| *id == secid)
        .map(|(_, name)| name.to_string())
        .or_else(|| text(row, "f14"))
        .unwrap_or_default();
    let field = |f: &str| number(row, f).unwrap_or(0.0);

    IndexQuote {
        name,
        price: field("f2"),
        change: field("f4"),
        pct_change: field("f3"),
        open: field("f17"),
        high: field("f15"),
        low: field("f16"),
        volume: field("f5"),
        amount: field("f6"),
        code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stock_rows_tolerate_suspended_values() {
        let payload = json!({
            "data": {"diff": [
                {"f12": "600519", "f14": "贵州茅台", "f2": 1700.5, "f3": 1.2, "f4": 20.1, "f6": 5.1e9},
                {"f12": "000002", "f14": "万科A", "f2": "-", "f3": "-", "f4": "-", "f6": "-"}
            ]}
        });

        let rows: Vec<_> = diff_rows(&payload).map(parse_stock).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].market, "SH");
        assert_eq!(rows[0].pct_change, Some(1.2));
        assert_eq!(rows[1].market, "SZ");
        assert_eq!(rows[1].price, None);
        assert_eq!(rows[1].name.as_deref(), Some("万科A"));
    }

    #[test]
    fn diff_as_object_is_accepted() {
        let payload = json!({"data": {"diff": {"0": {"f12": "430047"}}}});
        let rows: Vec<_> = diff_rows(&payload).map(parse_stock).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].market, "OTHER");
    }

    #[test]
    fn null_data_yields_no_rows() {
        let payload = json!({"rc": 0, "data": null});
        assert_eq!(diff_rows(&payload).count(), 0);
    }

    #[test]
    fn index_name_comes_from_secid_table() {
        let row = json!({"f12": "399001", "f13": 0, "f14": "SZ COMP", "f2": 9876.5, "f3": -0.5});
        let quote = parse_index(&row);
        assert_eq!(quote.name, "深证成指");
        assert_eq!(quote.price, 9876.5);
        assert_eq!(quote.high, 0.0);

        let unknown = json!({"f12": "000905", "f13": 1, "f14": "中证500"});
        assert_eq!(parse_index(&unknown).name, "中证500");
    }
}

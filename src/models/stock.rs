use serde::{Deserialize, Serialize};

/// One row of the full-market snapshot, as EastMoney reports it.
///
/// Suspended stocks come back with `"-"` in the numeric columns, so every
/// number is optional here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockSnapshot {
    pub code: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub pct_change: Option<f64>,
    pub change: Option<f64>,
    /// Turnover in yuan
    pub amount: Option<f64>,
    /// `SH`, `SZ` or `OTHER`
    pub market: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRow {
    pub code: String,
    pub market: String,
    pub name: String,
    pub price: f64,
    pub pct_change: f64,
    pub amount: f64,
}

impl From<&StockSnapshot> for StockRow {
    fn from(item: &StockSnapshot) -> Self {
        Self {
            code: item.code.clone(),
            market: item.market.clone(),
            name: item.name.clone().unwrap_or_default(),
            price: item.price.unwrap_or(0.0),
            pct_change: item.pct_change.unwrap_or(0.0),
            amount: item.amount.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockList {
    pub list: Vec<StockRow>,
    pub ok: bool,
}

impl StockList {
    pub fn failed() -> Self {
        Self {
            list: Vec::new(),
            ok: false,
        }
    }
}

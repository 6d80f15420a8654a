use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexQuote {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub pct_change: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub amount: f64,
}

/// Advance/decline counts across the whole A-share market.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketBreadth {
    pub up: u32,
    pub down: u32,
    pub flat: u32,
    pub limit_up: u32,
    pub limit_down: u32,
    /// Yuan, rounded to two decimals
    pub total_amount: f64,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MarketSection {
    Breadth(MarketBreadth),
    Error { error: String },
}

impl MarketSection {
    pub fn breadth(&self) -> Option<&MarketBreadth> {
        match self {
            MarketSection::Breadth(breadth) => Some(breadth),
            MarketSection::Error { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub date: String,
    pub time: String,
    pub indices: Vec<IndexQuote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices_error: Option<String>,
    pub market: MarketSection,
    pub ok: bool,
}

impl Summary {
    /// First index whose display name contains `needle`.
    pub fn find_index(&self, needle: &str) -> Option<&IndexQuote> {
        self.indices.iter().find(|quote| quote.name.contains(needle))
    }
}

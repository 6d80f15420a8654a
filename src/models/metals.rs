use serde::{Deserialize, Serialize};

/// Body of `GET /v1/latest` on metals.dev.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestResponse {
    pub status: Option<String>,
    #[serde(default)]
    pub metals: MetalPrices,
    pub currency: Option<String>,
    pub unit: Option<String>,
    /// ISO-8601, e.g. `2024-05-06T08:30:12.345Z`
    pub timestamp: Option<String>,
    pub error_message: Option<String>,
}

/// Spot prices plus the reference benchmarks we display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetalPrices {
    pub gold: Option<f64>,
    pub silver: Option<f64>,
    pub lbma_gold_am: Option<f64>,
    pub lbma_gold_pm: Option<f64>,
    pub mcx_gold: Option<f64>,
    pub ibja_gold: Option<f64>,
    pub lbma_silver: Option<f64>,
    pub mcx_silver: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetalsQuote {
    pub metals: MetalPrices,
    pub currency: Option<String>,
    pub unit: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Positive,
    Negative,
    Neutral,
}

impl ChangeDirection {
    pub fn css_class(self) -> &'static str {
        match self {
            ChangeDirection::Positive => "positive",
            ChangeDirection::Negative => "negative",
            ChangeDirection::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceChange {
    pub direction: ChangeDirection,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Benchmark {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetalCard {
    pub name: String,
    pub spot: Option<f64>,
    pub currency: String,
    pub change: PriceChange,
    pub benchmarks: Vec<Benchmark>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardStatus {
    pub message: String,
    pub is_error: bool,
}

/// Everything the metals page shows, pushed to websocket clients on change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetalsSnapshot {
    pub status: BoardStatus,
    pub gold: Option<MetalCard>,
    pub silver: Option<MetalCard>,
    pub unit: Option<String>,
    pub last_updated: Option<String>,
    pub currency: String,
    pub polling: bool,
    pub interval_secs: f64,
}

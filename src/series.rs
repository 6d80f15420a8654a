use std::collections::VecDeque;

use serde::Serialize;

use crate::models::summary::Summary;

/// Points kept per chart; older samples are dropped first.
pub const MAX_POINTS: usize = 60;

pub const SH_INDEX: &str = "上证指数";
pub const SZ_INDEX: &str = "深证成指";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub sh: f64,
    pub sz: f64,
    pub up: f64,
    pub down: f64,
}

impl SeriesPoint {
    pub fn from_summary(summary: &Summary) -> Self {
        let price_of = |name: &str| summary.find_index(name).map(|q| q.price).unwrap_or(0.0);
        let breadth = summary.market.breadth();
        Self {
            label: summary.time.clone(),
            sh: price_of(SH_INDEX),
            sz: price_of(SZ_INDEX),
            up: breadth.map(|b| f64::from(b.up)).unwrap_or(0.0),
            down: breadth.map(|b| f64::from(b.down)).unwrap_or(0.0),
        }
    }
}

/// Session history behind the index and breadth line charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    points: VecDeque<SeriesPoint>,
}

/// Column-oriented view, the shape chart clients expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesColumns {
    pub labels: Vec<String>,
    pub sh: Vec<f64>,
    pub sz: Vec<f64>,
    pub up: Vec<f64>,
    pub down: Vec<f64>,
}

impl ChartSeries {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(MAX_POINTS),
        }
    }

    pub fn push(&mut self, point: SeriesPoint) {
        self.points.push_back(point);
        while self.points.len() > MAX_POINTS {
            self.points.pop_front();
        }
    }

    pub fn record(&mut self, summary: &Summary) {
        self.push(SeriesPoint::from_summary(summary));
    }

    pub fn columns(&self) -> SeriesColumns {
        let column = |f: fn(&SeriesPoint) -> f64| self.points.iter().map(f).collect::<Vec<_>>();
        SeriesColumns {
            labels: self.points.iter().map(|p| p.label.clone()).collect(),
            sh: column(|p| p.sh),
            sz: column(|p| p.sz),
            up: column(|p| p.up),
            down: column(|p| p.down),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::{IndexQuote, MarketBreadth, MarketSection};

    fn summary(time: &str) -> Summary {
        Summary {
            date: "2024-05-06".to_string(),
            time: time.to_string(),
            indices: vec![
                IndexQuote {
                    name: "上证指数".to_string(),
                    price: 3100.5,
                    ..Default::default()
                },
                IndexQuote {
                    name: "深证成指".to_string(),
                    price: 9800.25,
                    ..Default::default()
                },
            ],
            indices_error: None,
            market: MarketSection::Breadth(MarketBreadth {
                up: 3000,
                down: 1800,
                ..Default::default()
            }),
            ok: true,
        }
    }

    #[test]
    fn record_picks_named_indices_and_breadth() {
        let mut series = ChartSeries::new();
        series.record(&summary("10:00:00"));

        let columns = series.columns();
        assert_eq!(columns.labels, vec!["10:00:00"]);
        assert_eq!(columns.sh, vec![3100.5]);
        assert_eq!(columns.sz, vec![9800.25]);
        assert_eq!(columns.up, vec![3000.0]);
        assert_eq!(columns.down, vec![1800.0]);
    }

    #[test]
    fn missing_data_records_zeros() {
        let mut failed = summary("10:00:03");
        failed.indices.clear();
        failed.market = MarketSection::Error {
            error: "未获取到行情数据".to_string(),
        };

        let point = SeriesPoint::from_summary(&failed);
        assert_eq!((point.sh, point.sz, point.up, point.down), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn keeps_only_the_latest_points() {
        let mut series = ChartSeries::new();
        for i in 0..(MAX_POINTS + 5) {
            series.record(&summary(&format!("t{i}")));
        }

        let labels = series.columns().labels;
        assert_eq!(labels.len(), MAX_POINTS);
        assert_eq!(labels.first().map(String::as_str), Some("t5"));
        assert_eq!(labels.last().map(String::as_str), Some("t64"));
    }
}

//! Display formatting shared by the dashboards.
//!
//! Missing values render as `—` on the A-share board and `--` on the metals
//! board.

use crate::models::metals::{ChangeDirection, PriceChange};

pub const DASH: &str = "—";
pub const METAL_DASH: &str = "--";

/// Drops NaN and folds `-0.0` into `0.0` so it never prints as `-0.00`.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan()).map(|v| v + 0.0)
}

/// Comma-grouped number with at most `max_fraction` digits, trailing zeros
/// trimmed.
fn group_thousands(value: f64, max_fraction: usize) -> String {
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // rounding to zero drops the sign, like toLocaleString
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

pub fn format_num(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => group_thousands(v, 2),
        None => DASH.to_string(),
    }
}

pub fn format_pct(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => {
            let sign = if v >= 0.0 { "+" } else { "" };
            format!("{sign}{v:.2}%")
        }
        None => DASH.to_string(),
    }
}

/// CSS class for a percentage cell: `up`, `down` or `flat`.
pub fn pct_class(value: Option<f64>) -> &'static str {
    match present(value) {
        Some(v) if v > 0.0 => "up",
        Some(v) if v < 0.0 => "down",
        _ => "flat",
    }
}

/// Turnover in yuan, shown in 亿 or 万亿.
pub fn format_amount(yuan: Option<f64>) -> String {
    let Some(yuan) = present(yuan) else {
        return DASH.to_string();
    };
    let yi = yuan / 1e8;
    if yi >= 10_000.0 {
        format!("{:.2} 万亿", yi / 10_000.0)
    } else {
        format!("{yi:.2} 亿")
    }
}

pub fn market_label(market: &str) -> &str {
    match market {
        "SH" => "沪",
        "SZ" => "深",
        other => other,
    }
}

pub fn format_metal_price(value: Option<f64>) -> String {
    match present(value) {
        Some(v) if v >= 1000.0 => group_thousands(v, 2),
        Some(v) => format!("{v:.3}"),
        None => METAL_DASH.to_string(),
    }
}

/// Change of a spot price since the previous poll.
pub fn price_change(current: Option<f64>, previous: Option<f64>) -> PriceChange {
    let (Some(current), Some(previous)) = (current, previous) else {
        return PriceChange {
            direction: ChangeDirection::Neutral,
            text: "变化: --".to_string(),
        };
    };

    let diff = current - previous + 0.0;
    let pct = if previous != 0.0 {
        diff / previous * 100.0 + 0.0
    } else {
        0.0
    };

    let (direction, arrow) = if diff > 0.0 {
        (ChangeDirection::Positive, "↑")
    } else if diff < 0.0 {
        (ChangeDirection::Negative, "↓")
    } else {
        (ChangeDirection::Neutral, "")
    };
    let diff_sign = if diff >= 0.0 { "+" } else { "" };
    let pct_sign = if pct >= 0.0 { "+" } else { "" };

    PriceChange {
        direction,
        text: format!("{arrow} {diff_sign}{diff:.3} ({pct_sign}{pct:.2}%)"),
    }
}

use clap::Parser;
use std::net::SocketAddr;

use crate::error::normalize_currency;
use crate::services::{eastmoney, metals};

/// Runtime settings; every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "marketboard", version, about = "A-share summary and precious-metals dashboards")]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "MARKETBOARD_BIND", default_value = "127.0.0.1:5050")]
    pub bind: SocketAddr,

    #[arg(long, env = "EASTMONEY_BASE_URL", default_value = eastmoney::DEFAULT_BASE_URL)]
    pub eastmoney_base_url: String,

    #[arg(long, env = "METALS_BASE_URL", default_value = metals::DEFAULT_BASE_URL)]
    pub metals_base_url: String,

    /// metals.dev API key; can also be entered on the metals page
    #[arg(long, env = "METALS_API_KEY", default_value = "", hide_env_values = true)]
    pub metals_api_key: String,

    /// Quote currency for metals prices
    #[arg(long, env = "METALS_CURRENCY", default_value = "USD", value_parser = normalize_currency)]
    pub currency: String,

    /// Metals refresh interval in seconds, clamped to 3..=300
    #[arg(long, env = "METALS_REFRESH_INTERVAL", default_value = "10")]
    pub refresh_interval: String,

    /// Start metals polling at boot instead of waiting for the page
    #[arg(long, env = "METALS_AUTOSTART")]
    pub autostart_metals: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_public_endpoints() {
        let config = Config::try_parse_from(["marketboard"]).expect("defaults parse");
        assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 5050)));
        assert_eq!(config.eastmoney_base_url, "https://push2.eastmoney.com");
        assert_eq!(config.metals_base_url, "https://api.metals.dev");
        assert_eq!(config.currency, "USD");
        assert_eq!(config.refresh_interval, "10");
        assert!(!config.autostart_metals);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "marketboard",
            "--bind",
            "0.0.0.0:8080",
            "--currency",
            "CNY",
            "--refresh-interval",
            "30",
            "--autostart-metals",
        ])
        .expect("flags parse");
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.currency, "CNY");
        assert_eq!(config.refresh_interval, "30");
        assert!(config.autostart_metals);
    }

    #[test]
    fn currency_flag_is_normalized() {
        let config = Config::try_parse_from(["marketboard", "--currency", " usd "])
            .expect("currency parses");
        assert_eq!(config.currency, "USD");

        assert!(Config::try_parse_from(["marketboard", "--currency", "dollars"]).is_err());
    }
}

use std::env;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use once_cell::sync::Lazy;
use url::Url;

/// First game id served by the beta cluster.
pub const DEFAULT_BETA_THRESHOLD: u64 = 10_000;
/// First game id served by the production cluster.
pub const DEFAULT_LIVE_THRESHOLD: u64 = 100_000;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_TOAST_CAPACITY: usize = 64;

static DEFAULT_GAME_LIST_PROXY: Lazy<Url> = Lazy::new(|| {
    Url::parse("http://127.0.0.1:5173/api/live/").expect("default game list proxy URL is valid")
});

/// Configuration for the gateway: cluster base URLs, routing thresholds and
/// transport settings. Base URLs must end with a trailing slash so endpoint
/// paths join underneath them.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub dev_base: Url,
    pub beta_base: Url,
    pub live_base: Url,
    pub beta_threshold: u64,
    pub live_threshold: u64,
    /// Local development mode: the zero sentinel routes to the development
    /// cluster and the game list is fetched through the local proxy.
    pub dev_mode: bool,
    pub game_list_dev_proxy: Url,
    pub request_timeout: Duration,
    pub toast_capacity: usize,
}

impl GatewayConfig {
    pub fn new(dev_base: Url, beta_base: Url, live_base: Url) -> Self {
        Self {
            dev_base,
            beta_base,
            live_base,
            beta_threshold: DEFAULT_BETA_THRESHOLD,
            live_threshold: DEFAULT_LIVE_THRESHOLD,
            dev_mode: false,
            game_list_dev_proxy: DEFAULT_GAME_LIST_PROXY.clone(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            toast_capacity: DEFAULT_TOAST_CAPACITY,
        }
    }

    /// Loads the configuration from `GATEWAY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let dev_base = parse_url_var("GATEWAY_DEV_URL")?;
        let beta_base = parse_url_var("GATEWAY_BETA_URL")?;
        let live_base = parse_url_var("GATEWAY_LIVE_URL")?;

        let mut config = Self::new(dev_base, beta_base, live_base);
        if let Some(threshold) = parse_optional_u64("GATEWAY_BETA_THRESHOLD")? {
            config.beta_threshold = threshold;
        }
        if let Some(threshold) = parse_optional_u64("GATEWAY_LIVE_THRESHOLD")? {
            config.live_threshold = threshold;
        }
        if let Ok(raw) = env::var("GATEWAY_DEV_MODE") {
            config.dev_mode = matches!(raw.trim(), "1" | "true" | "yes");
        }
        if let Ok(raw) = env::var("GATEWAY_GAME_LIST_PROXY") {
            config.game_list_dev_proxy =
                Url::parse(&raw).context("invalid GATEWAY_GAME_LIST_PROXY")?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.live_threshold > self.beta_threshold,
            "live threshold ({}) must be greater than beta threshold ({})",
            self.live_threshold,
            self.beta_threshold
        );
        Ok(())
    }
}

fn parse_url_var(var: &str) -> Result<Url> {
    let raw = env::var(var).with_context(|| format!("environment variable {var} not set"))?;
    Url::parse(&raw).with_context(|| format!("invalid URL in {var}: {raw}"))
}

fn parse_optional_u64(var: &str) -> Result<Option<u64>> {
    match env::var(var) {
        Ok(raw) => {
            let parsed = raw
                .parse::<u64>()
                .with_context(|| format!("invalid {var}: {raw}"))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> GatewayConfig {
        GatewayConfig::new(
            Url::parse("https://dev.example.net/game/").unwrap(),
            Url::parse("https://beta.example.net/game/").unwrap(),
            Url::parse("https://play.example.net/game/").unwrap(),
        )
    }

    #[test]
    fn defaults_are_valid() {
        let config = sample_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.beta_threshold, DEFAULT_BETA_THRESHOLD);
        assert_eq!(config.live_threshold, DEFAULT_LIVE_THRESHOLD);
        assert!(!config.dev_mode);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut config = sample_config();
        config.beta_threshold = 200_000;
        assert!(config.validate().is_err());
    }
}

use url::Url;

use crate::config::GatewayConfig;

/// Endpoint cluster a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterTarget {
    Development,
    Beta,
    Production,
}

impl ClusterTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Beta => "beta",
            Self::Production => "production",
        }
    }

    pub fn base_url(self, config: &GatewayConfig) -> &Url {
        match self {
            Self::Development => &config.dev_base,
            Self::Beta => &config.beta_base,
            Self::Production => &config.live_base,
        }
    }
}

/// Picks the cluster for one invocation from the current partition key.
///
/// Total and deterministic: keys below the beta threshold stay on development,
/// keys from the beta threshold up go to beta, keys from the live threshold up
/// go to production. The zero sentinel means "no game yet" and maps to
/// development in dev mode, production otherwise. The decision is recomputed
/// on every call; the key can change between invocations within a session.
pub fn resolve_cluster(partition_key: u64, config: &GatewayConfig) -> ClusterTarget {
    let mut target = ClusterTarget::Development;
    if partition_key >= config.beta_threshold {
        target = ClusterTarget::Beta;
    }
    if partition_key >= config.live_threshold {
        target = ClusterTarget::Production;
    }
    if partition_key == 0 {
        target = if config.dev_mode {
            ClusterTarget::Development
        } else {
            ClusterTarget::Production
        };
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dev_mode: bool) -> GatewayConfig {
        let mut config = GatewayConfig::new(
            Url::parse("https://dev.example.net/game/").unwrap(),
            Url::parse("https://beta.example.net/game/").unwrap(),
            Url::parse("https://play.example.net/game/").unwrap(),
        );
        config.beta_threshold = 10_000;
        config.live_threshold = 100_000;
        config.dev_mode = dev_mode;
        config
    }

    #[test]
    fn thresholds_partition_the_key_space() {
        let config = config(false);
        assert_eq!(resolve_cluster(1, &config), ClusterTarget::Development);
        assert_eq!(resolve_cluster(9_999, &config), ClusterTarget::Development);
        assert_eq!(resolve_cluster(10_000, &config), ClusterTarget::Beta);
        assert_eq!(resolve_cluster(50_000, &config), ClusterTarget::Beta);
        assert_eq!(resolve_cluster(99_999, &config), ClusterTarget::Beta);
        assert_eq!(resolve_cluster(100_000, &config), ClusterTarget::Production);
        assert_eq!(resolve_cluster(u64::MAX, &config), ClusterTarget::Production);
    }

    #[test]
    fn zero_sentinel_depends_only_on_dev_mode() {
        assert_eq!(
            resolve_cluster(0, &config(true)),
            ClusterTarget::Development
        );
        assert_eq!(
            resolve_cluster(0, &config(false)),
            ClusterTarget::Production
        );
    }

    #[test]
    fn resolution_is_total_and_deterministic() {
        let config = config(false);
        for key in (0..1_000_000).step_by(7_919) {
            let first = resolve_cluster(key, &config);
            let second = resolve_cluster(key, &config);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn base_url_follows_the_cluster() {
        let config = config(false);
        assert_eq!(
            ClusterTarget::Beta.base_url(&config).as_str(),
            "https://beta.example.net/game/"
        );
    }
}

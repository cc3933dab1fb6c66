mod format;
mod types;

use tokio::time::{Duration, Instant};

use crate::config::ConfigSource;

pub use self::format::format_proxy;
use self::types::UsedIdentifiers;

/// Longest time an identifier can stay marked as used (100 years).
pub const MAX_IDENTIFIER_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Resolves the configured proxy and keeps track of recently used identifiers.
pub struct ProxyResolver {
    config: Box<dyn ConfigSource>,
    identifiers: UsedIdentifiers,
}

impl ProxyResolver {
    pub fn new<C>(config: C) -> Self
    where
        C: ConfigSource + 'static,
    {
        Self {
            config: Box::new(config),
            identifiers: UsedIdentifiers::default(),
        }
    }

    /// Configured proxy exactly as written, `None` when unset or empty.
    pub fn get_proxy(&self) -> Option<String> {
        self.config.proxy_url().filter(|url| !url.is_empty())
    }

    /// Configured proxy in canonical URL form.
    pub fn resolve_proxy(&self) -> Option<String> {
        format_proxy(self.get_proxy().as_deref())
    }

    /// Records the identifier as used for `ttl`, replacing any earlier expiry.
    ///
    /// `ttl` is capped at [`MAX_IDENTIFIER_TTL`].
    pub async fn mark_identifier_used(&self, identifier: impl Into<String>, ttl: Duration) {
        let identifier = identifier.into();
        let now = Instant::now();

        let valid_until = match now.checked_add(ttl.min(MAX_IDENTIFIER_TTL)) {
            Some(valid_until) => valid_until,
            None => {
                log::warn!("ttl {:?} for {} is out of range, not marking", ttl, identifier);
                return;
            }
        };

        let mut identifiers = self.identifiers.0.lock().await;
        identifiers.insert(identifier, valid_until);
    }

    pub async fn is_identifier_used(&self, identifier: &str) -> bool {
        let identifiers = self.identifiers.0.lock().await;
        let now = Instant::now();

        identifiers
            .get(identifier)
            .map_or(false, |valid_until| *valid_until >= now)
    }

    pub async fn used_identifier_count(&self) -> usize {
        self.identifiers.0.lock().await.len()
    }

    pub async fn cleanup_expired_identifiers(&self) {
        let mut identifiers = self.identifiers.0.lock().await;
        let now = Instant::now();
        let before = identifiers.len();

        // O(n), fine for the handful of identifiers kept here
        identifiers.retain(|_, valid_until| *valid_until >= now);

        let removed = before - identifiers.len();
        if removed > 0 {
            log::debug!("removed {} expired identifiers", removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time;

    use super::*;
    use crate::config::StaticConfig;

    fn resolver(proxy_url: Option<&str>) -> ProxyResolver {
        ProxyResolver::new(StaticConfig(proxy_url.map(String::from)))
    }

    #[test]
    fn get_proxy_treats_empty_as_unset() {
        assert_eq!(resolver(None).get_proxy(), None);
        assert_eq!(resolver(Some("")).get_proxy(), None);
    }

    #[test]
    fn get_proxy_returns_raw_value() {
        assert_eq!(
            resolver(Some("user:pass@host:1080")).get_proxy().as_deref(),
            Some("user:pass@host:1080")
        );
        assert_eq!(
            resolver(Some("garbage:1:2")).get_proxy().as_deref(),
            Some("garbage:1:2")
        );
    }

    #[test]
    fn resolve_proxy_normalizes_configured_value() {
        assert_eq!(
            resolver(Some("host:1080")).resolve_proxy().as_deref(),
            Some("socks5://host:1080")
        );
        assert_eq!(
            resolver(Some("http://proxy:3128")).resolve_proxy().as_deref(),
            Some("http://proxy:3128")
        );
        assert_eq!(resolver(Some("garbage:1:2")).resolve_proxy(), None);
        assert_eq!(resolver(None).resolve_proxy(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_removes_only_expired_identifiers() {
        let resolver = resolver(None);

        resolver.mark_identifier_used("a", Duration::from_secs(1)).await;
        resolver.mark_identifier_used("b", Duration::from_secs(1002)).await;

        time::advance(Duration::from_secs(2)).await;
        resolver.cleanup_expired_identifiers().await;

        assert_eq!(resolver.used_identifier_count().await, 1);
        assert!(!resolver.is_identifier_used("a").await);
        assert!(resolver.is_identifier_used("b").await);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expiring_exactly_now_survives_cleanup() {
        let resolver = resolver(None);

        resolver.mark_identifier_used("edge", Duration::from_secs(10)).await;
        time::advance(Duration::from_secs(10)).await;
        resolver.cleanup_expired_identifiers().await;

        assert_eq!(resolver.used_identifier_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_identifier_is_not_used_before_cleanup() {
        let resolver = resolver(None);

        resolver.mark_identifier_used("a", Duration::from_secs(5)).await;
        assert!(resolver.is_identifier_used("a").await);
        assert!(!resolver.is_identifier_used("unknown").await);

        time::advance(Duration::from_secs(6)).await;

        assert!(!resolver.is_identifier_used("a").await);
        assert_eq!(resolver.used_identifier_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn marking_again_extends_expiry() {
        let resolver = resolver(None);

        resolver.mark_identifier_used("a", Duration::from_secs(5)).await;
        time::advance(Duration::from_secs(4)).await;
        resolver.mark_identifier_used("a", Duration::from_secs(5)).await;
        time::advance(Duration::from_secs(4)).await;
        resolver.cleanup_expired_identifiers().await;

        assert!(resolver.is_identifier_used("a").await);
    }

    #[tokio::test]
    async fn cleanup_on_empty_mapping_is_noop() {
        let resolver = resolver(None);
        resolver.cleanup_expired_identifiers().await;

        assert_eq!(resolver.used_identifier_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_ttl_is_capped() {
        let resolver = resolver(None);

        resolver.mark_identifier_used("forever", Duration::MAX).await;
        time::advance(Duration::from_secs(3600)).await;
        resolver.cleanup_expired_identifiers().await;

        assert!(resolver.is_identifier_used("forever").await);
        assert_eq!(resolver.used_identifier_count().await, 1);

        time::advance(MAX_IDENTIFIER_TTL).await;
        resolver.cleanup_expired_identifiers().await;

        assert!(!resolver.is_identifier_used("forever").await);
        assert_eq!(resolver.used_identifier_count().await, 0);
    }
}

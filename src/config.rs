//! Process-wide configuration, read once at startup and passed by reference
//! through call sites — no hidden singletons beyond the MX cache itself.

use std::time::Duration;

/// Immutable configuration shared by the verifier, prober, and resolver.
#[derive(Debug, Clone)]
pub struct Config {
    pub dns_timeout: Duration,
    pub dns_lifetime: Duration,
    pub smtp_timeout: Duration,
    pub probe_pause: Duration,
    pub max_workers: usize,
    pub mx_cache_ttl: Duration,
    pub helo_domain: String,
    pub mail_from: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_secs(3),
            dns_lifetime: Duration::from_secs(3),
            smtp_timeout: Duration::from_secs(6),
            probe_pause: Duration::from_millis(80),
            max_workers: 20,
            mx_cache_ttl: Duration::from_secs(3600),
            helo_domain: "example.com".to_string(),
            mail_from: "probe@example.com".to_string(),
        }
    }
}

impl Config {
    /// Builds a `Config` from environment variables, falling back to the
    /// documented default for any variable that is absent or unparseable.
    /// A parse failure is logged, not fatal.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dns_timeout: env_duration_secs("DNS_TIMEOUT", defaults.dns_timeout),
            dns_lifetime: env_duration_secs("DNS_LIFETIME", defaults.dns_lifetime),
            smtp_timeout: env_duration_secs("SMTP_TIMEOUT", defaults.smtp_timeout),
            probe_pause: env_duration_secs("PROBE_PAUSE", defaults.probe_pause),
            max_workers: env_parsed("MAX_WORKERS", defaults.max_workers),
            mx_cache_ttl: env_duration_secs("MX_CACHE_TTL", defaults.mx_cache_ttl),
            helo_domain: env_string("HELO_DOMAIN", &defaults.helo_domain),
            mail_from: env_string("MAIL_FROM", &defaults.mail_from),
        }
    }
}

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "failed to parse env var, using default");
            default
        }),
        Err(_) => default,
    }
}

fn env_duration_secs(name: &str, default: Duration) -> Duration {
    match std::env::var(name) {
        Ok(raw) => match raw.parse::<f64>() {
            Ok(secs) if secs.is_finite() && secs >= 0.0 => Duration::from_secs_f64(secs),
            _ => {
                tracing::warn!(variable = name, value = %raw, "failed to parse env var, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = Config::default();
        assert_eq!(config.dns_timeout, Duration::from_secs(3));
        assert_eq!(config.smtp_timeout, Duration::from_secs(6));
        assert_eq!(config.probe_pause, Duration::from_millis(80));
        assert_eq!(config.max_workers, 20);
        assert_eq!(config.mx_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.helo_domain, "example.com");
        assert_eq!(config.mail_from, "probe@example.com");
    }
}

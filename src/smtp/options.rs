use std::time::Duration;

/// Parameters the prober needs that are not specific to one target address.
///
/// Built once from [`crate::config::Config`] and passed by reference; the
/// prober itself holds no state across calls.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub port: u16,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
    pub probe_pause: Duration,
    pub helo_domain: String,
    pub mail_from: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            connect_timeout: Duration::from_secs(6),
            command_timeout: Duration::from_secs(6),
            probe_pause: Duration::from_millis(80),
            helo_domain: "example.com".to_string(),
            mail_from: "probe@example.com".to_string(),
        }
    }
}

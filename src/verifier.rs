//! Single-address verification: syntax check → MX → probe → analyze → score.

use crate::config::Config;
use crate::mx::{self, MxCache, Provider};
use crate::scoring::{self, ScoreInput, Status};
use crate::smtp::{self, ProbeOptions, ProbeRecord, ProbeSession};
use crate::timing;

/// One verification record, emitted regardless of which path terminated it.
///
/// Field names match the contract consumers rely on rather than Rust's usual
/// snake_case convention; `serde` renames carry the mapping so the Rust-side
/// names stay idiomatic.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct VerificationResult {
    pub email: String,
    #[serde(rename = "MX")]
    pub mx: Vec<String>,
    #[serde(rename = "Provider")]
    pub provider: String,
    #[serde(rename = "Fake1_Code")]
    pub fake1_code: Option<u16>,
    #[serde(rename = "Fake1_Time")]
    pub fake1_time: Option<f64>,
    #[serde(rename = "Real_Code")]
    pub real_code: Option<u16>,
    #[serde(rename = "Real_Time")]
    pub real_time: Option<f64>,
    #[serde(rename = "Fake2_Code")]
    pub fake2_code: Option<u16>,
    #[serde(rename = "Fake2_Time")]
    pub fake2_time: Option<f64>,
    #[serde(rename = "Timing_Delta")]
    pub timing_delta: Option<u64>,
    #[serde(rename = "Entropy")]
    pub entropy: Option<usize>,
    #[serde(rename = "Avg_Latency")]
    pub avg_latency: Option<u64>,
    #[serde(rename = "Confidence")]
    pub confidence: Option<f64>,
    #[serde(rename = "Pattern")]
    pub pattern: Option<String>,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Deliverable")]
    pub deliverable: bool,
    #[serde(rename = "Reason")]
    pub reason: String,
}

impl VerificationResult {
    fn terminal(email: &str, mx: Vec<String>, reason: impl Into<String>) -> Self {
        Self {
            email: email.to_string(),
            mx,
            provider: Provider::Unknown.as_str().to_string(),
            fake1_code: None,
            fake1_time: None,
            real_code: None,
            real_time: None,
            fake2_code: None,
            fake2_time: None,
            timing_delta: None,
            entropy: None,
            avg_latency: None,
            confidence: None,
            pattern: None,
            score: 0.0,
            status: Status::Invalid.as_str().to_string(),
            deliverable: false,
            reason: reason.into(),
        }
    }

    pub(crate) fn exception(email: &str, detail: impl std::fmt::Display) -> Self {
        let mut result = Self::terminal(email, Vec::new(), format!("exception:{detail}"));
        result.status = Status::Error.as_str().to_string();
        result
    }
}

static SYNTAX_RE: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("syntax regex is valid")
});

/// `true` iff `email` matches the contractual syntax regex. Exposed so the
/// bulk verifier can pre-filter candidates before dispatching work.
pub fn matches_syntax(email: &str) -> bool {
    SYNTAX_RE.is_match(email)
}

/// Verifies a single address, using `cache` for MX lookups.
pub fn verify_email(email: &str, config: &Config, cache: &MxCache) -> VerificationResult {
    let trimmed = email.trim();

    if !matches_syntax(trimmed) {
        return VerificationResult::terminal(trimmed, Vec::new(), "bad_syntax");
    }

    // The regex above guarantees exactly one '@', so this split is infallible.
    let (_, domain) = trimmed.split_once('@').expect("syntax-validated address has '@'");

    let mx_status = match cache.resolve(domain) {
        Ok(status) => status,
        Err(err) => {
            return VerificationResult::terminal(trimmed, Vec::new(), format!("mx_error:{err}"));
        }
    };

    let records = mx_status.records();
    if records.is_empty() {
        return VerificationResult::terminal(trimmed, Vec::new(), "no_mx");
    }

    let mx_hosts: Vec<String> = records.iter().map(|r| r.exchange.clone()).collect();
    let first_mx = &mx_hosts[0];
    let provider = mx::classify_provider(first_mx);

    let probe_options = ProbeOptions {
        port: 25,
        connect_timeout: config.smtp_timeout,
        command_timeout: config.smtp_timeout,
        probe_pause: config.probe_pause,
        helo_domain: config.helo_domain.clone(),
        mail_from: config.mail_from.clone(),
    };

    let session = smtp::probe(first_mx, trimmed, domain, true, &probe_options);

    build_result_from_session(trimmed, mx_hosts, provider, session)
}

/// Builds the final record from a completed (or failed) probe session.
///
/// A failed session (`connected == false`) still runs through the timing
/// analyzer on an empty slice rather than leaving `Timing_Delta`/`Entropy`/
/// `Confidence` absent: those three are always present for a
/// `pattern_analysis` result, and only `Avg_Latency` (nothing to average)
/// and the per-probe fields are absent. This is the `no_data` degenerate
/// case the scorer handles when `decoy1_time`/`real_time` are both `None`.
fn build_result_from_session(
    email: &str,
    mx_hosts: Vec<String>,
    provider: Provider,
    session: ProbeSession,
) -> VerificationResult {
    if !session.connected {
        let analysis = timing::analyze(&[]);
        let scored = scoring::score(ScoreInput {
            decoy1_time: None,
            decoy2_time: None,
            real_time: None,
            confidence: analysis.confidence,
            entropy: analysis.entropy,
            provider,
            real_code: None,
        });
        return VerificationResult {
            email: email.to_string(),
            mx: mx_hosts,
            provider: provider.as_str().to_string(),
            fake1_code: None,
            fake1_time: None,
            real_code: None,
            real_time: None,
            fake2_code: None,
            fake2_time: None,
            timing_delta: Some(analysis.delta),
            entropy: Some(analysis.entropy),
            avg_latency: analysis.avg_latency,
            confidence: Some(analysis.confidence),
            pattern: Some(scored.pattern),
            score: scored.score,
            status: scored.status.as_str().to_string(),
            deliverable: scored.deliverable,
            reason: "pattern_analysis".to_string(),
        };
    }

    let analysis = timing::analyze(&session.records);

    let fake1 = session.records.first();
    let real = session.records.get(1);
    let fake2 = session.records.get(2);

    let scored = scoring::score(ScoreInput {
        decoy1_time: fake1.and_then(probe_time),
        decoy2_time: fake2.and_then(probe_time),
        real_time: real.and_then(probe_time),
        confidence: analysis.confidence,
        entropy: analysis.entropy,
        provider,
        real_code: real.and_then(probe_code),
    });

    VerificationResult {
        email: email.to_string(),
        mx: mx_hosts,
        provider: provider.as_str().to_string(),
        fake1_code: fake1.and_then(probe_code),
        fake1_time: fake1.and_then(probe_time),
        real_code: real.and_then(probe_code),
        real_time: real.and_then(probe_time),
        fake2_code: fake2.and_then(probe_code),
        fake2_time: fake2.and_then(probe_time),
        timing_delta: Some(analysis.delta),
        entropy: Some(analysis.entropy),
        avg_latency: analysis.avg_latency,
        confidence: Some(analysis.confidence),
        pattern: Some(scored.pattern),
        score: scored.score,
        status: scored.status.as_str().to_string(),
        deliverable: scored.deliverable,
        reason: "pattern_analysis".to_string(),
    }
}

fn probe_code(record: &ProbeRecord) -> Option<u16> {
    record.code
}

fn probe_time(record: &ProbeRecord) -> Option<f64> {
    record.latency_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_syntax_without_network_io() {
        let config = Config::default();
        let cache = MxCache::new(config.mx_cache_ttl, config.dns_timeout, config.dns_lifetime);
        let result = verify_email("not-an-email", &config, &cache);
        assert_eq!(result.reason, "bad_syntax");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.status, "invalid");
        assert!(!result.deliverable);
        assert!(result.mx.is_empty());
    }

    #[test]
    fn syntax_regex_matches_spec_pattern() {
        assert!(matches_syntax("alice@example.com"));
        assert!(!matches_syntax("alice@example"));
        assert!(!matches_syntax("not-an-email"));
    }

    #[test]
    fn connect_failure_reports_present_timing_fields_but_absent_latency() {
        let session = ProbeSession {
            connected: false,
            records: vec![ProbeRecord::connect_sentinel()],
        };
        let result = build_result_from_session(
            "user@example.com",
            vec!["mx.example.com".to_string()],
            Provider::Unknown,
            session,
        );

        assert_eq!(result.timing_delta, Some(0));
        assert_eq!(result.entropy, Some(1));
        assert_eq!(result.confidence, Some(0.0));
        assert_eq!(result.avg_latency, None);
        assert_eq!(result.fake1_code, None);
        assert_eq!(result.fake1_time, None);
        assert_eq!(result.real_code, None);
        assert_eq!(result.pattern.as_deref(), Some("no_data"));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.status, "invalid");
        assert!(!result.deliverable);
        assert_eq!(result.reason, "pattern_analysis");
    }
}

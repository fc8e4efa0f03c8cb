//! Wire-level types for the SMTP probe sequence.

/// A raw SMTP reply: status code plus message text, possibly spanning
/// multiple continuation lines joined by `\n`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_transient_failure(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_permanent_failure(&self) -> bool {
        (500..600).contains(&self.code)
    }
}

/// One `RCPT TO` probe: the address used, the reply code if one arrived, and
/// the elapsed time of the `RCPT TO` round trip in milliseconds (two decimal
/// places of precision, per the timing contract the analyzer relies on).
///
/// `code` and `latency_ms` are both absent only for the leading `__connect__`
/// sentinel that marks a session which could never be established.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProbeRecord {
    pub address: String,
    pub code: Option<u16>,
    pub latency_ms: Option<f64>,
}

impl ProbeRecord {
    pub fn connect_sentinel() -> Self {
        Self {
            address: "__connect__".to_string(),
            code: None,
            latency_ms: None,
        }
    }
}

/// Outcome of a full probe sequence against one MX host.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProbeSession {
    /// `true` when the session could not be established at all: `records`
    /// then contains only the `__connect__` sentinel.
    pub connected: bool,
    pub records: Vec<ProbeRecord>,
}

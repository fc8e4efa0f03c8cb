//! ESP (Email Service Provider) classification from an MX hostname.

/// Coarse provider tag used by the scorer to select an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Microsoft365,
    Google,
    Proofpoint,
    Mimecast,
    Barracuda,
    Unknown,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Microsoft365 => "microsoft365",
            Self::Google => "google",
            Self::Proofpoint => "proofpoint",
            Self::Mimecast => "mimecast",
            Self::Barracuda => "barracuda",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the first MX hostname into a coarse provider tag.
///
/// Case-insensitive substring match, first match wins, in the precedence
/// order: microsoft365, google, proofpoint, mimecast, barracuda, unknown.
pub fn classify_provider(mx_host: &str) -> Provider {
    let host = mx_host.to_ascii_lowercase();

    if host.contains("outlook") || host.contains("protection") {
        Provider::Microsoft365
    } else if host.contains("google.com") || host.contains("aspmx") {
        Provider::Google
    } else if host.contains("pphosted") || host.contains("proofpoint") {
        Provider::Proofpoint
    } else if host.contains("mimecast") {
        Provider::Mimecast
    } else if host.contains("barracuda") {
        Provider::Barracuda
    } else {
        Provider::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_providers() {
        assert_eq!(
            classify_provider("mail.protection.outlook.com"),
            Provider::Microsoft365
        );
        assert_eq!(classify_provider("aspmx.l.google.com"), Provider::Google);
        assert_eq!(
            classify_provider("mx0-b01.pphosted.com"),
            Provider::Proofpoint
        );
        assert_eq!(
            classify_provider("eu-smtp-inbound-1.mimecast.com"),
            Provider::Mimecast
        );
        assert_eq!(
            classify_provider("mx.barracudanetworks.com"),
            Provider::Barracuda
        );
        assert_eq!(classify_provider("mx1.example.com"), Provider::Unknown);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify_provider("MAIL.PROTECTION.OUTLOOK.COM"),
            Provider::Microsoft365
        );
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            classify_provider("outlook.protection.google.com"),
            Provider::Microsoft365
        );
    }
}

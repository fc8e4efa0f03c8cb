//! Combines timing signals, provider tag, and the real-address reply code
//! into a pattern label, a numeric score, and a categorical decision.

use crate::mx::Provider;

/// Categorical deliverability decision. `Error` is never produced by
/// [`score`] itself — it is reserved for the bulk verifier's exception path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Valid,
    Risky,
    Invalid,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Risky => "risky",
            Self::Invalid => "invalid",
            Self::Error => "error",
        }
    }

    pub fn is_deliverable(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Inputs consumed by [`score`].
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput {
    pub decoy1_time: Option<f64>,
    pub decoy2_time: Option<f64>,
    pub real_time: Option<f64>,
    pub confidence: f64,
    pub entropy: usize,
    pub provider: Provider,
    pub real_code: Option<u16>,
}

/// Result of [`score`]: a pattern label, a numeric score, and the
/// derived status/deliverable pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreOutput {
    pub pattern: String,
    pub score: f64,
    pub status: Status,
    pub deliverable: bool,
}

/// Pure scoring function: identical inputs always yield identical outputs.
pub fn score(input: ScoreInput) -> ScoreOutput {
    let (decoy1_time, real_time) = match (input.decoy1_time, input.real_time) {
        (Some(d1), Some(real)) => (d1, real),
        _ => {
            return ScoreOutput {
                pattern: "no_data".to_string(),
                score: 0.0,
                status: Status::Invalid,
                deliverable: false,
            };
        }
    };
    let decoy2_time = input.decoy2_time.unwrap_or(decoy1_time);

    let avg_fake = (decoy1_time + decoy2_time) / 2.0;
    let gap_fakes = (decoy1_time - decoy2_time).abs();
    let gap_real = (real_time - avg_fake).abs();

    let mut pattern = pattern_label(gap_fakes, gap_real, real_time, avg_fake);

    let base = (gap_real / 80.0).min(1.0) * 40.0
        + (1.0 - (gap_fakes / 100.0).min(1.0)) * 20.0
        + (input.confidence / 0.35).min(1.0) * 20.0
        + (input.entropy as f64 / 3.0).min(1.0) * 10.0;
    let mut value = base.min(99.0);
    value = (value * 100.0).round() / 100.0;

    apply_esp_overlay(input.provider, input.real_code, &mut pattern, &mut value);
    if input.provider == crate::mx::Provider::Google {
        apply_google_overlay(&pattern, &mut value);
    }

    let status = decide_status(value);
    ScoreOutput {
        pattern,
        score: value,
        deliverable: status.is_deliverable(),
        status,
    }
}

fn pattern_label(gap_fakes: f64, gap_real: f64, real_time: f64, avg_fake: f64) -> String {
    if gap_fakes < 20.0 && gap_real < 20.0 {
        "flat_pattern".to_string()
    } else if gap_real > 60.0 && real_time > avg_fake {
        "strong_delay".to_string()
    } else if gap_fakes < 25.0 && (20.0..=50.0).contains(&gap_real) {
        "semi_flat".to_string()
    } else {
        "unclear".to_string()
    }
}

fn apply_esp_overlay(
    provider: crate::mx::Provider,
    real_code: Option<u16>,
    pattern: &mut String,
    score: &mut f64,
) {
    use crate::mx::Provider::*;
    if !matches!(provider, Microsoft365 | Proofpoint | Mimecast | Barracuda) {
        return;
    }
    match real_code {
        Some(code @ (250 | 450 | 451 | 452)) => {
            *score = 99.0;
            *pattern = format!("smtp_{code}_valid");
        }
        Some(550) => {
            *score = 10.0;
            *pattern = "smtp_550_invalid".to_string();
        }
        Some(code) => {
            *pattern = format!("smtp_{code}_unclear");
        }
        None => {}
    }
}

fn apply_google_overlay(pattern: &str, score: &mut f64) {
    match pattern {
        "strong_delay" => *score = score.max(90.0),
        "flat_pattern" => *score = score.min(40.0),
        _ => {}
    }
}

fn decide_status(score: f64) -> Status {
    if score >= 80.0 {
        Status::Valid
    } else if score >= 55.0 {
        Status::Risky
    } else {
        Status::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mx::Provider;
    use proptest::prelude::*;

    fn base_input() -> ScoreInput {
        ScoreInput {
            decoy1_time: Some(50.0),
            decoy2_time: Some(55.0),
            real_time: Some(180.0),
            confidence: 0.30,
            entropy: 2,
            provider: Provider::Google,
            real_code: Some(250),
        }
    }

    #[test]
    fn missing_decoy1_is_no_data() {
        let mut input = base_input();
        input.decoy1_time = None;
        let out = score(input);
        assert_eq!(out.pattern, "no_data");
        assert_eq!(out.score, 0.0);
        assert_eq!(out.status, Status::Invalid);
        assert!(!out.deliverable);
    }

    #[test]
    fn google_strong_delay_forces_high_score() {
        let out = score(base_input());
        assert_eq!(out.pattern, "strong_delay");
        assert!(out.score >= 90.0);
        assert_eq!(out.status, Status::Valid);
    }

    #[test]
    fn flat_pattern_unknown_provider_is_invalid() {
        let input = ScoreInput {
            decoy1_time: Some(100.0),
            decoy2_time: Some(105.0),
            real_time: Some(102.0),
            confidence: 0.05,
            entropy: 1,
            provider: Provider::Unknown,
            real_code: Some(250),
        };
        let out = score(input);
        assert_eq!(out.pattern, "flat_pattern");
        assert_eq!(out.status, Status::Invalid);
    }

    #[test]
    fn microsoft_550_overlay_forces_invalid() {
        let input = ScoreInput {
            decoy1_time: Some(10.0),
            decoy2_time: Some(15.0),
            real_time: Some(30.0),
            confidence: 0.12,
            entropy: 2,
            provider: Provider::Microsoft365,
            real_code: Some(550),
        };
        let out = score(input);
        assert_eq!(out.score, 10.0);
        assert_eq!(out.status, Status::Invalid);
        assert_eq!(out.pattern, "smtp_550_invalid");
    }

    #[test]
    fn score_boundaries_map_to_expected_status() {
        assert_eq!(decide_status(80.0), Status::Valid);
        assert_eq!(decide_status(79.99), Status::Risky);
        assert_eq!(decide_status(55.0), Status::Risky);
        assert_eq!(decide_status(54.99), Status::Invalid);
    }

    #[test]
    fn scorer_is_pure() {
        let input = base_input();
        assert_eq!(score(input), score(input));
    }

    proptest::proptest! {
        #[test]
        fn score_is_always_in_range_and_consistent_with_status(
            decoy1 in 0.0f64..2000.0,
            decoy2 in 0.0f64..2000.0,
            real in 0.0f64..2000.0,
            confidence in 0.0f64..0.35,
            entropy in 1usize..4,
            real_code in proptest::sample::select(vec![250u16, 450, 451, 452, 550, 500]),
        ) {
            let input = ScoreInput {
                decoy1_time: Some(decoy1),
                decoy2_time: Some(decoy2),
                real_time: Some(real),
                confidence,
                entropy,
                provider: Provider::Unknown,
                real_code: Some(real_code),
            };
            let out = score(input);
            prop_assert!((0.0..=99.0).contains(&out.score));
            prop_assert_eq!(out.deliverable, out.status == Status::Valid);
            prop_assert_eq!(out, score(input));
        }
    }
}

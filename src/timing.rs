//! Derives delta, entropy, average latency, and confidence from a probe
//! sequence.

use crate::smtp::ProbeRecord;

/// Output of [`analyze`]: the signals the scorer consumes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingAnalysis {
    pub delta: u64,
    pub avg_latency: Option<u64>,
    pub entropy: usize,
    pub confidence: f64,
}

/// Analyzes a probe sequence (the connect sentinel must already have been
/// excluded by the caller).
///
/// Returns `(confidence: 0.00, delta: 0, entropy: 1, avg_latency: None)` when
/// no probe carries a latency at all — `delta`, `entropy`, and `confidence`
/// are always present; only the average has nothing to average.
pub fn analyze(records: &[ProbeRecord]) -> TimingAnalysis {
    let latencies: Vec<f64> = records.iter().filter_map(|r| r.latency_ms).collect();
    let codes: std::collections::HashSet<u16> = records.iter().filter_map(|r| r.code).collect();

    if latencies.is_empty() {
        return TimingAnalysis {
            delta: 0,
            avg_latency: None,
            entropy: 1,
            confidence: 0.0,
        };
    }

    let min = latencies.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = latencies.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let delta = if latencies.len() < 2 {
        0
    } else {
        (max - min).floor() as u64
    };

    let mean = latencies.iter().sum::<f64>() / latencies.len() as f64;
    let avg_latency = Some(mean.floor() as u64);

    let entropy = codes.len().max(1);

    let mut confidence = 0.0_f64;
    confidence += if delta as f64 > 120.0 {
        0.25
    } else if delta as f64 > 80.0 {
        0.18
    } else if delta as f64 > 40.0 {
        0.12
    } else if delta as f64 > 10.0 {
        0.06
    } else {
        0.0
    };
    if entropy > 1 {
        confidence += 0.05;
    }
    confidence = confidence.min(0.35);
    confidence = (confidence * 100.0).round() / 100.0;

    TimingAnalysis {
        delta,
        avg_latency,
        entropy,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(latency_ms: Option<f64>, code: Option<u16>) -> ProbeRecord {
        ProbeRecord {
            address: "probe@example.com".to_string(),
            code,
            latency_ms,
        }
    }

    #[test]
    fn empty_latencies_yield_baseline() {
        let records = vec![record(None, None)];
        let analysis = analyze(&records);
        assert_eq!(analysis.confidence, 0.0);
        assert_eq!(analysis.delta, 0);
        assert_eq!(analysis.entropy, 1);
        assert_eq!(analysis.avg_latency, None);
    }

    #[test]
    fn single_latency_has_zero_delta() {
        let records = vec![record(Some(42.0), Some(250))];
        let analysis = analyze(&records);
        assert_eq!(analysis.delta, 0);
        assert_eq!(analysis.avg_latency, Some(42));
    }

    #[test]
    fn delta_boundary_120_is_strictly_greater() {
        let records = vec![record(Some(0.0), Some(250)), record(Some(120.0), Some(550))];
        let analysis = analyze(&records);
        assert_eq!(analysis.delta, 120);
        // delta == 120 is not > 120, so the 0.18 tier applies, not 0.25.
        assert_eq!(analysis.confidence, 0.18 + 0.05);
    }

    #[test]
    fn delta_over_120_hits_top_tier() {
        let records = vec![record(Some(0.0), Some(250)), record(Some(121.0), Some(550))];
        let analysis = analyze(&records);
        assert_eq!(analysis.confidence, 0.25 + 0.05);
    }

    #[test]
    fn entropy_counts_distinct_codes_only() {
        let records = vec![
            record(Some(10.0), Some(250)),
            record(Some(12.0), Some(250)),
            record(Some(14.0), Some(450)),
        ];
        let analysis = analyze(&records);
        assert_eq!(analysis.entropy, 2);
    }
}

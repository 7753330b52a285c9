//! Prediction confidence scoring.
//!
//! Extreme endpoint values or an extreme composite score reduce confidence
//! rather than raising errors: degraded computation is surfaced, never
//! swallowed.

use rand::{Rng, RngCore};

/// Confidence before any penalties apply.
pub const BASE_CONFIDENCE: f64 = 0.8;
/// Assay concentrations inside this range (µM) are considered reliable.
pub const ASSAY_RANGE_MIN_UM: f64 = 1.0;
pub const ASSAY_RANGE_MAX_UM: f64 = 1000.0;
/// Penalty per endpoint outside the reliable assay range.
pub const EXTREME_ENDPOINT_PENALTY: f64 = 0.1;
/// Risk scores inside this band are considered well-supported.
pub const SCORE_BAND_MIN: f64 = 0.5;
pub const SCORE_BAND_MAX: f64 = 9.0;
/// Penalty for a risk score outside the supported band.
pub const EXTREME_SCORE_PENALTY: f64 = 0.15;
/// Default half-width of the confidence jitter.
pub const DEFAULT_JITTER: f64 = 0.05;
/// Reported confidence is clamped to this interval.
pub const CONFIDENCE_MIN: f64 = 0.1;
pub const CONFIDENCE_MAX: f64 = 1.0;

/// Confidence in a computed risk profile, in [CONFIDENCE_MIN, CONFIDENCE_MAX].
/// `jitter` is the half-width of the variability term; 0.0 disables it.
pub fn prediction_confidence(
    tc50: f64,
    ec50: f64,
    risk_score: f64,
    jitter: f64,
    rng: &mut dyn RngCore,
) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if tc50 < ASSAY_RANGE_MIN_UM || tc50 > ASSAY_RANGE_MAX_UM {
        confidence -= EXTREME_ENDPOINT_PENALTY;
    }
    if ec50 < ASSAY_RANGE_MIN_UM || ec50 > ASSAY_RANGE_MAX_UM {
        confidence -= EXTREME_ENDPOINT_PENALTY;
    }
    if risk_score < SCORE_BAND_MIN || risk_score > SCORE_BAND_MAX {
        confidence -= EXTREME_SCORE_PENALTY;
    }

    if jitter > 0.0 {
        confidence += rng.gen_range(-jitter..=jitter);
    }

    confidence.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX)
}

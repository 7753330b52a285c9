//! Mechanism-pathway toxicity scores.
//!
//! Five independent heuristics mapping endpoint concentrations into [0, 1].
//! Each stands in for a pathway-specific biomarker model and is kept as a
//! separate named function so a trained replacement can be dropped in per
//! mechanism without touching the others.

use hepatyx_common::entities::ResolvedEndpoints;
use serde::{Deserialize, Serialize};

/// Oxidative stress, driven by the efficacy concentration range.
pub fn oxidative_stress_score(ec50: f64) -> f64 {
    (100.0 / ec50.max(10.0)).min(1.0)
}

/// Mitochondrial dysfunction, driven by the toxicity concentration range.
pub fn mitochondrial_dysfunction_score(tc50: f64) -> f64 {
    (100.0 / tc50.max(10.0)).min(1.0)
}

/// ER stress, driven by the combined endpoint magnitude.
pub fn er_stress_score(tc50: f64, ec50: f64) -> f64 {
    (150.0 / (tc50 + ec50).max(20.0)).min(1.0)
}

/// Apoptosis, driven by the steepness of the toxicity response (TC20/TC50).
pub fn apoptosis_score(tc20: f64, tc50: f64) -> f64 {
    (2.0 * (tc20 / tc50.max(1.0))).min(1.0)
}

/// Necrosis, driven by the steepness of the efficacy response (EC20/EC50).
pub fn necrosis_score(ec20: f64, ec50: f64) -> f64 {
    (2.0 * (ec20 / ec50.max(1.0))).min(1.0)
}

/// Per-mechanism scores in [0, 1]. Field names are the serialized mechanism
/// names consumed by downstream clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MechanismScores {
    pub oxidative_stress: f64,
    pub mitochondrial_dysfunction: f64,
    pub er_stress: f64,
    pub apoptosis: f64,
    pub necrosis: f64,
}

impl MechanismScores {
    /// Evaluate all five mechanisms; values rounded to 3 decimals for
    /// output-shape compatibility.
    pub fn compute(endpoints: &ResolvedEndpoints) -> Self {
        Self {
            oxidative_stress: round3(oxidative_stress_score(endpoints.ec50)),
            mitochondrial_dysfunction: round3(mitochondrial_dysfunction_score(endpoints.tc50)),
            er_stress: round3(er_stress_score(endpoints.tc50, endpoints.ec50)),
            apoptosis: round3(apoptosis_score(endpoints.tc20, endpoints.tc50)),
            necrosis: round3(necrosis_score(endpoints.ec20, endpoints.ec50)),
        }
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.oxidative_stress,
            self.mitochondrial_dysfunction,
            self.er_stress,
            self.apoptosis,
            self.necrosis,
        ]
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Relative pathway weights. Immutable configuration for aggregating models;
/// the independent default formulas above do not consume them, but replacement
/// models are expected to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismWeights {
    pub oxidative_stress: f64,
    pub mitochondrial_dysfunction: f64,
    pub er_stress: f64,
    pub apoptosis: f64,
    pub necrosis: f64,
}

impl Default for MechanismWeights {
    fn default() -> Self {
        Self {
            oxidative_stress: 0.20,
            mitochondrial_dysfunction: 0.25,
            er_stress: 0.20,
            apoptosis: 0.15,
            necrosis: 0.20,
        }
    }
}

impl MechanismWeights {
    /// Validate that all weights sum to ~1.0
    pub fn validate(&self) -> bool {
        let sum = self.oxidative_stress
            + self.mitochondrial_dysfunction
            + self.er_stress
            + self.apoptosis
            + self.necrosis;
        (sum - 1.0).abs() < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(tc20: f64, tc50: f64, ec20: f64, ec50: f64) -> ResolvedEndpoints {
        ResolvedEndpoints {
            tc20,
            tc50,
            ec20,
            ec50,
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!(MechanismWeights::default().validate());
    }

    #[test]
    fn test_oxidative_stress_pinned() {
        // ec50 200 µM: 100/200 = 0.5
        assert!((oxidative_stress_score(200.0) - 0.5).abs() < 1e-9);
        // Potent compound saturates at 1.0
        assert_eq!(oxidative_stress_score(5.0), 1.0);
    }

    #[test]
    fn test_mitochondrial_floor() {
        // Denominator floors at 10 µM, so the score caps rather than diverges.
        assert_eq!(mitochondrial_dysfunction_score(0.0), 1.0);
        assert!((mitochondrial_dysfunction_score(400.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_er_stress_pinned() {
        assert!((er_stress_score(200.0, 100.0) - 0.5).abs() < 1e-9);
        assert_eq!(er_stress_score(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_apoptosis_ratio() {
        // Shallow curve: tc20 well below tc50.
        assert!((apoptosis_score(20.0, 50.0) - 0.8).abs() < 1e-9);
        // Steep curve saturates.
        assert_eq!(apoptosis_score(40.0, 50.0), 1.0);
    }

    #[test]
    fn test_necrosis_ratio() {
        assert!((necrosis_score(15.0, 60.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_all_scores_in_unit_interval() {
        let cases = [
            endpoints(0.0, 0.0, 0.0, 0.0),
            endpoints(0.01, 0.02, 0.01, 0.02),
            endpoints(20.0, 50.0, 25.0, 45.0),
            endpoints(1e6, 1e6, 1e6, 1e6),
        ];
        for e in cases {
            for score in MechanismScores::compute(&e).as_array() {
                assert!((0.0..=1.0).contains(&score), "score {score} out of range");
            }
        }
    }
}

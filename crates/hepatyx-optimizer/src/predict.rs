//! Candidate property prediction models.
//!
//! Three seams, each a stand-in for a real model:
//! - `ImprovementPredictor`: trained per-endpoint toxicity models
//! - `SimilarityModel`: fingerprint (Tanimoto-class) similarity
//! - `AccessibilityModel`: synthetic accessibility scoring (SAScore-class)
//!
//! The bundled defaults perturb catalog targets with bounded noise; swapping
//! them out must not touch the ranking and aggregation logic.

use std::collections::BTreeMap;

use hepatyx_common::entities::AssayType;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Predicted change for a single assay endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndpointImprovement {
    pub original_value: f64,
    pub predicted_value: f64,
    pub improvement_percent: f64,
    pub confidence: f64,
}

/// Predicts per-endpoint improvements for a candidate modification.
pub trait ImprovementPredictor: Send + Sync {
    fn predict(
        &self,
        original: &str,
        modified: &str,
        target_improvement: f64,
        rng: &mut dyn RngCore,
    ) -> BTreeMap<String, EndpointImprovement>;
}

/// Default predictor: perturbs the strategy's target improvement with bounded
/// noise and applies it multiplicatively to a baseline endpoint value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StochasticImprovementModel;

impl ImprovementPredictor for StochasticImprovementModel {
    fn predict(
        &self,
        _original: &str,
        _modified: &str,
        target_improvement: f64,
        rng: &mut dyn RngCore,
    ) -> BTreeMap<String, EndpointImprovement> {
        let mut improvements = BTreeMap::new();

        for endpoint in AssayType::improvement_endpoints() {
            let improvement_factor = target_improvement * (1.0 + rng.gen_range(-0.3..=0.5));
            let original_value = 50.0 + rng.gen_range(-20.0..=30.0);
            let predicted_value = original_value * (1.0 + improvement_factor);

            improvements.insert(
                endpoint.as_str().to_string(),
                EndpointImprovement {
                    original_value: round2(original_value),
                    predicted_value: round2(predicted_value),
                    improvement_percent: round1(improvement_factor * 100.0),
                    confidence: round2(0.8 + rng.gen_range(-0.1..=0.15)),
                },
            );
        }

        improvements
    }
}

/// Structural similarity between parent and candidate, in [0, 1].
pub trait SimilarityModel: Send + Sync {
    fn similarity(&self, original: &str, modified: &str, rng: &mut dyn RngCore) -> f64;
}

/// Default similarity: catalog edits are small, so candidates cluster around
/// a high baseline with bounded spread.
#[derive(Debug, Clone, Copy)]
pub struct BaselineSimilarityModel {
    pub baseline: f64,
}

impl Default for BaselineSimilarityModel {
    fn default() -> Self {
        Self { baseline: 0.85 }
    }
}

impl SimilarityModel for BaselineSimilarityModel {
    fn similarity(&self, _original: &str, _modified: &str, rng: &mut dyn RngCore) -> f64 {
        (self.baseline + rng.gen_range(-0.15..=0.10)).clamp(0.0, 1.0)
    }
}

/// Ease of synthesis for a candidate structure, in [0.1, 1].
pub trait AccessibilityModel: Send + Sync {
    fn accessibility(&self, structure: &str, rng: &mut dyn RngCore) -> f64;
}

/// Default accessibility: high baseline penalised by descriptor length as a
/// crude complexity proxy.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityAccessibilityModel {
    pub baseline: f64,
}

impl Default for ComplexityAccessibilityModel {
    fn default() -> Self {
        Self { baseline: 0.7 }
    }
}

impl AccessibilityModel for ComplexityAccessibilityModel {
    fn accessibility(&self, structure: &str, rng: &mut dyn RngCore) -> f64 {
        let complexity_penalty = structure.len() as f64 / 1000.0;
        (self.baseline - complexity_penalty + rng.gen_range(-0.1..=0.2)).clamp(0.1, 1.0)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_improvements_cover_all_endpoints() {
        let model = StochasticImprovementModel;
        let mut rng = StdRng::seed_from_u64(1);
        let improvements = model.predict("CCO", "CCO_OH", 0.3, &mut rng);
        assert_eq!(improvements.len(), 5);
        for endpoint in AssayType::improvement_endpoints() {
            assert!(improvements.contains_key(endpoint.as_str()));
        }
    }

    #[test]
    fn test_improvement_envelope() {
        let model = StochasticImprovementModel;
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let improvements = model.predict("CCO", "CCO_F", 0.25, &mut rng);
            for imp in improvements.values() {
                // factor in [0.25*0.7, 0.25*1.5] => percent in [17.5, 37.5]
                assert!(imp.improvement_percent >= 17.5 - 0.05);
                assert!(imp.improvement_percent <= 37.5 + 0.05);
                assert!(imp.predicted_value > imp.original_value);
                assert!((0.7..=0.95).contains(&imp.confidence));
            }
        }
    }

    #[test]
    fn test_similarity_clamped_to_unit_interval() {
        let model = BaselineSimilarityModel::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let s = model.similarity("CCO", "CCO_N", &mut rng);
            assert!((0.0..=1.0).contains(&s));
            assert!(s >= 0.85 - 0.15 - 1e-9);
            assert!(s <= 0.85 + 0.10 + 1e-9);
        }
    }

    #[test]
    fn test_longer_structures_are_harder_to_make() {
        let model = ComplexityAccessibilityModel::default();
        let short = "CCO";
        let long = "C".repeat(500);
        // Compare the noise-free cores by sampling both with the same seed.
        let mut rng_a = StdRng::seed_from_u64(4);
        let mut rng_b = StdRng::seed_from_u64(4);
        let a = model.accessibility(short, &mut rng_a);
        let b = model.accessibility(&long, &mut rng_b);
        assert!(a > b);
    }

    #[test]
    fn test_accessibility_floor() {
        let model = ComplexityAccessibilityModel::default();
        let very_long = "C".repeat(2000);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let v = model.accessibility(&very_long, &mut rng);
            assert!(v >= 0.1);
        }
    }
}

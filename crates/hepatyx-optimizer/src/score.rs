//! Overall candidate scoring.
//!
//! Combines mean predicted improvement, structural similarity, and synthetic
//! accessibility into the single ranking score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::predict::EndpointImprovement;

/// Relative weights of the three ranking terms. Sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_improvement_weight")]
    pub improvement: f64,
    #[serde(default = "default_similarity_weight")]
    pub similarity: f64,
    #[serde(default = "default_accessibility_weight")]
    pub accessibility: f64,
}

fn default_improvement_weight() -> f64 {
    0.5
}
fn default_similarity_weight() -> f64 {
    0.3
}
fn default_accessibility_weight() -> f64 {
    0.2
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            improvement: default_improvement_weight(),
            similarity: default_similarity_weight(),
            accessibility: default_accessibility_weight(),
        }
    }
}

impl ScoreWeights {
    /// Validate that all weights sum to ~1.0
    pub fn validate(&self) -> bool {
        let sum = self.improvement + self.similarity + self.accessibility;
        (sum - 1.0).abs() < 1e-6
    }
}

/// Weighted overall score for one candidate, rounded to 3 decimals.
pub fn overall_score(
    weights: &ScoreWeights,
    improvements: &BTreeMap<String, EndpointImprovement>,
    similarity: f64,
    accessibility: f64,
) -> f64 {
    let mean_improvement = if improvements.is_empty() {
        0.0
    } else {
        improvements
            .values()
            .map(|i| i.improvement_percent / 100.0)
            .sum::<f64>()
            / improvements.len() as f64
    };

    let score = mean_improvement * weights.improvement
        + similarity * weights.similarity
        + accessibility * weights.accessibility;

    (score * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn improvement(percent: f64) -> EndpointImprovement {
        EndpointImprovement {
            original_value: 50.0,
            predicted_value: 50.0 * (1.0 + percent / 100.0),
            improvement_percent: percent,
            confidence: 0.8,
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!(ScoreWeights::default().validate());
    }

    #[test]
    fn test_pinned_weighted_combination() {
        let mut improvements = BTreeMap::new();
        improvements.insert("cell_viability".to_string(), improvement(30.0));
        improvements.insert("cell_death".to_string(), improvement(20.0));
        // mean improvement 0.25: 0.25*0.5 + 0.9*0.3 + 0.6*0.2 = 0.515
        let score = overall_score(&ScoreWeights::default(), &improvements, 0.9, 0.6);
        assert!((score - 0.515).abs() < 1e-9);
    }

    #[test]
    fn test_empty_improvements_fall_back_to_zero_term() {
        let score = overall_score(&ScoreWeights::default(), &BTreeMap::new(), 1.0, 1.0);
        assert!((score - 0.5).abs() < 1e-9);
    }
}

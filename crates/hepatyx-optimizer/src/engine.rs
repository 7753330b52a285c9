//! Structure optimizer: candidate generation, filtering, and ranking.

use std::collections::BTreeMap;

use hepatyx_common::digest::structure_digest;
use hepatyx_common::{HepatyxError, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::predict::{
    AccessibilityModel, BaselineSimilarityModel, ComplexityAccessibilityModel,
    EndpointImprovement, ImprovementPredictor, SimilarityModel, StochasticImprovementModel,
};
use crate::score::{overall_score, ScoreWeights};
use crate::strategy::{StrategyCatalog, StructureEditor, TagStructureEditor};

// ── Configuration ────────────────────────────────────────────────────────────

/// Immutable optimizer configuration, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub strategies: StrategyCatalog,
    #[serde(default)]
    pub score_weights: ScoreWeights,
}

impl OptimizerConfig {
    /// Load from a YAML file.
    pub fn from_yaml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HepatyxError::Config(format!("cannot read {path}: {e}")))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| HepatyxError::Config(format!("cannot parse {path}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.strategies.validate()?;
        if !self.score_weights.validate() {
            return Err(HepatyxError::Config(
                "score weights must sum to 1.0".into(),
            ));
        }
        Ok(())
    }
}

// ── Inputs and outputs ───────────────────────────────────────────────────────

/// Desired direction for one endpoint, carried through to the models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalDirection {
    Minimize,
    Maximize,
}

/// A caller-supplied optimization objective. The bundled placeholder models
/// do not condition on goals; trained replacements are expected to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationGoal {
    pub endpoint: String,
    pub direction: GoalDirection,
    pub weight: f64,
}

/// One ranked candidate modification. Field names are the serialized
/// contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub id: String,
    pub modified_structure: String,
    pub modification_description: String,
    pub predicted_improvements: BTreeMap<String, EndpointImprovement>,
    pub similarity_score: f64,
    pub synthetic_accessibility: f64,
    pub overall_score: f64,
}

impl OptimizationSuggestion {
    /// Strategy name this suggestion was generated by, recovered from the
    /// `<strategy>_<digest>_<index>` id shape.
    pub fn strategy_name(&self) -> &str {
        self.id.rsplitn(3, '_').last().unwrap_or(&self.id)
    }

    /// Mean predicted improvement across endpoints, in percent.
    pub fn mean_improvement_percent(&self) -> f64 {
        if self.predicted_improvements.is_empty() {
            return 0.0;
        }
        self.predicted_improvements
            .values()
            .map(|i| i.improvement_percent)
            .sum::<f64>()
            / self.predicted_improvements.len() as f64
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Structure optimization engine. Holds immutable configuration and the
/// candidate models; safe to share across threads and call concurrently.
pub struct StructureOptimizer {
    config: OptimizerConfig,
    editor: Box<dyn StructureEditor>,
    improvement_model: Box<dyn ImprovementPredictor>,
    similarity_model: Box<dyn SimilarityModel>,
    accessibility_model: Box<dyn AccessibilityModel>,
}

impl StructureOptimizer {
    /// Optimizer with the bundled placeholder models.
    pub fn new(config: OptimizerConfig) -> Self {
        Self::with_models(
            config,
            Box::new(TagStructureEditor),
            Box::new(StochasticImprovementModel),
            Box::<BaselineSimilarityModel>::default(),
            Box::<ComplexityAccessibilityModel>::default(),
        )
    }

    /// Optimizer with caller-supplied model implementations.
    pub fn with_models(
        config: OptimizerConfig,
        editor: Box<dyn StructureEditor>,
        improvement_model: Box<dyn ImprovementPredictor>,
        similarity_model: Box<dyn SimilarityModel>,
        accessibility_model: Box<dyn AccessibilityModel>,
    ) -> Self {
        Self {
            config,
            editor,
            improvement_model,
            similarity_model,
            accessibility_model,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Generate ranked modification suggestions for a parent structure.
    ///
    /// The result holds at most `max_suggestions` entries, every entry
    /// satisfies `similarity_score >= similarity_threshold`, and entries are
    /// ordered by descending `overall_score`. Ties keep generation order
    /// (stable sort), so output is fully determined by the RNG seed.
    pub fn optimize(
        &self,
        structure: &str,
        goals: Option<&[OptimizationGoal]>,
        max_suggestions: usize,
        similarity_threshold: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<OptimizationSuggestion>> {
        if structure.trim().is_empty() {
            return Err(HepatyxError::InvalidArgument(
                "structure must not be empty".into(),
            ));
        }
        if max_suggestions == 0 {
            return Err(HepatyxError::InvalidArgument(
                "max_suggestions must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&similarity_threshold) {
            return Err(HepatyxError::InvalidArgument(format!(
                "similarity_threshold must be in [0, 1], got {similarity_threshold}"
            )));
        }

        if let Some(goals) = goals {
            debug!(
                goal_count = goals.len(),
                "optimization goals supplied; default models treat them as advisory"
            );
        }

        let parent_digest = structure_digest(structure);
        let mut suggestions = Vec::new();

        for spec in self.config.strategies.strategies() {
            let count = self.config.strategies.candidates_for(spec, max_suggestions);

            for index in 0..count {
                let modified = self.editor.modify(structure, spec.kind);
                let improvements = self.improvement_model.predict(
                    structure,
                    &modified,
                    spec.target_improvement,
                    rng,
                );
                let similarity = self.similarity_model.similarity(structure, &modified, rng);
                let accessibility = self.accessibility_model.accessibility(&modified, rng);

                let suggestion = OptimizationSuggestion {
                    id: format!("{}_{}_{}", spec.kind.as_str(), parent_digest % 1000, index),
                    modified_structure: modified,
                    modification_description: spec.description.clone(),
                    overall_score: overall_score(
                        &self.config.score_weights,
                        &improvements,
                        similarity,
                        accessibility,
                    ),
                    predicted_improvements: improvements,
                    similarity_score: similarity,
                    synthetic_accessibility: accessibility,
                };

                if suggestion.similarity_score >= similarity_threshold {
                    suggestions.push(suggestion);
                }
            }
        }

        debug!(
            generated = suggestions.len(),
            max_suggestions, "candidates survived the similarity filter"
        );

        suggestions.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        suggestions.truncate(max_suggestions);

        Ok(suggestions)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

//! Risk engine: assembles the full DILI risk profile.

use hepatyx_common::digest::structure_digest;
use hepatyx_common::entities::{Compound, EndpointSet, MolecularDescriptors, RiskCategory};
use hepatyx_common::{HepatyxError, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cmax::{CmaxEstimator, EmpiricalCmaxModel, DEFAULT_VARIABILITY};
use crate::confidence::{prediction_confidence, DEFAULT_JITTER};
use crate::mechanisms::{MechanismScores, MechanismWeights};
use crate::predict::{HeuristicPropertyModel, StructurePropertyModel};
use crate::recommend::generate_recommendations;
use crate::score::{LinearRiskModel, ModelCoefficients, RiskScoreModel};
use crate::thresholds::RiskThresholds;

// ── Configuration ────────────────────────────────────────────────────────────

/// Immutable engine configuration, loaded once at startup and passed into the
/// engine constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Inter-individual Cmax variability half-width; 0.0 for determinism.
    #[serde(default = "default_cmax_variability")]
    pub cmax_variability: f64,
    /// Confidence jitter half-width; 0.0 for determinism.
    #[serde(default = "default_confidence_jitter")]
    pub confidence_jitter: f64,
    #[serde(default)]
    pub thresholds: RiskThresholds,
    #[serde(default)]
    pub coefficients: ModelCoefficients,
    #[serde(default)]
    pub mechanism_weights: MechanismWeights,
}

fn default_cmax_variability() -> f64 {
    DEFAULT_VARIABILITY
}
fn default_confidence_jitter() -> f64 {
    DEFAULT_JITTER
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            coefficients: ModelCoefficients::default(),
            mechanism_weights: MechanismWeights::default(),
            cmax_variability: default_cmax_variability(),
            confidence_jitter: default_confidence_jitter(),
        }
    }
}

impl RiskConfig {
    /// Load from a YAML file.
    pub fn from_yaml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HepatyxError::Config(format!("cannot read {path}: {e}")))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| HepatyxError::Config(format!("cannot parse {path}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn from_json(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HepatyxError::Config(format!("cannot read {path}: {e}")))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.thresholds.validate() {
            return Err(HepatyxError::Config(
                "risk thresholds must be strictly ordered".into(),
            ));
        }
        if !self.mechanism_weights.validate() {
            return Err(HepatyxError::Config(
                "mechanism weights must sum to 1.0".into(),
            ));
        }
        Ok(())
    }
}

// ── Inputs and outputs ───────────────────────────────────────────────────────

/// Plain-value input for one assessment. Lookups happen before this point;
/// the engine never fetches anything.
#[derive(Debug, Clone, Default)]
pub struct RiskInput {
    pub compound_id: String,
    pub compound_name: String,
    pub endpoints: EndpointSet,
    pub descriptors: MolecularDescriptors,
    /// Stored composite score; when absent the score model derives one.
    pub risk_score: Option<f64>,
}

impl RiskInput {
    pub fn from_compound(compound: &Compound) -> Self {
        Self {
            compound_id: compound.id.clone(),
            compound_name: compound.name.clone(),
            endpoints: compound.endpoints(),
            descriptors: compound.descriptors(),
            risk_score: Some(compound.risk_score),
        }
    }
}

/// Complete DILI risk profile. Field names are the serialized contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub compound_id: String,
    pub compound_name: String,
    pub risk_score: f64,
    pub risk_category: RiskCategory,
    pub safety_window: (f64, f64),
    pub therapeutic_index: f64,
    pub mechanism_scores: MechanismScores,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// DILI risk assessment engine. Holds immutable configuration and the
/// pharmacology models; safe to share across threads and call concurrently.
pub struct RiskEngine {
    config: RiskConfig,
    cmax_model: Box<dyn CmaxEstimator>,
    score_model: Box<dyn RiskScoreModel>,
    property_model: Box<dyn StructurePropertyModel>,
}

impl RiskEngine {
    /// Engine with the bundled empirical models.
    pub fn new(config: RiskConfig) -> Self {
        let cmax_model = Box::new(EmpiricalCmaxModel::new(config.cmax_variability));
        let score_model = Box::new(LinearRiskModel::new(config.coefficients.clone()));
        Self::with_models(config, cmax_model, score_model, Box::new(HeuristicPropertyModel))
    }

    /// Engine with caller-supplied model implementations.
    pub fn with_models(
        config: RiskConfig,
        cmax_model: Box<dyn CmaxEstimator>,
        score_model: Box<dyn RiskScoreModel>,
        property_model: Box<dyn StructurePropertyModel>,
    ) -> Self {
        Self {
            config,
            cmax_model,
            score_model,
            property_model,
        }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Assess DILI risk from endpoint data and descriptors.
    ///
    /// Missing optional fields substitute documented defaults; negative
    /// concentrations and out-of-scale stored scores fail with
    /// `InvalidArgument`. Valid numeric input never fails.
    pub fn assess(&self, input: &RiskInput, rng: &mut dyn RngCore) -> Result<RiskProfile> {
        let endpoints = input.endpoints.resolve()?;
        let (molecular_weight, logp) = input.descriptors.resolve()?;

        let risk_score = match input.risk_score {
            Some(s) if !(0.0..=10.0).contains(&s) => {
                return Err(HepatyxError::InvalidArgument(format!(
                    "risk_score must be on the 0-10 scale, got {s}"
                )))
            }
            Some(s) => s,
            None => self
                .score_model
                .score(&endpoints, molecular_weight, logp, rng),
        };

        let cmax = self.cmax_model.estimate(molecular_weight, logp, rng);
        let lower = endpoints.tc50.min(endpoints.ec50) / cmax;
        let upper = endpoints.tc50.max(endpoints.ec50) / cmax;
        let risk_category = self.config.thresholds.categorise(lower);

        let mechanism_scores = MechanismScores::compute(&endpoints);

        // Same numerator as the safety-window lower bound by construction;
        // both fields are part of the serialized contract.
        let therapeutic_index = endpoints.tc50.min(endpoints.ec50) / cmax;

        let recommendations =
            generate_recommendations(risk_score, risk_category, &mechanism_scores, logp);

        let confidence = prediction_confidence(
            endpoints.tc50,
            endpoints.ec50,
            risk_score,
            self.config.confidence_jitter,
            rng,
        );

        debug!(
            compound = %input.compound_id,
            cmax,
            risk_score,
            category = risk_category.as_str(),
            "risk profile computed"
        );

        Ok(RiskProfile {
            compound_id: input.compound_id.clone(),
            compound_name: input.compound_name.clone(),
            risk_score: round2(risk_score),
            risk_category,
            safety_window: (round2(lower), round2(upper)),
            therapeutic_index: round2(therapeutic_index),
            mechanism_scores,
            recommendations,
            confidence: round2(confidence),
        })
    }

    /// Assess a stored compound record.
    pub fn assess_compound(&self, compound: &Compound, rng: &mut dyn RngCore) -> Result<RiskProfile> {
        self.assess(&RiskInput::from_compound(compound), rng)
    }

    /// Predict DILI risk from a structure string: derive descriptors and
    /// endpoint estimates via the property model, then score and assess.
    /// The compound id is a stable digest of the structure.
    pub fn predict_from_structure(
        &self,
        structure: &str,
        compound_name: Option<&str>,
        rng: &mut dyn RngCore,
    ) -> Result<RiskProfile> {
        if structure.trim().is_empty() {
            return Err(HepatyxError::InvalidArgument(
                "structure must not be empty".into(),
            ));
        }

        let props = self.property_model.properties(structure, rng);
        let input = RiskInput {
            compound_id: format!("pred_{}", structure_digest(structure) % 10_000),
            compound_name: compound_name.unwrap_or("Unknown").to_string(),
            endpoints: EndpointSet::new(
                props.endpoints.tc20,
                props.endpoints.tc50,
                props.endpoints.ec20,
                props.endpoints.ec50,
            ),
            descriptors: MolecularDescriptors::new(props.molecular_weight, props.logp),
            risk_score: None,
        };
        self.assess(&input, rng)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ── Tests ────────────────────────────────────────────────────────────────────

//! Composite risk score model.
//!
//! A linear placeholder for a trained predictive model. The interface is
//! the contract: endpoint concentrations plus descriptors in, a score on
//! the 0–10 scale out. Swapping in a real model must not disturb callers.

use hepatyx_common::entities::ResolvedEndpoints;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Coefficients of the linear composite-risk model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCoefficients {
    #[serde(default = "default_intercept")]
    pub intercept: f64,
    #[serde(default = "default_tc50_coeff")]
    pub tc50: f64,
    #[serde(default = "default_ec50_coeff")]
    pub ec50: f64,
    #[serde(default = "default_logp_coeff")]
    pub logp: f64,
    #[serde(default = "default_mw_coeff")]
    pub molecular_weight: f64,
    /// Half-width of the additive noise term; 0.0 disables it.
    #[serde(default = "default_noise_bound")]
    pub noise_bound: f64,
}

fn default_intercept() -> f64 {
    2.5
}
fn default_tc50_coeff() -> f64 {
    -0.02
}
fn default_ec50_coeff() -> f64 {
    -0.015
}
fn default_logp_coeff() -> f64 {
    0.3
}
fn default_mw_coeff() -> f64 {
    0.001
}
fn default_noise_bound() -> f64 {
    0.5
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        Self {
            intercept: default_intercept(),
            tc50: default_tc50_coeff(),
            ec50: default_ec50_coeff(),
            logp: default_logp_coeff(),
            molecular_weight: default_mw_coeff(),
            noise_bound: default_noise_bound(),
        }
    }
}

/// Produces a composite DILI risk score on the 0–10 scale.
pub trait RiskScoreModel: Send + Sync {
    fn score(
        &self,
        endpoints: &ResolvedEndpoints,
        molecular_weight: f64,
        logp: f64,
        rng: &mut dyn RngCore,
    ) -> f64;
}

/// Linear model over tc50, ec50, logp, and molecular weight.
#[derive(Debug, Clone, Default)]
pub struct LinearRiskModel {
    coefficients: ModelCoefficients,
}

impl LinearRiskModel {
    pub fn new(coefficients: ModelCoefficients) -> Self {
        Self { coefficients }
    }
}

impl RiskScoreModel for LinearRiskModel {
    fn score(
        &self,
        endpoints: &ResolvedEndpoints,
        molecular_weight: f64,
        logp: f64,
        rng: &mut dyn RngCore,
    ) -> f64 {
        let c = &self.coefficients;
        let mut score = c.intercept
            + c.tc50 * endpoints.tc50
            + c.ec50 * endpoints.ec50
            + c.logp * logp
            + c.molecular_weight * molecular_weight;

        if c.noise_bound > 0.0 {
            score += rng.gen_range(-c.noise_bound..=c.noise_bound);
        }

        score.clamp(0.0, 10.0)
    }
}

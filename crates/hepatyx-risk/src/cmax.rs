//! Peak plasma concentration (Cmax) estimation.
//!
//! The default model is an empirical mw/logp heuristic standing in for a
//! real PBPK model; the `CmaxEstimator` trait is the seam a replacement
//! must implement.

use rand::{Rng, RngCore};

/// Baseline Cmax for a reference drug-like molecule (µM).
pub const BASE_CMAX_UM: f64 = 10.0;
/// Reference molecular weight for the size correction (Da).
pub const MW_REFERENCE: f64 = 400.0;
/// Molecular weights below this floor no longer increase exposure (Da).
pub const MW_FLOOR: f64 = 200.0;
/// LogP at which the lipophilicity correction is neutral.
pub const LOGP_REFERENCE: f64 = 3.0;
/// Exposure change per LogP unit away from the reference.
pub const LOGP_SLOPE: f64 = 0.1;
/// Estimates never drop below this concentration (µM).
pub const CMAX_FLOOR_UM: f64 = 0.1;
/// Default inter-individual variability half-width.
pub const DEFAULT_VARIABILITY: f64 = 0.3;

/// Estimates peak plasma concentration from molecular descriptors.
pub trait CmaxEstimator: Send + Sync {
    /// Estimated Cmax in µM for the given descriptors.
    fn estimate(&self, molecular_weight: f64, logp: f64, rng: &mut dyn RngCore) -> f64;
}

/// Empirical Cmax model: larger molecules generally reach lower plasma
/// concentrations, higher lipophilicity shifts absorption and distribution.
/// A bounded multiplicative factor models inter-individual variability.
#[derive(Debug, Clone)]
pub struct EmpiricalCmaxModel {
    variability: f64,
}

impl EmpiricalCmaxModel {
    /// `variability` is the half-width of the multiplicative perturbation;
    /// 0.0 disables it entirely (no RNG draw is made).
    pub fn new(variability: f64) -> Self {
        Self { variability }
    }

    /// Model with variability disabled, for reproducible pipelines.
    pub fn deterministic() -> Self {
        Self::new(0.0)
    }
}

impl Default for EmpiricalCmaxModel {
    fn default() -> Self {
        Self::new(DEFAULT_VARIABILITY)
    }
}

impl CmaxEstimator for EmpiricalCmaxModel {
    fn estimate(&self, molecular_weight: f64, logp: f64, rng: &mut dyn RngCore) -> f64 {
        let mw_factor = MW_REFERENCE / molecular_weight.max(MW_FLOOR);
        let logp_factor = 1.0 + (logp - LOGP_REFERENCE) * LOGP_SLOPE;

        let mut cmax = BASE_CMAX_UM * mw_factor * logp_factor;
        if self.variability > 0.0 {
            cmax *= 1.0 + rng.gen_range(-self.variability..=self.variability);
        }

        cmax.max(CMAX_FLOOR_UM)
    }
}

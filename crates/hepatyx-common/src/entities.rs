/// Core entity types for the Hepatyx platform.
/// Rust representations of the compound library records and assay inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HepatyxError, Result};

// ---------------------------------------------------------------------------
// Risk category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// Coarse category from a composite risk score on the 0–10 scale.
    /// Used for library filtering, not for safety-window categorisation.
    pub fn from_score(score: f64) -> Self {
        if score < 3.3 {
            RiskCategory::Low
        } else if score < 6.6 {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

// ---------------------------------------------------------------------------
// Assay endpoints
// ---------------------------------------------------------------------------

/// In-vitro assay readouts supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssayType {
    CellViability,
    CytoplasmArea,
    CellDeath,
    Necrosis,
    Apoptosis,
    MitochondrialToxicity,
}

impl AssayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssayType::CellViability => "cell_viability",
            AssayType::CytoplasmArea => "cytoplasm_area",
            AssayType::CellDeath => "cell_death",
            AssayType::Necrosis => "necrosis",
            AssayType::Apoptosis => "apoptosis",
            AssayType::MitochondrialToxicity => "mitochondrial_toxicity",
        }
    }

    /// Relative weight of this endpoint in composite risk aggregation.
    /// Weights sum to 1.0 across the catalog.
    pub fn default_weight(&self) -> f64 {
        match self {
            AssayType::CellViability => 0.25,
            AssayType::CytoplasmArea => 0.15,
            AssayType::CellDeath => 0.20,
            AssayType::Necrosis => 0.15,
            AssayType::Apoptosis => 0.15,
            AssayType::MitochondrialToxicity => 0.10,
        }
    }

    /// The full endpoint catalog, in canonical order.
    pub fn all() -> [AssayType; 6] {
        [
            AssayType::CellViability,
            AssayType::CytoplasmArea,
            AssayType::CellDeath,
            AssayType::Necrosis,
            AssayType::Apoptosis,
            AssayType::MitochondrialToxicity,
        ]
    }

    /// Endpoints for which structural-modification improvements are predicted.
    pub fn improvement_endpoints() -> [AssayType; 5] {
        [
            AssayType::CellViability,
            AssayType::CytoplasmArea,
            AssayType::CellDeath,
            AssayType::Necrosis,
            AssayType::Apoptosis,
        ]
    }
}

// ---------------------------------------------------------------------------
// Endpoint concentrations
// ---------------------------------------------------------------------------

/// Fallback concentrations (µM) substituted for missing endpoint values.
/// Documented approximation for sparse assay panels, not silent failure.
pub const DEFAULT_TC20_UM: f64 = 30.0;
pub const DEFAULT_TC50_UM: f64 = 70.0;
pub const DEFAULT_EC20_UM: f64 = 40.0;
pub const DEFAULT_EC50_UM: f64 = 60.0;

/// Raw endpoint concentrations as supplied by a caller. Any subset may be
/// missing; `resolve` applies the documented defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EndpointSet {
    pub tc20: Option<f64>,
    pub tc50: Option<f64>,
    pub ec20: Option<f64>,
    pub ec50: Option<f64>,
}

impl EndpointSet {
    pub fn new(tc20: f64, tc50: f64, ec20: f64, ec50: f64) -> Self {
        Self {
            tc20: Some(tc20),
            tc50: Some(tc50),
            ec20: Some(ec20),
            ec50: Some(ec50),
        }
    }

    /// Substitute defaults for missing values and reject negative
    /// concentrations. Zero is tolerated (the scoring formulas floor their
    /// denominators).
    pub fn resolve(&self) -> Result<ResolvedEndpoints> {
        let check = |name: &str, value: Option<f64>, default: f64| -> Result<f64> {
            match value {
                Some(v) if v < 0.0 => Err(HepatyxError::InvalidArgument(format!(
                    "{name} must be non-negative, got {v}"
                ))),
                Some(v) if !v.is_finite() => Err(HepatyxError::InvalidArgument(format!(
                    "{name} must be finite"
                ))),
                Some(v) => Ok(v),
                None => Ok(default),
            }
        };

        Ok(ResolvedEndpoints {
            tc20: check("tc20", self.tc20, DEFAULT_TC20_UM)?,
            tc50: check("tc50", self.tc50, DEFAULT_TC50_UM)?,
            ec20: check("ec20", self.ec20, DEFAULT_EC20_UM)?,
            ec50: check("ec50", self.ec50, DEFAULT_EC50_UM)?,
        })
    }
}

/// Endpoint concentrations after default substitution; always valid input
/// for the scoring formulas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolvedEndpoints {
    pub tc20: f64,
    pub tc50: f64,
    pub ec20: f64,
    pub ec50: f64,
}

// ---------------------------------------------------------------------------
// Molecular descriptors
// ---------------------------------------------------------------------------

/// Fallback molecular weight (Da) when no descriptor data is available.
pub const DEFAULT_MOLECULAR_WEIGHT: f64 = 400.0;
/// Fallback LogP when no descriptor data is available.
pub const DEFAULT_LOGP: f64 = 3.0;

/// Optional molecular property descriptors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MolecularDescriptors {
    pub molecular_weight: Option<f64>,
    pub logp: Option<f64>,
}

impl MolecularDescriptors {
    pub fn new(molecular_weight: f64, logp: f64) -> Self {
        Self {
            molecular_weight: Some(molecular_weight),
            logp: Some(logp),
        }
    }

    /// Substitute documented defaults for missing descriptors.
    /// Molecular weight must be positive when present; LogP may be negative.
    pub fn resolve(&self) -> Result<(f64, f64)> {
        let mw = match self.molecular_weight {
            Some(v) if v <= 0.0 || !v.is_finite() => {
                return Err(HepatyxError::InvalidArgument(format!(
                    "molecular_weight must be positive, got {v}"
                )))
            }
            Some(v) => v,
            None => DEFAULT_MOLECULAR_WEIGHT,
        };
        let logp = match self.logp {
            Some(v) if !v.is_finite() => {
                return Err(HepatyxError::InvalidArgument("logp must be finite".into()))
            }
            Some(v) => v,
            None => DEFAULT_LOGP,
        };
        Ok((mw, logp))
    }
}

// ---------------------------------------------------------------------------
// Compound
// ---------------------------------------------------------------------------

/// A compound record as stored in the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compound {
    pub id: String,
    pub name: String,
    pub tc20: f64,
    pub tc50: f64,
    pub ec20: f64,
    pub ec50: f64,
    pub risk_score: f64,
    pub smiles: Option<String>,
    pub molecular_weight: Option<f64>,
    pub logp: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Compound {
    pub fn endpoints(&self) -> EndpointSet {
        EndpointSet::new(self.tc20, self.tc50, self.ec20, self.ec50)
    }

    pub fn descriptors(&self) -> MolecularDescriptors {
        MolecularDescriptors {
            molecular_weight: self.molecular_weight,
            logp: self.logp,
        }
    }

    pub fn risk_category(&self) -> RiskCategory {
        RiskCategory::from_score(self.risk_score)
    }
}

// ---------------------------------------------------------------------------
// Dose-response
// ---------------------------------------------------------------------------

/// A single point on a dose-response curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosePoint {
    pub x: f64,
    pub y: f64,
    pub confidence_interval: Option<(f64, f64)>,
    pub replicate_count: Option<u32>,
    pub standard_error: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_score_boundaries() {
        assert_eq!(RiskCategory::from_score(0.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(3.29), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(3.3), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(6.59), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(6.6), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(10.0), RiskCategory::High);
    }

    #[test]
    fn test_endpoint_weights_sum_to_one() {
        let sum: f64 = AssayType::all().iter().map(|a| a.default_weight()).sum();
        assert!((sum - 1.0).abs() < 1e-9, "Endpoint weights must sum to 1.0");
    }

    #[test]
    fn test_endpoint_defaults_substituted() {
        let resolved = EndpointSet::default().resolve().unwrap();
        assert_eq!(resolved.tc20, DEFAULT_TC20_UM);
        assert_eq!(resolved.tc50, DEFAULT_TC50_UM);
        assert_eq!(resolved.ec20, DEFAULT_EC20_UM);
        assert_eq!(resolved.ec50, DEFAULT_EC50_UM);
    }

    #[test]
    fn test_negative_endpoint_rejected() {
        let endpoints = EndpointSet {
            tc50: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            endpoints.resolve(),
            Err(HepatyxError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_descriptor_defaults() {
        let (mw, logp) = MolecularDescriptors::default().resolve().unwrap();
        assert_eq!(mw, DEFAULT_MOLECULAR_WEIGHT);
        assert_eq!(logp, DEFAULT_LOGP);
    }

    #[test]
    fn test_negative_logp_is_valid() {
        // Metformin has LogP -2.64; negative lipophilicity is legitimate.
        let d = MolecularDescriptors::new(129.16, -2.64);
        let (mw, logp) = d.resolve().unwrap();
        assert_eq!(mw, 129.16);
        assert_eq!(logp, -2.64);
    }

    #[test]
    fn test_nonpositive_weight_rejected() {
        let d = MolecularDescriptors {
            molecular_weight: Some(0.0),
            logp: None,
        };
        assert!(matches!(
            d.resolve(),
            Err(HepatyxError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_assay_type_serde_names() {
        let json = serde_json::to_string(&AssayType::MitochondrialToxicity).unwrap();
        assert_eq!(json, "\"mitochondrial_toxicity\"");
        assert_eq!(AssayType::CellViability.as_str(), "cell_viability");
    }
}

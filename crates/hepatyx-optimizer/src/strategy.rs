//! Optimization strategy catalog.
//!
//! Fixed configuration, not user data: each strategy carries a relative
//! weight (the catalog sums to 1.0) and a target improvement magnitude.
//! The weight drives how many candidates the engine generates per strategy.

use hepatyx_common::{HepatyxError, Result};
use serde::{Deserialize, Serialize};

/// Named modification approaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    ReduceLipophilicity,
    BioisostericReplacement,
    MetabolicBlocking,
    RingModification,
    FunctionalGroupSwap,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::ReduceLipophilicity => "reduce_lipophilicity",
            StrategyKind::BioisostericReplacement => "bioisosteric_replacement",
            StrategyKind::MetabolicBlocking => "metabolic_blocking",
            StrategyKind::RingModification => "ring_modification",
            StrategyKind::FunctionalGroupSwap => "functional_group_swap",
        }
    }

    /// Placeholder structural tag appended by the default editor.
    fn modification_tag(&self) -> &'static str {
        match self {
            StrategyKind::ReduceLipophilicity => "OH",
            StrategyKind::BioisostericReplacement => "N",
            StrategyKind::MetabolicBlocking => "F",
            StrategyKind::RingModification => "pyr",
            StrategyKind::FunctionalGroupSwap => "mod",
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySpec {
    pub kind: StrategyKind,
    /// Share of generated candidates allocated to this strategy.
    pub weight: f64,
    /// Human-readable label carried into each suggestion.
    pub description: String,
    /// Expected fractional endpoint improvement for this kind of edit.
    pub target_improvement: f64,
}

/// The full strategy catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyCatalog {
    strategies: Vec<StrategySpec>,
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        let spec = |kind, weight, description: &str, target_improvement| StrategySpec {
            kind,
            weight,
            description: description.to_string(),
            target_improvement,
        };
        Self {
            strategies: vec![
                spec(
                    StrategyKind::ReduceLipophilicity,
                    0.25,
                    "Add polar groups to reduce LogP",
                    0.30,
                ),
                spec(
                    StrategyKind::BioisostericReplacement,
                    0.30,
                    "Replace toxic substructures with safer alternatives",
                    0.40,
                ),
                spec(
                    StrategyKind::MetabolicBlocking,
                    0.20,
                    "Block metabolic soft spots",
                    0.25,
                ),
                spec(
                    StrategyKind::RingModification,
                    0.15,
                    "Modify aromatic rings to reduce reactivity",
                    0.20,
                ),
                spec(
                    StrategyKind::FunctionalGroupSwap,
                    0.10,
                    "Replace problematic functional groups",
                    0.15,
                ),
            ],
        }
    }
}

impl StrategyCatalog {
    pub fn strategies(&self) -> &[StrategySpec] {
        &self.strategies
    }

    pub fn validate(&self) -> Result<()> {
        if self.strategies.is_empty() {
            return Err(HepatyxError::Config("strategy catalog is empty".into()));
        }
        let sum: f64 = self.strategies.iter().map(|s| s.weight).sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(HepatyxError::Config(format!(
                "strategy weights must sum to 1.0, got {sum}"
            )));
        }
        for s in &self.strategies {
            if s.weight <= 0.0 || s.target_improvement <= 0.0 {
                return Err(HepatyxError::Config(format!(
                    "strategy {} has non-positive weight or target",
                    s.kind.as_str()
                )));
            }
        }
        Ok(())
    }

    /// Candidates to generate for a strategy: proportional to its weight,
    /// at least one.
    pub fn candidates_for(&self, spec: &StrategySpec, max_suggestions: usize) -> usize {
        ((max_suggestions as f64 * spec.weight).floor() as usize).max(1)
    }
}

// ── Structure edit seam ──────────────────────────────────────────────────────

/// Applies a strategy's structural edit to a parent structure.
///
/// Implementations can use:
/// - A cheminformatics toolkit performing real substructure edits
/// - The tag-based placeholder (default)
pub trait StructureEditor: Send + Sync {
    fn modify(&self, structure: &str, strategy: StrategyKind) -> String;
}

/// Placeholder editor: appends a deterministic strategy tag. Keeps candidate
/// identity stable without performing chemistry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagStructureEditor;

impl StructureEditor for TagStructureEditor {
    fn modify(&self, structure: &str, strategy: StrategyKind) -> String {
        format!("{structure}_{}", strategy.modification_tag())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

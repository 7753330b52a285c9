//! Configuration loading for Hepatyx.
//! Reads hepatyx.toml from the current directory or the path in the
//! HEPATYX_CONFIG env var. Every field carries a default so a missing file
//! falls back to the documented configuration.

use hepatyx_common::{HepatyxError, Result};
use hepatyx_optimizer::OptimizerConfig;
use hepatyx_risk::RiskConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// Orchestration settings: when to attach optimization suggestions and how
/// the per-compound RNG streams are seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Risk score above which suggestions are attached to an assessment.
    #[serde(default = "default_optimize_threshold")]
    pub optimize_threshold: f64,
    /// Suggestions requested per optimized compound.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Minimum similarity a suggestion must keep to its parent.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Base seed mixed with each compound's digest for per-call RNG streams.
    #[serde(default = "default_base_seed")]
    pub base_seed: u64,
}

fn default_optimize_threshold() -> f64 {
    3.0
}
fn default_max_suggestions() -> usize {
    5
}
fn default_similarity_threshold() -> f64 {
    0.7
}
fn default_base_seed() -> u64 {
    42
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            optimize_threshold: default_optimize_threshold(),
            max_suggestions: default_max_suggestions(),
            similarity_threshold: default_similarity_threshold(),
            base_seed: default_base_seed(),
        }
    }
}

impl Config {
    /// Load configuration from hepatyx.toml.
    /// Checks HEPATYX_CONFIG env var first, then the current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("HEPATYX_CONFIG").unwrap_or_else(|_| "hepatyx.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy hepatyx.example.toml to hepatyx.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.risk.validate()?;
        self.optimizer.validate()?;

        let p = &self.pipeline;
        if p.max_suggestions == 0 {
            return Err(HepatyxError::Config(
                "pipeline.max_suggestions must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.similarity_threshold) {
            return Err(HepatyxError::Config(
                "pipeline.similarity_threshold must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=10.0).contains(&p.optimize_threshold) {
            return Err(HepatyxError::Config(
                "pipeline.optimize_threshold must be on the 0-10 scale".into(),
            ));
        }
        Ok(())
    }
}

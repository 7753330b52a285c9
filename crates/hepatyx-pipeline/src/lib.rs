//! Orchestrator for the Hepatyx assessment pipeline.
//!
//! Resolves compounds from a `CompoundSource`, runs the risk engine, and
//! attaches structure optimization suggestions when the risk score warrants
//! them. Batch assessment fans out across tokio tasks; the engines are pure
//! and stateless, so no coordination beyond collecting results is needed.
//!
//! Every assessment draws its randomness from a fresh RNG seeded from the
//! configured base seed mixed with the compound's digest, so results are
//! reproducible run-to-run and independent of batch scheduling order.

pub mod config;

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use hepatyx_common::digest::structure_digest;
use hepatyx_common::Result;
use hepatyx_library::catalog::structure_for;
use hepatyx_library::CompoundSource;
use hepatyx_optimizer::{OptimizationSuggestion, StructureOptimizer};
use hepatyx_risk::{RiskEngine, RiskProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

pub use config::{Config, PipelineSettings};

/// One compound's full assessment: the risk profile plus any optimization
/// suggestions the risk threshold triggered.
#[derive(Debug, Clone, Serialize)]
pub struct CompoundAssessment {
    pub profile: RiskProfile,
    pub suggestions: Vec<OptimizationSuggestion>,
}

/// A per-compound failure recorded during batch assessment.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub compound_id: String,
    pub error: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub job_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub completed: Vec<CompoundAssessment>,
    pub failed: Vec<BatchFailure>,
    pub duration_ms: u128,
}

/// Chains compound lookup, risk assessment, and conditional optimization.
pub struct AssessmentPipeline {
    source: Arc<dyn CompoundSource>,
    risk_engine: RiskEngine,
    optimizer: StructureOptimizer,
    settings: PipelineSettings,
}

impl AssessmentPipeline {
    pub fn new(
        source: Arc<dyn CompoundSource>,
        risk_engine: RiskEngine,
        optimizer: StructureOptimizer,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            source,
            risk_engine,
            optimizer,
            settings,
        }
    }

    /// Pipeline with the bundled engines built from configuration.
    pub fn from_config(config: &Config, source: Arc<dyn CompoundSource>) -> Self {
        Self::new(
            source,
            RiskEngine::new(config.risk.clone()),
            StructureOptimizer::new(config.optimizer.clone()),
            config.pipeline.clone(),
        )
    }

    /// Assess a stored compound. Fails with `CompoundNotFound` for unknown
    /// ids; suggestions are attached when the risk score exceeds the
    /// configured threshold.
    pub fn assess(&self, compound_id: &str) -> Result<CompoundAssessment> {
        let compound = hepatyx_library::require(self.source.as_ref(), compound_id)?;
        let mut rng = self.rng_for(compound_id);

        let profile = self.risk_engine.assess_compound(&compound, &mut rng)?;

        let suggestions = if profile.risk_score > self.settings.optimize_threshold {
            let structure = structure_for(&compound);
            self.optimizer.optimize(
                &structure,
                None,
                self.settings.max_suggestions,
                self.settings.similarity_threshold,
                &mut rng,
            )?
        } else {
            Vec::new()
        };

        Ok(CompoundAssessment {
            profile,
            suggestions,
        })
    }

    /// Predict risk for a free-form structure, optionally attaching
    /// suggestions when the predicted risk clears the threshold.
    pub fn predict(
        &self,
        structure: &str,
        compound_name: Option<&str>,
        include_optimization: bool,
    ) -> Result<CompoundAssessment> {
        let mut rng = self.rng_for(structure);

        let profile = self
            .risk_engine
            .predict_from_structure(structure, compound_name, &mut rng)?;

        let suggestions =
            if include_optimization && profile.risk_score > self.settings.optimize_threshold {
                self.optimizer.optimize(
                    structure,
                    None,
                    self.settings.max_suggestions,
                    self.settings.similarity_threshold,
                    &mut rng,
                )?
            } else {
                Vec::new()
            };

        Ok(CompoundAssessment {
            profile,
            suggestions,
        })
    }

    /// Per-call RNG: base seed mixed with the stable digest of the key, so
    /// each compound gets its own reproducible stream.
    fn rng_for(&self, key: &str) -> StdRng {
        StdRng::seed_from_u64(self.settings.base_seed ^ structure_digest(key))
    }
}

/// Assess many compounds concurrently, one tokio task per compound.
/// Individual failures are recorded and never abort the batch; output
/// ordering is by compound id so the summary is independent of task
/// scheduling.
pub async fn assess_batch(
    pipeline: Arc<AssessmentPipeline>,
    compound_ids: &[String],
) -> BatchSummary {
    let started = Instant::now();
    let started_at = Utc::now();
    let job_id = Uuid::new_v4();
    info!(%job_id, total = compound_ids.len(), "starting batch assessment");

    let mut tasks = tokio::task::JoinSet::new();
    for id in compound_ids {
        let pipeline = Arc::clone(&pipeline);
        let id = id.clone();
        tasks.spawn(async move {
            let outcome = pipeline.assess(&id);
            (id, outcome)
        });
    }

    let mut completed = Vec::new();
    let mut failed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(assessment))) => completed.push(assessment),
            Ok((id, Err(e))) => {
                warn!(compound = %id, error = %e, "assessment failed");
                failed.push(BatchFailure {
                    compound_id: id,
                    error: e.to_string(),
                });
            }
            Err(e) => failed.push(BatchFailure {
                compound_id: String::new(),
                error: format!("task join error: {e}"),
            }),
        }
    }

    completed.sort_by(|a, b| a.profile.compound_id.cmp(&b.profile.compound_id));
    failed.sort_by(|a, b| a.compound_id.cmp(&b.compound_id));

    let summary = BatchSummary {
        job_id,
        started_at,
        total: compound_ids.len(),
        completed,
        failed,
        duration_ms: started.elapsed().as_millis(),
    };
    info!(
        %job_id,
        completed = summary.completed.len(),
        failed = summary.failed.len(),
        duration_ms = summary.duration_ms as u64,
        "batch assessment finished"
    );
    summary
}

//! Hepatyx — DILI risk assessment and structure optimization platform.
//! Entry point for the demo binary.

use std::sync::Arc;

use hepatyx_library::{CompoundSource, InMemoryCompoundLibrary};
use hepatyx_optimizer::report::build_report;
use hepatyx_pipeline::{assess_batch, AssessmentPipeline, Config};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hepatyx=debug,info")),
        )
        .init();

    info!("🧪 Hepatyx starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match Config::load() {
        Ok(c) => {
            info!("Configuration loaded.");
            c
        }
        Err(e) => {
            tracing::warn!("Could not load hepatyx.toml: {e}");
            tracing::warn!("Continuing with built-in defaults.");
            Config::default()
        }
    };
    config.validate()?;

    let library = Arc::new(InMemoryCompoundLibrary::demo());
    let compound_ids: Vec<String> = library.all().iter().map(|c| c.id.clone()).collect();
    let pipeline = Arc::new(AssessmentPipeline::from_config(&config, library.clone()));

    info!("Assessing {} compounds from the demo library...", compound_ids.len());
    let summary = assess_batch(Arc::clone(&pipeline), &compound_ids).await;
    info!(
        "✅ Batch {} finished: {} assessed, {} failed in {}ms",
        summary.job_id,
        summary.completed.len(),
        summary.failed.len(),
        summary.duration_ms
    );

    let mut by_risk = summary.completed.clone();
    by_risk.sort_by(|a, b| {
        b.profile
            .risk_score
            .partial_cmp(&a.profile.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!("Highest-risk compounds:");
    for assessment in by_risk.iter().take(5) {
        let p = &assessment.profile;
        info!(
            "  {} — score {:.2} [{}], safety window ({:.2}, {:.2}), {} suggestions",
            p.compound_name,
            p.risk_score,
            p.risk_category.as_str(),
            p.safety_window.0,
            p.safety_window.1,
            assessment.suggestions.len()
        );
    }

    if let Some(riskiest) = by_risk.first() {
        println!("{}", serde_json::to_string_pretty(&riskiest.profile)?);

        let report = build_report(&riskiest.profile.compound_id, &riskiest.suggestions);
        println!("{}", serde_json::to_string_pretty(&report)?);

        // Demo dose-response curve for the riskiest compound.
        if let Some(compound) = library.get(&riskiest.profile.compound_id) {
            let mut rng = StdRng::seed_from_u64(config.pipeline.base_seed);
            let points = hepatyx_library::dose_response::generate_dose_response(
                compound.ec50,
                1.0,
                hepatyx_library::dose_response::DEFAULT_NOISE,
                &mut rng,
            )?;
            let fit = hepatyx_library::dose_response::fit_curve(&points, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&fit)?);
        }
    }

    Ok(())
}

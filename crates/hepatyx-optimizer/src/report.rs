//! Aggregate reporting over a suggestion set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::OptimizationSuggestion;

pub const EXCELLENT_POTENTIAL: &str = "Excellent optimization potential identified";
pub const GOOD_POTENTIAL: &str = "Good optimization opportunities available";
pub const LIMITED_POTENTIAL: &str =
    "Limited optimization potential - consider alternative scaffolds";
pub const NO_STRATEGIES: &str = "No viable optimization strategies identified";
pub const LIPOPHILICITY_FOCUS: &str = "Focus on reducing lipophilicity for safety improvement";
pub const BIOISOSTERE_FOCUS: &str = "Bioisosteric replacements show promise";

/// Summary of the top-ranked suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestSuggestion {
    pub id: String,
    pub description: String,
    pub overall_score: f64,
    pub similarity: f64,
}

/// High-level view of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub compound_id: String,
    pub total_suggestions: usize,
    pub best_suggestion: Option<BestSuggestion>,
    /// Mean of per-suggestion mean improvements, in percent (1 decimal).
    pub average_improvement: f64,
    pub strategy_distribution: BTreeMap<String, usize>,
    pub recommendations: Vec<String>,
}

/// Build the aggregate report for a ranked suggestion list.
pub fn build_report(compound_id: &str, suggestions: &[OptimizationSuggestion]) -> OptimizationReport {
    if suggestions.is_empty() {
        return OptimizationReport {
            compound_id: compound_id.to_string(),
            total_suggestions: 0,
            best_suggestion: None,
            average_improvement: 0.0,
            strategy_distribution: BTreeMap::new(),
            recommendations: vec![NO_STRATEGIES.to_string()],
        };
    }

    let best = &suggestions[0];
    let average_improvement = suggestions
        .iter()
        .map(|s| s.mean_improvement_percent())
        .sum::<f64>()
        / suggestions.len() as f64;

    let mut strategy_distribution = BTreeMap::new();
    for s in suggestions {
        *strategy_distribution
            .entry(s.strategy_name().to_string())
            .or_insert(0) += 1;
    }

    OptimizationReport {
        compound_id: compound_id.to_string(),
        total_suggestions: suggestions.len(),
        best_suggestion: Some(BestSuggestion {
            id: best.id.clone(),
            description: best.modification_description.clone(),
            overall_score: best.overall_score,
            similarity: best.similarity_score,
        }),
        average_improvement: (average_improvement * 10.0).round() / 10.0,
        strategy_distribution,
        recommendations: report_recommendations(suggestions),
    }
}

fn report_recommendations(suggestions: &[OptimizationSuggestion]) -> Vec<String> {
    let mut recommendations = Vec::new();

    let best_score = suggestions[0].overall_score;
    if best_score > 0.8 {
        recommendations.push(EXCELLENT_POTENTIAL.to_string());
    } else if best_score > 0.6 {
        recommendations.push(GOOD_POTENTIAL.to_string());
    } else {
        recommendations.push(LIMITED_POTENTIAL.to_string());
    }

    let top_strategies: Vec<&str> = suggestions
        .iter()
        .take(3)
        .map(|s| s.strategy_name())
        .collect();
    if top_strategies.contains(&"reduce_lipophilicity") {
        recommendations.push(LIPOPHILICITY_FOCUS.to_string());
    }
    if top_strategies.contains(&"bioisosteric_replacement") {
        recommendations.push(BIOISOSTERE_FOCUS.to_string());
    }

    recommendations.push(format!(
        "Prioritize top {} suggestions for synthesis",
        suggestions.len().min(3)
    ));

    recommendations
}

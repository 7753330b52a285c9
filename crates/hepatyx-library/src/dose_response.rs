//! Hill-equation dose-response curves.
//!
//! Demo and end-to-end support only; the engines never consume these.

use hepatyx_common::entities::DosePoint;
use hepatyx_common::{HepatyxError, Result};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Standard assay concentration ladder (µM).
pub const CONCENTRATION_LADDER_UM: [f64; 10] =
    [0.01, 0.03, 0.1, 0.3, 1.0, 3.0, 10.0, 30.0, 100.0, 300.0];

/// Experimental noise half-width used by the demo curves (~5% CV).
pub const DEFAULT_NOISE: f64 = 0.05;

/// Generate a dose-response curve over the standard ladder.
///
/// `Y = 1 / (1 + 10^((logEC50 − logX) · slope))`, with optional bounded
/// noise (`noise` is the half-width, 0.0 for the clean curve). Responses are
/// clamped to [0, 1] and each point carries a confidence interval.
pub fn generate_dose_response(
    ec50: f64,
    hill_slope: f64,
    noise: f64,
    rng: &mut dyn RngCore,
) -> Result<Vec<DosePoint>> {
    if ec50 <= 0.0 || !ec50.is_finite() {
        return Err(HepatyxError::InvalidArgument(format!(
            "ec50 must be positive, got {ec50}"
        )));
    }
    if hill_slope <= 0.0 {
        return Err(HepatyxError::InvalidArgument(format!(
            "hill_slope must be positive, got {hill_slope}"
        )));
    }

    let log_ec50 = ec50.log10();
    let mut points = Vec::with_capacity(CONCENTRATION_LADDER_UM.len());

    for &x in &CONCENTRATION_LADDER_UM {
        let log_x = x.log10();
        let mut y = 1.0 / (1.0 + 10f64.powf((log_ec50 - log_x) * hill_slope));

        if noise > 0.0 {
            y += rng.gen_range(-noise..=noise);
        }
        y = y.clamp(0.0, 1.0);

        let ci_width = if y > 0.1 { 0.1 * y } else { 0.05 };
        points.push(DosePoint {
            x,
            y,
            confidence_interval: Some(((y - ci_width).max(0.0), (y + ci_width).min(1.0))),
            replicate_count: Some(3),
            standard_error: Some(ci_width / 2.0),
        });
    }

    Ok(points)
}

/// Heuristic curve-fit summary for a generated curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFit {
    pub ec50: f64,
    pub hill_slope: f64,
    pub top: f64,
    pub bottom: f64,
    pub r_squared: f64,
    pub equation: String,
}

/// Summarise a dose-response curve. The EC50 estimate is the median tested
/// concentration; slope and fit quality carry bounded variability standing in
/// for a real nonlinear regression.
pub fn fit_curve(points: &[DosePoint], rng: &mut dyn RngCore) -> Result<CurveFit> {
    if points.is_empty() {
        return Err(HepatyxError::InvalidArgument(
            "cannot fit an empty curve".into(),
        ));
    }

    let mut concentrations: Vec<f64> = points.iter().map(|p| p.x).collect();
    concentrations.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = concentrations.len();
    let ec50 = if n % 2 == 1 {
        concentrations[n / 2]
    } else {
        (concentrations[n / 2 - 1] + concentrations[n / 2]) / 2.0
    };

    let top = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
    let bottom = points.iter().map(|p| p.y).fold(f64::MAX, f64::min);

    Ok(CurveFit {
        ec50,
        hill_slope: 1.0 + rng.gen_range(-0.3..=0.3),
        top,
        bottom,
        r_squared: 0.92 + rng.gen_range(-0.05..=0.05),
        equation: "Y = Bottom + (Top-Bottom)/(1+10^((LogEC50-X)*HillSlope))".to_string(),
    })
}

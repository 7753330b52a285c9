//! Hepatyx Risk — DILI risk assessment engine.
//!
//! Derives a risk profile from in-vitro assay endpoints and molecular
//! descriptors:
//! 1. Estimating peak plasma concentration (Cmax)
//! 2. Computing the safety window and therapeutic index
//! 3. Categorising risk against named thresholds
//! 4. Scoring five mechanism pathways
//! 5. Generating advisory recommendations and a prediction confidence
//!
//! The engine is a pure function of its numeric inputs plus a caller-supplied
//! RNG handle; every pharmacology model sits behind a trait so the bundled
//! empirical placeholders can be swapped for trained models.

pub mod cmax;
pub mod confidence;
pub mod engine;
pub mod mechanisms;
pub mod predict;
pub mod recommend;
pub mod score;
pub mod thresholds;

pub use engine::{RiskConfig, RiskEngine, RiskInput, RiskProfile};

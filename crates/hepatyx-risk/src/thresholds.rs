//! Safety-window thresholds and risk categorisation.

use hepatyx_common::entities::RiskCategory;
use serde::{Deserialize, Serialize};

/// Safety-window category boundaries, in multiples of Cmax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Lower bound above this multiple → Low risk.
    #[serde(default = "default_low")]
    pub low: f64,
    /// Lower bound above this multiple (but not `low`) → Medium risk.
    #[serde(default = "default_medium")]
    pub medium: f64,
    /// Everything at or below `medium` is High risk.
    #[serde(default = "default_high")]
    pub high: f64,
}

fn default_low() -> f64 {
    100.0
}
fn default_medium() -> f64 {
    10.0
}
fn default_high() -> f64 {
    1.0
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
        }
    }
}

impl RiskThresholds {
    /// Categorise by the lower bound of the safety window.
    pub fn categorise(&self, safety_window_lower: f64) -> RiskCategory {
        if safety_window_lower > self.low {
            RiskCategory::Low
        } else if safety_window_lower > self.medium {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    /// Thresholds must be strictly ordered to partition the axis.
    pub fn validate(&self) -> bool {
        self.low > self.medium && self.medium > self.high && self.high > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_ordered() {
        assert!(RiskThresholds::default().validate());
    }

    #[test]
    fn test_category_boundaries() {
        let t = RiskThresholds::default();
        // Category is monotonic in the lower bound; boundaries are exclusive.
        assert_eq!(t.categorise(100.01), RiskCategory::Low);
        assert_eq!(t.categorise(100.0), RiskCategory::Medium);
        assert_eq!(t.categorise(99.99), RiskCategory::Medium);
        assert_eq!(t.categorise(10.01), RiskCategory::Medium);
        assert_eq!(t.categorise(10.0), RiskCategory::High);
        assert_eq!(t.categorise(9.99), RiskCategory::High);
        assert_eq!(t.categorise(0.0), RiskCategory::High);
    }
}

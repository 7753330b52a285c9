//! Advisory recommendations derived from a risk profile.
//!
//! Rules fire in a fixed order so the output sequence is reproducible for
//! identical inputs; the generic fallback is only emitted when nothing else
//! fired.

use hepatyx_common::entities::RiskCategory;

use crate::mechanisms::MechanismScores;

pub const HIGH_RISK_ADVISORY: &str = "High DILI risk - consider structural optimization";
pub const EARLY_SCREENING_ADVISORY: &str = "Implement early safety screening";
pub const OXIDATIVE_STRESS_ADVISORY: &str = "Consider antioxidant co-treatment";
pub const MITOCHONDRIAL_ADVISORY: &str = "Evaluate mitochondrial toxicity markers";
pub const ER_STRESS_ADVISORY: &str = "Assess ER stress and unfolded protein response markers";
pub const APOPTOSIS_ADVISORY: &str = "Profile caspase activation at sub-cytotoxic concentrations";
pub const NECROSIS_ADVISORY: &str = "Monitor membrane integrity markers for necrotic injury";
pub const LIPOPHILICITY_ADVISORY: &str = "Reduce lipophilicity to improve safety profile";
pub const GENERIC_ADVISORY: &str = "Acceptable safety profile - proceed with caution";

/// Risk score above which early screening is advised.
pub const SCREENING_SCORE_THRESHOLD: f64 = 5.0;
/// Mechanism score above which the mechanism-specific advisory fires.
pub const MECHANISM_THRESHOLD: f64 = 0.7;
/// LogP above which the lipophilicity advisory fires.
pub const LOGP_THRESHOLD: f64 = 4.0;

pub fn generate_recommendations(
    risk_score: f64,
    category: RiskCategory,
    mechanisms: &MechanismScores,
    logp: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if category == RiskCategory::High {
        recommendations.push(HIGH_RISK_ADVISORY.to_string());
    }

    if risk_score > SCREENING_SCORE_THRESHOLD {
        recommendations.push(EARLY_SCREENING_ADVISORY.to_string());
    }

    let mechanism_rules = [
        (mechanisms.oxidative_stress, OXIDATIVE_STRESS_ADVISORY),
        (mechanisms.mitochondrial_dysfunction, MITOCHONDRIAL_ADVISORY),
        (mechanisms.er_stress, ER_STRESS_ADVISORY),
        (mechanisms.apoptosis, APOPTOSIS_ADVISORY),
        (mechanisms.necrosis, NECROSIS_ADVISORY),
    ];
    for (score, advisory) in mechanism_rules {
        if score > MECHANISM_THRESHOLD {
            recommendations.push(advisory.to_string());
        }
    }

    if logp > LOGP_THRESHOLD {
        recommendations.push(LIPOPHILICITY_ADVISORY.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(GENERIC_ADVISORY.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_mechanisms() -> MechanismScores {
        MechanismScores {
            oxidative_stress: 0.1,
            mitochondrial_dysfunction: 0.1,
            er_stress: 0.1,
            apoptosis: 0.1,
            necrosis: 0.1,
        }
    }

    #[test]
    fn test_high_risk_compound_advisories() {
        let mechanisms = MechanismScores {
            oxidative_stress: 0.8,
            ..quiet_mechanisms()
        };
        let recs = generate_recommendations(7.0, RiskCategory::High, &mechanisms, 5.0);
        assert_eq!(
            recs,
            vec![
                HIGH_RISK_ADVISORY.to_string(),
                EARLY_SCREENING_ADVISORY.to_string(),
                OXIDATIVE_STRESS_ADVISORY.to_string(),
                LIPOPHILICITY_ADVISORY.to_string(),
            ]
        );
        assert!(!recs.contains(&GENERIC_ADVISORY.to_string()));
    }

    #[test]
    fn test_clean_profile_gets_generic_fallback() {
        let recs = generate_recommendations(1.0, RiskCategory::Low, &quiet_mechanisms(), 2.0);
        assert_eq!(recs, vec![GENERIC_ADVISORY.to_string()]);
    }

    #[test]
    fn test_mechanism_rule_order_is_fixed() {
        let mechanisms = MechanismScores {
            oxidative_stress: 0.9,
            mitochondrial_dysfunction: 0.9,
            er_stress: 0.9,
            apoptosis: 0.9,
            necrosis: 0.9,
        };
        let recs = generate_recommendations(1.0, RiskCategory::Low, &mechanisms, 2.0);
        assert_eq!(
            recs,
            vec![
                OXIDATIVE_STRESS_ADVISORY.to_string(),
                MITOCHONDRIAL_ADVISORY.to_string(),
                ER_STRESS_ADVISORY.to_string(),
                APOPTOSIS_ADVISORY.to_string(),
                NECROSIS_ADVISORY.to_string(),
            ]
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mechanisms = MechanismScores {
            oxidative_stress: MECHANISM_THRESHOLD,
            ..quiet_mechanisms()
        };
        let recs = generate_recommendations(5.0, RiskCategory::Low, &mechanisms, 4.0);
        // 0.7 exactly, score 5.0 exactly, logp 4.0 exactly: nothing fires.
        assert_eq!(recs, vec![GENERIC_ADVISORY.to_string()]);
    }
}

//! Compound data source abstraction and the demo catalog.
//!
//! Implementations can use:
//! - A database-backed store (production)
//! - The bundled in-memory demo catalog
//! - Hand-rolled fixtures (testing)

use hepatyx_common::entities::Compound;
use hepatyx_common::{HepatyxError, Result};

/// Read access to compound records.
pub trait CompoundSource: Send + Sync {
    /// Fetch a compound by identifier. None if absent.
    fn get(&self, id: &str) -> Option<Compound>;

    /// All compounds, in catalog order.
    fn all(&self) -> Vec<Compound>;

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// Resolve a compound or fail with `CompoundNotFound`.
pub fn require(source: &dyn CompoundSource, id: &str) -> Result<Compound> {
    source
        .get(id)
        .ok_or_else(|| HepatyxError::CompoundNotFound(id.to_string()))
}

/// Fallback structure for compounds without a recorded one (cumene scaffold).
pub const DEFAULT_REFERENCE_STRUCTURE: &str = "CC(C)C1=CC=CC=C1";

/// Literature structures for named compounds missing a stored SMILES.
pub fn reference_structure(compound_name: &str) -> Option<&'static str> {
    match compound_name {
        "Nefazodone" => {
            Some("CCC1=NN(C2=CC=CC=C2N1CCCN3CCN(CC3)C4=CC=CC(=C4)OC(=O)C5=CC=CC=C5Cl)C")
        }
        "Sunitinib" => {
            Some("CCN(CC)CCNC(=O)C1=C(NC(=C1C)/C=C/2\\C3=C(NC2=O)C=C(C=C3)F)C")
        }
        "Orfanglipron" => Some("CC(C)(C)OC(=O)N1CCC(CC1)C(=O)N2CCC(CC2)C(=O)O"),
        "Lotiglipron" => Some("CC1=CC(=CC=C1)C2=CC=C(C=C2)C(=O)N3CCC(CC3)C(=O)O"),
        _ => None,
    }
}

/// Best available structure for a compound record: the stored SMILES, then
/// the reference table, then the documented fallback scaffold.
pub fn structure_for(compound: &Compound) -> String {
    if let Some(ref smiles) = compound.smiles {
        return smiles.clone();
    }
    reference_structure(&compound.name)
        .unwrap_or(DEFAULT_REFERENCE_STRUCTURE)
        .to_string()
}

/// In-memory compound source.
pub struct InMemoryCompoundLibrary {
    compounds: Vec<Compound>,
}

impl InMemoryCompoundLibrary {
    pub fn new(compounds: Vec<Compound>) -> Self {
        Self { compounds }
    }

    /// The demo catalog: realistic pharmaceutical compounds spanning
    /// withdrawn/black-box hepatotoxins through well-tolerated drugs.
    pub fn demo() -> Self {
        let c = |id: &str,
                 name: &str,
                 tc20: f64,
                 tc50: f64,
                 ec20: f64,
                 ec50: f64,
                 risk_score: f64,
                 smiles: &str,
                 molecular_weight: f64,
                 logp: f64| Compound {
            id: id.to_string(),
            name: name.to_string(),
            tc20,
            tc50,
            ec20,
            ec50,
            risk_score,
            smiles: Some(smiles.to_string()),
            molecular_weight: Some(molecular_weight),
            logp: Some(logp),
            created_at: None,
            updated_at: None,
        };

        #[rustfmt::skip]
        let compounds = vec![
            // High DILI risk (withdrawn or black-box warnings)
            c("nefazodone", "Nefazodone", 29.26, 74.49, 43.10, 63.18, 3.94,
              "CCC1=NN(C2=CC=CC=C2N1CCCN3CCN(CC3)C4=CC=CC(=C4)OC(=O)C5=CC=CC=C5Cl)C", 470.01, 4.7),
            c("orfanglipron", "Orfanglipron", 2.10, 6.00, 3.10, 7.20, 6.04,
              "CC(C)(C)OC(=O)N1CCC(CC1)C(=O)N2CCC(CC2)C(=O)O", 385.45, 2.8),
            c("troglitazone", "Troglitazone", 8.5, 22.3, 12.1, 28.7, 7.2,
              "CC1=C(C(=O)N(N1C)C2=CC=C(C=C2)C)C3=CC=C(C=C3)OCC4=CC=C(C=C4)CC5C(=O)NC(=O)S5", 441.54, 5.2),
            // Medium DILI risk
            c("ketoconazole", "Ketoconazole", 15.8, 42.1, 18.9, 45.3, 4.1,
              "CC(=O)N1CCN(CC1)C2=CC=C(C=C2)OCC3=C(C=CC=C3Cl)Cl", 531.43, 4.35),
            c("diclofenac", "Diclofenac", 25.4, 58.9, 22.7, 52.1, 3.8,
              "O=C(O)CC1=CC=CC=C1NC2=C(Cl)C=CC=C2Cl", 296.15, 4.51),
            c("amiodarone", "Amiodarone", 18.2, 48.7, 21.5, 51.3, 4.3,
              "CCCC1=CC(=C(C=C1)I)C(=O)C2=C(C=CC=C2I)OCCN(CC)CC", 645.31, 7.6),
            // Low DILI risk
            c("sunitinib", "Sunitinib", 4.43, 12.34, 6.08, 13.73, 1.22,
              "CCN(CC)CCNC(=O)C1=C(NC(=C1C)/C=C/2\\C3=C(NC2=O)C=C(C=C3)F)C", 398.47, 2.9),
            c("lotiglipron", "Lotiglipron", 90.0, 120.0, 85.0, 115.0, 0.13,
              "CC1=CC(=CC=C1)C2=CC=C(C=C2)C(=O)N3CCC(CC3)C(=O)O", 352.42, 2.1),
            c("metformin", "Metformin", 150.0, 280.0, 145.0, 275.0, 0.08,
              "CN(C)C(=N)NC(=N)N", 129.16, -2.64),
            c("aspirin", "Aspirin", 125.0, 245.0, 118.0, 238.0, 0.25,
              "CC(=O)OC1=CC=CC=C1C(=O)O", 180.16, 1.19),
            c("ibuprofen", "Ibuprofen", 85.3, 165.7, 78.9, 158.2, 0.45,
              "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O", 206.28, 3.97),
            c("acetaminophen", "Acetaminophen", 95.2, 185.4, 88.7, 178.9, 0.35,
              "CC(=O)NC1=CC=C(C=C1)O", 151.16, 0.46),
            c("warfarin", "Warfarin", 45.8, 89.3, 42.1, 85.7, 2.1,
              "CC(=O)CC(C1=CC=CC=C1)C2=C(C3=CC=CC=C3OC2=O)O", 308.33, 2.7),
            c("simvastatin", "Simvastatin", 65.4, 128.9, 61.2, 124.3, 1.8,
              "CCC(C)(C)C(=O)OC1CC(C=C2C1C(C(C=C2)C)CCC3CC(CC(=O)O3)O)C", 418.57, 4.68),
            c("atorvastatin", "Atorvastatin", 72.1, 142.8, 68.5, 138.2, 1.5,
              "CC(C)C1=C(C(=C(N1CC(CC(=O)O)O)C2=CC=C(C=C2)F)C3=CC=CC=C3)C(=O)NC4=CC=CC=C4", 558.64, 5.7),
            c("lisinopril", "Lisinopril", 110.5, 215.3, 105.8, 208.7, 0.18,
              "CCCCN1CCCC1C(=O)N2CCCC2C(=O)N3CCC(CC3)C(=O)O", 405.49, -1.22),
            c("omeprazole", "Omeprazole", 55.7, 108.4, 52.3, 104.9, 2.3,
              "COC1=CC2=C(C=C1)N=C(N2)S(=O)CC3=NC=C(C=C3OC)C", 345.42, 2.23),
            c("fluoxetine", "Fluoxetine", 38.9, 76.2, 35.4, 72.8, 2.8,
              "CNCCC(C1=CC=CC=C1)OC2=CC=C(C=C2)C(F)(F)F", 309.33, 4.05),
            c("sertraline", "Sertraline", 42.3, 82.7, 39.1, 78.5, 2.5,
              "CNC1CCC(C2=CC=CC=C12)C3=CC(=C(C=C3)Cl)Cl", 306.23, 5.1),
        ];

        Self::new(compounds)
    }
}

impl CompoundSource for InMemoryCompoundLibrary {
    fn get(&self, id: &str) -> Option<Compound> {
        self.compounds.iter().find(|c| c.id == id).cloned()
    }

    fn all(&self) -> Vec<Compound> {
        self.compounds.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepatyx_common::entities::RiskCategory;

    #[test]
    fn test_demo_catalog_lookup() {
        let library = InMemoryCompoundLibrary::demo();
        let nefazodone = library.get("nefazodone").unwrap();
        assert_eq!(nefazodone.name, "Nefazodone");
        assert_eq!(nefazodone.tc50, 74.49);
        assert!(library.contains("metformin"));
        assert!(!library.contains("thalidomide"));
    }

    #[test]
    fn test_require_fails_with_not_found() {
        let library = InMemoryCompoundLibrary::demo();
        let err = require(&library, "missing-id").unwrap_err();
        assert!(matches!(err, HepatyxError::CompoundNotFound(_)));
        assert!(err.to_string().contains("missing-id"));
    }

    #[test]
    fn test_demo_catalog_records_are_well_formed() {
        let library = InMemoryCompoundLibrary::demo();
        let all = library.all();
        assert!(all.len() >= 15);
        for compound in &all {
            assert!(compound.tc20 > 0.0 && compound.tc50 > 0.0);
            assert!(compound.ec20 > 0.0 && compound.ec50 > 0.0);
            assert!(compound.tc20 < compound.tc50);
            assert!(compound.ec20 < compound.ec50);
            assert!((0.0..=10.0).contains(&compound.risk_score));
            assert!(compound.smiles.is_some());
        }
    }

    #[test]
    fn test_catalog_spans_risk_categories() {
        let library = InMemoryCompoundLibrary::demo();
        let categories: Vec<RiskCategory> = library
            .all()
            .iter()
            .map(|c| c.risk_category())
            .collect();
        assert!(categories.contains(&RiskCategory::Low));
        assert!(categories.contains(&RiskCategory::Medium));
        assert!(categories.contains(&RiskCategory::High));
    }

    #[test]
    fn test_structure_resolution_order() {
        let library = InMemoryCompoundLibrary::demo();
        let aspirin = library.get("aspirin").unwrap();
        assert_eq!(structure_for(&aspirin), "CC(=O)OC1=CC=CC=C1C(=O)O");

        let mut unnamed = aspirin.clone();
        unnamed.smiles = None;
        unnamed.name = "Obscuron".to_string();
        assert_eq!(structure_for(&unnamed), DEFAULT_REFERENCE_STRUCTURE);

        let mut known = aspirin;
        known.smiles = None;
        known.name = "Nefazodone".to_string();
        assert!(structure_for(&known).starts_with("CCC1=NN"));
    }
}

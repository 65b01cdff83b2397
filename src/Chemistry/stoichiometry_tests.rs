/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Chemistry::chem_errors::ChemError;
    use crate::Chemistry::species::{DuplicatePolicy, read_species_list};
    use crate::Chemistry::stoichiometry::{balance_reaction, is_balanced, stoich, stoich_with_config};
    use crate::settings::BalancerConfig;

    // the sign of the balanced vector depends on the decomposition, both orientations are correct
    fn assert_balanced_to(formulas: &[&str], expected: &[i64]) {
        let coefficients = stoich(formulas).unwrap();
        let negated: Vec<i64> = expected.iter().map(|x| -x).collect();
        assert!(
            coefficients == expected || coefficients == negated,
            "{:?} balanced to {:?}, expected +-{:?}",
            formulas,
            coefficients,
            expected
        );
        let species = read_species_list(formulas, DuplicatePolicy::Merge).unwrap();
        assert!(is_balanced(&species, &coefficients));
    }

    #[test]
    fn test_oxygen_reduction() {
        assert_balanced_to(&["e-", "H+", "O2", "H2O"], &[-4, -4, -1, 2]);
    }

    #[test]
    fn test_hydrogen_combustion() {
        assert_balanced_to(&["H2", "O2", "H2O"], &[2, 1, -2]);
    }

    #[test]
    fn test_hydrogen_oxidation() {
        assert_balanced_to(&["H2", "H+", "e-"], &[1, -2, -2]);
    }

    #[test]
    fn test_propane_combustion() {
        assert_balanced_to(&["C3H8", "O2", "CO2", "H2O"], &[1, 5, -3, -4]);
    }

    #[test]
    fn test_methanol_oxidation() {
        assert_balanced_to(
            &["CH3OH", "H2O", "CO2", "H+", "e-"],
            &[1, 1, -1, -6, -6],
        );
    }

    #[test]
    fn test_mercury_reduction() {
        assert_balanced_to(&["Hg2+2", "e-", "Hg"], &[1, 2, -2]);
    }

    #[test]
    fn test_fractional_ratio() {
        // dividing by the smallest entry leaves 3/2 for O2
        assert_balanced_to(&["Fe", "O2", "Fe2O3"], &[4, 3, -2]);
        assert_balanced_to(&["Al", "O2", "Al2O3"], &[4, 3, -2]);
    }

    #[test]
    fn test_fractional_ratio_without_multiplier() {
        let config = BalancerConfig {
            max_multiplier: 1,
            ..BalancerConfig::default()
        };
        assert!(matches!(
            stoich_with_config(&["Fe", "O2", "Fe2O3"], &config),
            Err(ChemError::UnbalancedSolution { .. })
        ));
    }

    #[test]
    fn test_redundant_species() {
        assert!(matches!(
            stoich(&["H2", "O2", "H2O", "H2O2"]),
            Err(ChemError::RedundantSpecies {
                species: 4,
                elements: 2
            })
        ));
        assert!(matches!(
            stoich(&["H2", "O2", "H2O", "H2O"]),
            Err(ChemError::RedundantSpecies { .. })
        ));
    }

    #[test]
    fn test_missing_species() {
        assert!(matches!(
            stoich(&["H2", "H2O"]),
            Err(ChemError::MissingSpecies {
                species: 2,
                elements: 2
            })
        ));
        assert!(matches!(
            stoich(&["C19HF37O5S", "C19F37O5S-", "H"]),
            Err(ChemError::MissingSpecies { .. })
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(
            stoich(&empty),
            Err(ChemError::MissingSpecies { .. })
        ));
    }

    #[test]
    fn test_unrelated_species() {
        // O2 shares no element with H2 and H
        assert!(matches!(
            stoich(&["H2", "H", "O2"]),
            Err(ChemError::UnrelatedSpecies { .. })
        ));
        // two independent reactions: Na2Cl2 = 2 NaCl and H2 = 2 H
        assert!(matches!(
            stoich(&["NaCl", "Na2Cl2", "H2", "H"]),
            Err(ChemError::UnrelatedSpecies { .. })
        ));
    }

    #[test]
    fn test_invalid_formula() {
        match stoich(&["H2", "o2", "H2O"]) {
            Err(ChemError::InvalidFormula { formula, .. }) => assert_eq!(formula, "o2"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_empty_formula() {
        match stoich(&[""]) {
            Err(ChemError::InvalidFormula { formula, .. }) => assert_eq!(formula, ""),
            other => panic!("unexpected result {:?}", other),
        }
        // the empty entry is reported before the species count is checked
        match stoich(&["H2", "O2", "H2O", " "]) {
            Err(ChemError::InvalidFormula { formula, .. }) => assert_eq!(formula, " "),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_policy() {
        let formulas = ["CH3COOH", "O2", "CO2", "H2O"];
        assert_balanced_to(&formulas, &[1, 2, -2, -2]);
        let config = BalancerConfig {
            duplicate_policy: DuplicatePolicy::Reject,
            ..BalancerConfig::default()
        };
        assert!(matches!(
            stoich_with_config(&formulas, &config),
            Err(ChemError::InvalidFormula { .. })
        ));
    }

    #[test]
    fn test_repeated_balancing_gives_same_result() {
        let formulas = ["e-", "H+", "O2", "H2O"];
        assert_eq!(stoich(&formulas).unwrap(), stoich(&formulas).unwrap());
    }

    #[test]
    fn test_balanced_reaction_data() {
        let reaction = balance_reaction(&["H2", "O2", "H2O"], &BalancerConfig::default()).unwrap();
        assert_eq!(reaction.formulas, vec!["H2", "O2", "H2O"]);
        assert_eq!(reaction.elements, vec!["H", "O"]);
        assert_eq!(reaction.matrix.shape(), (3, 2));
        assert_eq!(reaction.equation(), "2 H2 + O2 = 2 H2O");
    }
}

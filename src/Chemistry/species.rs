//! Element composition of a single species.
//!
//! A formula is consumed token by token; repeated elements are summed and a nonzero net charge is stored
//! as the pseudo-element `"e-"` with coefficient equal to minus the charge, so that charge is conserved
//! by the same linear balance as the elements.
//!
//! ```rust
//! use FCSysChem::Chemistry::species::read_species;
//! let composition = read_species("C19HF37O5S-").unwrap();
//! assert_eq!(composition["F"], 37);
//! assert_eq!(composition["e-"], 1);
//! ```
use super::chem_errors::ChemError;
use super::formula_parser::tokens;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// pseudo-element that carries the charge of a species
pub const ELECTRON_SPECIES: &str = "e-";

/// element symbol -> coefficient
pub type ParsedSpecies = HashMap<String, i64>;

/// What to do when an element appears in more than one token of a formula, as O in `CH3COOH`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// add the coefficients
    #[default]
    Merge,
    /// treat the formula as invalid
    Reject,
}

/// Element composition of `formula`, repeated elements merged
pub fn read_species(formula: &str) -> Result<ParsedSpecies, ChemError> {
    read_species_with(formula, DuplicatePolicy::Merge)
}

pub fn read_species_with(
    formula: &str,
    policy: DuplicatePolicy,
) -> Result<ParsedSpecies, ChemError> {
    let mut species = ParsedSpecies::new();
    let mut net_charge: i64 = 0;
    let mut n_tokens = 0usize;
    for token in tokens(formula) {
        let token = token.map_err(|err| ChemError::formula(formula, err.to_string()))?;
        n_tokens += 1;
        net_charge += i64::from(token.charge);
        // electrons only count through the net charge
        if token.is_electron() {
            continue;
        }
        let coefficient = i64::from(token.coefficient);
        match species.entry(token.symbol) {
            Entry::Occupied(mut entry) => {
                if policy == DuplicatePolicy::Reject {
                    return Err(ChemError::formula(
                        formula,
                        format!("element '{}' appears more than once", entry.key()),
                    ));
                }
                *entry.get_mut() += coefficient;
            }
            Entry::Vacant(entry) => {
                entry.insert(coefficient);
            }
        }
    }
    if n_tokens == 0 {
        return Err(ChemError::formula(formula, "no element found"));
    }
    if net_charge != 0 {
        species.insert(ELECTRON_SPECIES.to_string(), -net_charge);
    }
    Ok(species)
}

/// Parses every formula of a reaction, keeping the input order
pub fn read_species_list<S: AsRef<str>>(
    formulas: &[S],
    policy: DuplicatePolicy,
) -> Result<Vec<ParsedSpecies>, ChemError> {
    formulas
        .iter()
        .map(|formula| read_species_with(formula.as_ref(), policy))
        .collect()
}

/// Net charge recorded in a parsed species
pub fn species_charge(species: &ParsedSpecies) -> i64 {
    species
        .get(ELECTRON_SPECIES)
        .map_or(0, |electrons| -electrons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chemistry::formula_parser::{charge, count_elements};

    fn composition(pairs: &[(&str, i64)]) -> ParsedSpecies {
        pairs
            .iter()
            .map(|(symbol, n)| (symbol.to_string(), *n))
            .collect()
    }

    #[test]
    fn test_read_species() {
        let expected = composition(&[
            ("C", 19),
            ("H", 1),
            ("F", 37),
            ("O", 5),
            ("S", 1),
            ("e-", 1),
        ]);
        assert_eq!(read_species("C19HF37O5S-").unwrap(), expected);
        assert_eq!(
            read_species("H+").unwrap(),
            composition(&[("H", 1), ("e-", -1)])
        );
        assert_eq!(
            read_species("H2O").unwrap(),
            composition(&[("H", 2), ("O", 1)])
        );
        assert_eq!(read_species("e-").unwrap(), composition(&[("e-", 1)]));
    }

    #[test]
    fn test_empty_formula_is_invalid() {
        for empty in ["", "   "] {
            match read_species(empty) {
                Err(ChemError::InvalidFormula { formula, .. }) => assert_eq!(formula, empty),
                other => panic!("unexpected result {:?}", other),
            }
        }
        assert!(read_species_list(&["H2", ""], DuplicatePolicy::Merge).is_err());
    }

    #[test]
    fn test_duplicates() {
        assert_eq!(
            read_species("CH3COOH").unwrap(),
            composition(&[("C", 2), ("H", 4), ("O", 2)])
        );
        assert!(matches!(
            read_species_with("CH3COOH", DuplicatePolicy::Reject),
            Err(ChemError::InvalidFormula { .. })
        ));
        assert!(read_species_with("CH4", DuplicatePolicy::Reject).is_ok());
    }

    #[test]
    fn test_invalid_formula_carries_formula() {
        match read_species("Na(OH)") {
            Err(ChemError::InvalidFormula { formula, .. }) => assert_eq!(formula, "Na(OH)"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_consistency_with_parser() {
        for formula in [
            "C19HF37O5S-",
            "H+",
            "e-",
            "H2O",
            "Hg2+2",
            "SO4-2",
            "CH3COOH",
            "Fe+3",
            "O2",
        ] {
            let species = read_species(formula).unwrap();
            assert_eq!(count_elements(formula).unwrap(), species.len());
            assert_eq!(species_charge(&species), charge(formula));
            if charge(formula) == 0 {
                assert!(!species.contains_key(ELECTRON_SPECIES));
            }
        }
    }

    #[test]
    fn test_read_species_list() {
        let list = read_species_list(&["H2", "O2", "H2O"], DuplicatePolicy::Merge).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2], composition(&[("H", 2), ("O", 1)]));
        assert!(read_species_list(&["H2", "o2"], DuplicatePolicy::Merge).is_err());
    }
}

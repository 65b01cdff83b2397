//! Module to calculate the element composition and molar mass of a species from its chemical formula
//!
use super::chem_errors::ChemError;
use super::species::{ELECTRON_SPECIES, ParsedSpecies, read_species};

// Define a struct to hold element data
pub struct Element {
    name: &'static str,
    atomic_mass: f64,
}

/// molar mass of the electron, g/mol
pub const ELECTRON_MASS: f64 = 5.485_799_09e-4;

// Standard atomic weights in g/mol, H through Rn
const ELEMENTS: &[Element] = &[
    Element {
        name: "H",
        atomic_mass: 1.008,
    },
    Element {
        name: "He",
        atomic_mass: 4.0026,
    },
    Element {
        name: "Li",
        atomic_mass: 6.94,
    },
    Element {
        name: "Be",
        atomic_mass: 9.0122,
    },
    Element {
        name: "B",
        atomic_mass: 10.81,
    },
    Element {
        name: "C",
        atomic_mass: 12.011,
    },
    Element {
        name: "N",
        atomic_mass: 14.007,
    },
    Element {
        name: "O",
        atomic_mass: 15.999,
    },
    Element {
        name: "F",
        atomic_mass: 18.998,
    },
    Element {
        name: "Ne",
        atomic_mass: 20.18,
    },
    Element {
        name: "Na",
        atomic_mass: 22.99,
    },
    Element {
        name: "Mg",
        atomic_mass: 24.305,
    },
    Element {
        name: "Al",
        atomic_mass: 26.982,
    },
    Element {
        name: "Si",
        atomic_mass: 28.085,
    },
    Element {
        name: "P",
        atomic_mass: 30.974,
    },
    Element {
        name: "S",
        atomic_mass: 32.06,
    },
    Element {
        name: "Cl",
        atomic_mass: 35.45,
    },
    Element {
        name: "Ar",
        atomic_mass: 39.948,
    },
    Element {
        name: "K",
        atomic_mass: 39.098,
    },
    Element {
        name: "Ca",
        atomic_mass: 40.078,
    },
    Element {
        name: "Sc",
        atomic_mass: 44.956,
    },
    Element {
        name: "Ti",
        atomic_mass: 47.867,
    },
    Element {
        name: "V",
        atomic_mass: 50.942,
    },
    Element {
        name: "Cr",
        atomic_mass: 51.996,
    },
    Element {
        name: "Mn",
        atomic_mass: 54.938,
    },
    Element {
        name: "Fe",
        atomic_mass: 55.845,
    },
    Element {
        name: "Co",
        atomic_mass: 58.933,
    },
    Element {
        name: "Ni",
        atomic_mass: 58.693,
    },
    Element {
        name: "Cu",
        atomic_mass: 63.546,
    },
    Element {
        name: "Zn",
        atomic_mass: 65.38,
    },
    Element {
        name: "Ga",
        atomic_mass: 69.723,
    },
    Element {
        name: "Ge",
        atomic_mass: 72.63,
    },
    Element {
        name: "As",
        atomic_mass: 74.922,
    },
    Element {
        name: "Se",
        atomic_mass: 78.971,
    },
    Element {
        name: "Br",
        atomic_mass: 79.904,
    },
    Element {
        name: "Kr",
        atomic_mass: 83.798,
    },
    Element {
        name: "Rb",
        atomic_mass: 85.468,
    },
    Element {
        name: "Sr",
        atomic_mass: 87.62,
    },
    Element {
        name: "Y",
        atomic_mass: 88.906,
    },
    Element {
        name: "Zr",
        atomic_mass: 91.224,
    },
    Element {
        name: "Nb",
        atomic_mass: 92.906,
    },
    Element {
        name: "Mo",
        atomic_mass: 95.95,
    },
    Element {
        name: "Tc",
        atomic_mass: 98.0,
    },
    Element {
        name: "Ru",
        atomic_mass: 101.07,
    },
    Element {
        name: "Rh",
        atomic_mass: 102.91,
    },
    Element {
        name: "Pd",
        atomic_mass: 106.42,
    },
    Element {
        name: "Ag",
        atomic_mass: 107.87,
    },
    Element {
        name: "Cd",
        atomic_mass: 112.41,
    },
    Element {
        name: "In",
        atomic_mass: 114.82,
    },
    Element {
        name: "Sn",
        atomic_mass: 118.71,
    },
    Element {
        name: "Sb",
        atomic_mass: 121.76,
    },
    Element {
        name: "Te",
        atomic_mass: 127.6,
    },
    Element {
        name: "I",
        atomic_mass: 126.9,
    },
    Element {
        name: "Xe",
        atomic_mass: 131.29,
    },
    Element {
        name: "Cs",
        atomic_mass: 132.91,
    },
    Element {
        name: "Ba",
        atomic_mass: 137.33,
    },
    Element {
        name: "La",
        atomic_mass: 138.91,
    },
    Element {
        name: "Ce",
        atomic_mass: 140.12,
    },
    Element {
        name: "Pr",
        atomic_mass: 140.91,
    },
    Element {
        name: "Nd",
        atomic_mass: 144.24,
    },
    Element {
        name: "Pm",
        atomic_mass: 145.0,
    },
    Element {
        name: "Sm",
        atomic_mass: 150.36,
    },
    Element {
        name: "Eu",
        atomic_mass: 151.96,
    },
    Element {
        name: "Gd",
        atomic_mass: 157.25,
    },
    Element {
        name: "Tb",
        atomic_mass: 158.93,
    },
    Element {
        name: "Dy",
        atomic_mass: 162.5,
    },
    Element {
        name: "Ho",
        atomic_mass: 164.93,
    },
    Element {
        name: "Er",
        atomic_mass: 167.26,
    },
    Element {
        name: "Tm",
        atomic_mass: 168.93,
    },
    Element {
        name: "Yb",
        atomic_mass: 173.05,
    },
    Element {
        name: "Lu",
        atomic_mass: 174.97,
    },
    Element {
        name: "Hf",
        atomic_mass: 178.49,
    },
    Element {
        name: "Ta",
        atomic_mass: 180.95,
    },
    Element {
        name: "W",
        atomic_mass: 183.84,
    },
    Element {
        name: "Re",
        atomic_mass: 186.21,
    },
    Element {
        name: "Os",
        atomic_mass: 190.23,
    },
    Element {
        name: "Ir",
        atomic_mass: 192.22,
    },
    Element {
        name: "Pt",
        atomic_mass: 195.08,
    },
    Element {
        name: "Au",
        atomic_mass: 196.97,
    },
    Element {
        name: "Hg",
        atomic_mass: 200.59,
    },
    Element {
        name: "Tl",
        atomic_mass: 204.38,
    },
    Element {
        name: "Pb",
        atomic_mass: 207.2,
    },
    Element {
        name: "Bi",
        atomic_mass: 208.98,
    },
    Element {
        name: "Po",
        atomic_mass: 209.0,
    },
    Element {
        name: "At",
        atomic_mass: 210.0,
    },
    Element {
        name: "Rn",
        atomic_mass: 222.0,
    },
];

/// Atomic mass of an element symbol in g/mol; `"e-"` gives the electron mass
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    if symbol == ELECTRON_SPECIES {
        return Some(ELECTRON_MASS);
    }
    ELEMENTS
        .iter()
        .find(|element| element.name == symbol)
        .map(|element| element.atomic_mass)
}

/// Molar mass of a parsed species. The `"e-"` entry removes electrons from (or adds them to) the species.
pub fn molar_mass_of_species(species: &ParsedSpecies) -> Result<f64, ChemError> {
    let mut molar_mass = 0.0;
    for (element, &count) in species {
        let mass =
            atomic_mass(element).ok_or_else(|| ChemError::UnknownElement(element.clone()))?;
        molar_mass += mass * count as f64;
    }
    Ok(molar_mass)
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, ParsedSpecies), ChemError> {
    let counts = read_species(formula)?;
    let molar_mass = molar_mass_of_species(&counts)?;
    Ok((molar_mass, counts))
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs<S: AsRef<str>>(
    vec_of_formulae: &[S],
) -> Result<Vec<f64>, ChemError> {
    vec_of_formulae
        .iter()
        .map(|formula| calculate_molar_mass(formula.as_ref()).map(|(molar_mass, _)| molar_mass))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_atomic_mass() {
        assert_relative_eq!(atomic_mass("H").unwrap(), 1.008);
        assert_relative_eq!(atomic_mass("Pt").unwrap(), 195.08);
        assert_relative_eq!(atomic_mass("e-").unwrap(), ELECTRON_MASS);
        assert!(atomic_mass("Xx").is_none());
        assert!(atomic_mass("e").is_none());
    }

    #[test]
    fn test_calculate_molar_mass() {
        let (molar_mass, composition) = calculate_molar_mass("H2O").unwrap();
        assert_relative_eq!(molar_mass, 18.01528, epsilon = 1e-2);
        assert_eq!(composition.len(), 2);

        let (molar_mass, _) = calculate_molar_mass("NaCl").unwrap();
        assert_relative_eq!(molar_mass, 58.44, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("C6H8O6").unwrap();
        assert_relative_eq!(molar_mass, 176.12, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("CH3COOH").unwrap();
        assert_relative_eq!(molar_mass, 60.052, epsilon = 1e-2);
    }

    #[test]
    fn test_ions_and_electrons() {
        let (proton, _) = calculate_molar_mass("H+").unwrap();
        assert_relative_eq!(proton, 1.008 - ELECTRON_MASS, epsilon = 1e-12);

        let (electron, _) = calculate_molar_mass("e-").unwrap();
        assert_relative_eq!(electron, ELECTRON_MASS, epsilon = 1e-15);

        let (sulfate, _) = calculate_molar_mass("SO4-2").unwrap();
        assert_relative_eq!(
            sulfate,
            32.06 + 4.0 * 15.999 + 2.0 * ELECTRON_MASS,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_calculate_molar_mass_of_vector_of_substances() {
        let vec_of_formulae = ["H2O", "NaCl", "C6H8O6", "CO2"];
        let expected_molar_masses = vec![18.01528, 58.44316, 176.12, 44.009];

        let calculated_molar_masses =
            calculate_molar_mass_of_vector_of_subs(&vec_of_formulae).unwrap();

        for (i, &expected_molar_mass) in expected_molar_masses.iter().enumerate() {
            assert_relative_eq!(
                calculated_molar_masses[i],
                expected_molar_mass,
                epsilon = 1e-2
            );
        }
    }

    #[test]
    fn test_unknown_element() {
        assert_eq!(
            calculate_molar_mass("Xy2O").unwrap_err(),
            ChemError::UnknownElement("Xy".to_string())
        );
        assert!(matches!(
            calculate_molar_mass_of_vector_of_subs(&["H2O", "h2o"]),
            Err(ChemError::InvalidFormula { .. })
        ));
    }
}

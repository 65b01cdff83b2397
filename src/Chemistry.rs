/// Error type shared by the parsing and balancing functions
pub mod chem_errors;
/// eng
/// Tokenizer of chemical formulas. A formula is read as a sequence of element tokens, each made of an
/// element symbol, an optional coefficient and an optional charge annotation:
/// "C19HF37O5S-" -> C19, H, F37, O5, S with charge -1.
/// The bare lowercase "e" stands for the electron ("e-").
/// Also contains the net charge of a formula and the number of entries of its element composition.
///  # Examples
/// ```
/// use FCSysChem::Chemistry::formula_parser::{charge, read_element};
/// let (token, rest) = read_element("Hg2+2").unwrap();
/// assert_eq!(token.symbol, "Hg");
/// assert_eq!(rest, "");
/// assert_eq!(charge("SO4-2"), -2);
/// ```
pub mod formula_parser;
/// Element composition of a species: a map from element symbol to coefficient, where a nonzero net charge
/// is stored as the pseudo-element "e-" with coefficient equal to minus the charge
///  # Examples
/// ```
/// use FCSysChem::Chemistry::species::read_species;
/// let h_plus = read_species("H+").unwrap();
/// assert_eq!(h_plus["H"], 1);
/// assert_eq!(h_plus["e-"], -1);
/// ```
pub mod species;
/// eng
/// The module takes as input the formulas of the species taking part in one reaction and returns the
/// integer stoichiometric coefficients that conserve every element and the charge:
/// 1) matrix of element composition (species x elements)
/// 2) check that there is exactly one species more than elements
/// 3) singular value decomposition, left singular vector of the smallest singular value
/// 4) scaling to integers and exact check of the balance
///
///  # Examples
/// ```
/// use FCSysChem::Chemistry::stoichiometry::stoich;
/// let coefficients = stoich(&["H2", "O2", "H2O"]).unwrap();
/// assert!(coefficients == vec![2, 1, -2] || coefficients == vec![-2, -1, 2]);
/// ```
pub mod stoichiometry;
mod stoichiometry_tests;

/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///  # Examples
/// ```
/// use FCSysChem::Chemistry::molmass::calculate_molar_mass;
/// let (molar_mass, element_composition) = calculate_molar_mass("C6H8O6").unwrap();
/// println!("Element counts: {:?}", element_composition);
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// ```
///
pub mod molmass;

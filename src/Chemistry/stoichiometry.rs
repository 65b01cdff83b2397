//! # Stoichiometry Module
//!
//! ## Aim
//! Finds the integer stoichiometric coefficients that balance a reaction among a given set of species.
//!
//! ## Main Data Structures and Logic
//! - every species is expanded into its element composition, charge becomes the pseudo-element `"e-"`
//! - `composition_matrix()` stacks the compositions into an N x M matrix (species x elements)
//! - a balanced reaction is a vector x with x^T A = 0, i.e. a left null vector of A. For a unique
//!   reaction N must be equal to M + 1. A zero column is appended to make the matrix square, and the left
//!   singular vector of the smallest singular value is taken as the direction of the reaction
//! - the vector is divided by its smallest entry (in magnitude), multiplied by the smallest integer
//!   that clears fractional ratios and rounded. The integer result is checked against every element
//!
//! The overall sign of the result is whatever the decomposition delivers: callers must accept both
//! `[-4, -4, -1, 2]` and `[4, 4, 1, -2]` for 4e- + 4H+ + O2 = 2H2O.
//!
//! ## Usage
//! ```rust
//! use FCSysChem::Chemistry::stoichiometry::stoich;
//! let coefficients = stoich(&["e-", "H+", "O2", "H2O"]).unwrap();
//! let sign = coefficients[3].signum();
//! assert_eq!(coefficients, vec![-4 * sign, -4 * sign, -sign, 2 * sign]);
//! ```
use super::chem_errors::ChemError;
use super::species::{ParsedSpecies, read_species_list};
use crate::settings::BalancerConfig;
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector, SVD};
use prettytable::{Cell, Row, Table};
use std::collections::BTreeSet;

/// All distinct element symbols of the species, sorted
pub fn element_universe(species: &[ParsedSpecies]) -> Vec<String> {
    species
        .iter()
        .flat_map(|composition| composition.keys().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Matrix of element coefficients: one row per species, one column per element of the returned universe
pub fn composition_matrix(species: &[ParsedSpecies]) -> (DMatrix<f64>, Vec<String>) {
    let elements = element_universe(species);
    let matrix = DMatrix::from_fn(species.len(), elements.len(), |i, k| {
        species[i].get(&elements[k]).copied().unwrap_or(0) as f64
    });
    (matrix, elements)
}

/// A reaction needs exactly one species more than it has conserved elements
pub fn check_well_posed(n_species: usize, n_elements: usize) -> Result<(), ChemError> {
    if n_species > n_elements + 1 {
        return Err(ChemError::RedundantSpecies {
            species: n_species,
            elements: n_elements,
        });
    }
    if n_species < n_elements + 1 {
        return Err(ChemError::MissingSpecies {
            species: n_species,
            elements: n_elements,
        });
    }
    Ok(())
}

/// Left singular vector of the smallest singular value of `matrix` extended by a zero column.
///
/// Fails if a second singular value is numerically zero as well, since then the species form more than
/// one independent reaction.
pub fn null_space_vector(
    matrix: &DMatrix<f64>,
    config: &BalancerConfig,
) -> Result<DVector<f64>, ChemError> {
    let n = matrix.nrows();
    let square = matrix.clone().insert_column(matrix.ncols(), 0.0);
    let svd = SVD::try_new(
        square,
        true,
        false,
        config.svd_eps,
        config.svd_max_iterations,
    )
    .ok_or_else(|| {
        ChemError::Decomposition(format!(
            "no convergence within {} iterations",
            config.svd_max_iterations
        ))
    })?;
    let u = svd.u.ok_or_else(|| {
        ChemError::Decomposition("left singular vectors were not computed".to_string())
    })?;
    let singular_values = svd.singular_values;
    debug!("singular values: {:?}", singular_values.as_slice());

    let mut order: Vec<usize> = (0..singular_values.len()).collect();
    order.sort_by(|&a, &b| singular_values[a].total_cmp(&singular_values[b]));
    let smallest = order[0];
    if n > 1 {
        let largest = singular_values[order[n - 1]];
        let second = singular_values[order[1]];
        if second <= config.zero_tolerance * largest.max(1.0) {
            return Err(ChemError::UnrelatedSpecies {
                reason: "the species form more than one independent reaction".to_string(),
            });
        }
    }
    Ok(u.column(smallest).clone_owned())
}

/// Scales a null-space vector to integers
pub fn integer_coefficients(
    vector: &DVector<f64>,
    config: &BalancerConfig,
) -> Result<Vec<i64>, ChemError> {
    let min_abs = vector.iter().fold(f64::INFINITY, |min, x| min.min(x.abs()));
    if !(min_abs > config.zero_tolerance) {
        return Err(ChemError::UnrelatedSpecies {
            reason: "a species does not take part in the reaction".to_string(),
        });
    }
    let scaled: Vec<f64> = vector.iter().map(|x| x / min_abs).collect();
    let is_integral = |k: u32| {
        scaled.iter().all(|x| {
            let y = x * f64::from(k);
            (y - y.round()).abs() <= config.integer_tolerance
        })
    };
    let multiplier = match (1..=config.max_multiplier).find(|&k| is_integral(k)) {
        Some(k) => k,
        None => {
            warn!(
                "no multiplier up to {} makes {:?} integral, rounding directly",
                config.max_multiplier, scaled
            );
            1
        }
    };
    Ok(scaled
        .iter()
        .map(|x| (x * f64::from(multiplier) + 0.5).floor() as i64)
        .collect())
}

/// True if the coefficients conserve every element (and the charge) exactly
pub fn is_balanced(species: &[ParsedSpecies], coefficients: &[i64]) -> bool {
    element_universe(species).iter().all(|element| {
        species
            .iter()
            .zip(coefficients)
            .map(|(composition, &x)| {
                i128::from(x) * i128::from(composition.get(element).copied().unwrap_or(0))
            })
            .sum::<i128>()
            == 0
    })
}

/// Result of balancing one reaction
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedReaction {
    pub formulas: Vec<String>,
    pub elements: Vec<String>,
    pub matrix: DMatrix<f64>,
    pub coefficients: Vec<i64>,
}

impl BalancedReaction {
    /// Reaction equation with the first species on the left side, e.g. `4 e- + 4 H+ + O2 = 2 H2O`
    pub fn equation(&self) -> String {
        let orientation = match self.coefficients.first() {
            Some(&first) if first > 0 => -1,
            _ => 1,
        };
        let side = |wanted: i64| {
            self.formulas
                .iter()
                .zip(&self.coefficients)
                .filter(|&(_, &x)| (x * orientation).signum() == wanted)
                .map(|(formula, &x)| match x.abs() {
                    1 => formula.clone(),
                    n => format!("{} {}", n, formula),
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("{} = {}", side(-1), side(1))
    }

    /// Composition of every species and its coefficient
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("species")];
        header.extend(self.elements.iter().map(|element| Cell::new(element)));
        header.push(Cell::new("coefficient"));
        table.add_row(Row::new(header));
        for (i, formula) in self.formulas.iter().enumerate() {
            let mut row = vec![Cell::new(formula)];
            row.extend(
                self.matrix
                    .row(i)
                    .iter()
                    .map(|x| Cell::new(&format!("{}", x))),
            );
            row.push(Cell::new(&self.coefficients[i].to_string()));
            table.add_row(Row::new(row));
        }
        table
    }

    pub fn pretty_print(&self) {
        println!("{}", self.equation());
        self.table().printstd();
    }
}

/// Balances the reaction among `formulas` and keeps the intermediate data
pub fn balance_reaction<S: AsRef<str>>(
    formulas: &[S],
    config: &BalancerConfig,
) -> Result<BalancedReaction, ChemError> {
    let formulas: Vec<String> = formulas.iter().map(|f| f.as_ref().to_string()).collect();
    info!("balancing reaction among {:?}", formulas);
    let species = read_species_list(formulas.as_slice(), config.duplicate_policy)?;
    let (matrix, elements) = composition_matrix(&species);
    debug!("elements {:?}, composition matrix {}", elements, matrix);
    check_well_posed(species.len(), elements.len())?;

    let vector = null_space_vector(&matrix, config)?;
    let coefficients = integer_coefficients(&vector, config)?;
    if !is_balanced(&species, &coefficients) {
        return Err(ChemError::UnbalancedSolution { coefficients });
    }
    info!("stoichiometric coefficients {:?}", coefficients);
    Ok(BalancedReaction {
        formulas,
        elements,
        matrix,
        coefficients,
    })
}

pub fn stoich_with_config<S: AsRef<str>>(
    formulas: &[S],
    config: &BalancerConfig,
) -> Result<Vec<i64>, ChemError> {
    balance_reaction(formulas, config).map(|reaction| reaction.coefficients)
}

/// Stoichiometric coefficients of the reaction among `formulas` with the default configuration,
/// in input order and unique up to the overall sign
pub fn stoich<S: AsRef<str>>(formulas: &[S]) -> Result<Vec<i64>, ChemError> {
    stoich_with_config(formulas, &BalancerConfig::default())
}

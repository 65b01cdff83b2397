use thiserror::Error;

/// error types of formula parsing and reaction balancing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChemError {
    /// one element token could not be read; `input` is the text that was left unconsumed
    #[error("Cannot read an element from '{input}': {reason}")]
    ElementSyntax { input: String, reason: String },
    #[error("Invalid chemical formula '{formula}': {reason}")]
    InvalidFormula { formula: String, reason: String },
    #[error(
        "Ill-posed reaction: {species} species for {elements} elements, a species may be duplicated or redundant"
    )]
    RedundantSpecies { species: usize, elements: usize },
    #[error(
        "Ill-posed reaction: {species} species for {elements} elements, a species may be missing or unmatched"
    )]
    MissingSpecies { species: usize, elements: usize },
    #[error("Ill-posed reaction: unrelated species are present ({reason})")]
    UnrelatedSpecies { reason: String },
    #[error("Rounded coefficients {coefficients:?} do not balance the reaction")]
    UnbalancedSolution { coefficients: Vec<i64> },
    #[error("Singular value decomposition failed: {0}")]
    Decomposition(String),
    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

impl ChemError {
    pub(crate) fn syntax(input: &str, reason: impl Into<String>) -> Self {
        ChemError::ElementSyntax {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn formula(formula: &str, reason: impl Into<String>) -> Self {
        ChemError::InvalidFormula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }
}

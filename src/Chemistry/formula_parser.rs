//! # Formula Parser Module
//!
//! ## Aim
//! Reads a chemical formula such as `"C19HF37O5S-"` or `"Hg2+2"` token by token. Every token is an
//! element symbol with an optional integer coefficient and an optional charge annotation.
//!
//! ## Grammar
//! - symbol: one uppercase letter followed by any number of lowercase letters (`H`, `Hg`, `Uuo`);
//!   the bare lowercase `e` is the electron
//! - coefficient: optional run of digits, absent means 1, zero is rejected
//! - charge: optional `+` or `-`, optionally followed by digits (`+` = +1, `-3` = -3)
//!
//! Whitespace in front of a token is skipped. The charges of all tokens of a formula add up to its net charge.
//!
//! ## Usage
//! ```rust
//! use FCSysChem::Chemistry::formula_parser::{charge, count_elements, read_element};
//! let (token, remainder) = read_element("Hg2+2").unwrap();
//! assert_eq!((token.symbol.as_str(), token.coefficient, token.charge), ("Hg", 2, 2));
//! assert_eq!(remainder, "");
//! assert_eq!(charge("Hg2+2"), 2);
//! assert_eq!(count_elements("C19HF37O5S-").unwrap(), 6);
//! ```
use super::chem_errors::ChemError;
use std::collections::HashSet;

/// symbol of the electron token inside a formula
pub const ELECTRON: &str = "e";

/// One element of a formula together with its coefficient and the charge attached to it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementToken {
    pub symbol: String,
    pub coefficient: u32,
    pub charge: i32,
}

impl ElementToken {
    pub fn is_electron(&self) -> bool {
        self.symbol == ELECTRON
    }
}

fn count_digits(text: &str) -> usize {
    text.bytes().take_while(|b| b.is_ascii_digit()).count()
}

/// Reads an optional charge annotation at the start of `text`.
///
/// Returns the charge and the unconsumed rest of the text. Without a leading sign the charge is zero and
/// nothing is consumed.
pub fn read_charge(text: &str) -> Result<(i32, &str), ChemError> {
    let sign = match text.as_bytes().first() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Ok((0, text)),
    };
    let rest = &text[1..];
    let n_digits = count_digits(rest);
    if n_digits == 0 {
        return Ok((sign, rest));
    }
    let magnitude: i32 = rest[..n_digits].parse().map_err(|_| {
        ChemError::syntax(text, format!("charge '{}' is out of range", &rest[..n_digits]))
    })?;
    Ok((sign * magnitude, &rest[n_digits..]))
}

/// Reads exactly one element token from the start of `formula`.
///
/// On success returns the token and the remainder of the formula. On failure the error carries the
/// original `formula` as the unconsumed input.
pub fn read_element(formula: &str) -> Result<(ElementToken, &str), ChemError> {
    let text = formula.trim_start();
    let bytes = text.as_bytes();
    let symbol_end = match bytes.first() {
        Some(b) if b.is_ascii_uppercase() => {
            1 + bytes[1..]
                .iter()
                .take_while(|b| b.is_ascii_lowercase())
                .count()
        }
        Some(b'e') if !bytes.get(1).is_some_and(|b| b.is_ascii_lowercase()) => 1,
        Some(_) => {
            return Err(ChemError::syntax(
                formula,
                "an element symbol must start with an uppercase letter",
            ));
        }
        None => return Err(ChemError::syntax(formula, "no element symbol found")),
    };
    let symbol = &text[..symbol_end];
    let rest = &text[symbol_end..];

    let n_digits = count_digits(rest);
    let coefficient: u32 = if n_digits == 0 {
        1
    } else {
        rest[..n_digits].parse().map_err(|_| {
            ChemError::syntax(
                formula,
                format!("coefficient '{}' is out of range", &rest[..n_digits]),
            )
        })?
    };
    if coefficient == 0 {
        return Err(ChemError::syntax(
            formula,
            format!("coefficient of '{}' is zero", symbol),
        ));
    }

    let charge_text = &rest[n_digits..];
    let (mut charge, remainder) = match read_charge(charge_text) {
        Ok(parsed) => parsed,
        Err(ChemError::ElementSyntax { reason, .. }) => {
            return Err(ChemError::syntax(formula, reason));
        }
        Err(other) => return Err(other),
    };

    if symbol == ELECTRON {
        let electron_charge = -i32::try_from(coefficient).map_err(|_| {
            ChemError::syntax(formula, format!("too many electrons: {}", coefficient))
        })?;
        // a suffix is either a bare sign or the full charge of the electrons
        let has_suffix = remainder.len() < charge_text.len();
        if charge > 0 {
            return Err(ChemError::syntax(
                formula,
                "an electron cannot carry a positive charge",
            ));
        }
        if has_suffix && charge != -1 && charge != electron_charge {
            return Err(ChemError::syntax(
                formula,
                format!(
                    "charge {} does not match {} electron(s)",
                    charge, coefficient
                ),
            ));
        }
        charge = electron_charge;
    }

    let token = ElementToken {
        symbol: symbol.to_string(),
        coefficient,
        charge,
    };
    Ok((token, remainder))
}

/// Cursor over the element tokens of one formula.
///
/// Yields tokens until only whitespace is left. After the first error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    remainder: &'a str,
    failed: bool,
}

impl<'a> Tokens<'a> {
    /// unconsumed part of the formula
    pub fn remainder(&self) -> &'a str {
        self.remainder
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<ElementToken, ChemError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remainder.trim_start().is_empty() {
            return None;
        }
        match read_element(self.remainder) {
            Ok((token, remainder)) => {
                self.remainder = remainder;
                Some(Ok(token))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Iterates over the element tokens of `formula`
pub fn tokens(formula: &str) -> Tokens<'_> {
    Tokens {
        remainder: formula,
        failed: false,
    }
}

/// Number of entries in the element composition of `formula`: every distinct element plus one entry for
/// electrons if the net charge is not zero.
pub fn count_elements(formula: &str) -> Result<usize, ChemError> {
    let mut symbols = HashSet::new();
    let mut net_charge: i64 = 0;
    for token in tokens(formula) {
        let token = token?;
        net_charge += i64::from(token.charge);
        if !token.is_electron() {
            symbols.insert(token.symbol);
        }
    }
    Ok(symbols.len() + usize::from(net_charge != 0))
}

/// Net charge of `formula`, or the error of the first token that could not be read
pub fn try_charge(formula: &str) -> Result<i64, ChemError> {
    let mut net_charge: i64 = 0;
    for token in tokens(formula) {
        net_charge += i64::from(token?.charge);
    }
    Ok(net_charge)
}

/// Net charge of `formula`.
///
/// Legacy convenience entry: a malformed formula gives 0, so a neutral species cannot be told apart from
/// an invalid one. Prefer [`try_charge`].
pub fn charge(formula: &str) -> i64 {
    try_charge(formula).unwrap_or(0)
}

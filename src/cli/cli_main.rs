use crate::Chemistry::chem_errors::ChemError;
use crate::Chemistry::formula_parser::{count_elements, tokens, try_charge};
use crate::Chemistry::molmass::calculate_molar_mass;
use crate::Chemistry::species::{DuplicatePolicy, read_species_with};
use crate::Chemistry::stoichiometry::{BalancedReaction, balance_reaction};
use crate::settings::{BalancerConfig, ConfigManager};
use std::io::{self, Write};

pub fn run_interactive_menu(manager: &mut ConfigManager) -> io::Result<()> {
    loop {
        show_main_menu()?;
        let Some(choice) = get_user_input()? else {
            break;
        };

        match choice.trim() {
            "1" => formula_menu(manager.get_config())?,
            "2" => balance_menu(manager.get_config())?,
            "3" => molar_mass_menu()?,
            "4" => settings_menu(manager)?,
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Red (\x1b[31m) - errors

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() -> io::Result<()> {
    println!(
        "\x1b[34m\n Welcome to FCSysChem: chemical formulas and reaction balancing\n
    for fuel-cell system models \n \x1b[0m"
    );
    println!("\x1b[33m1. Parse a formula\x1b[0m");
    println!("\x1b[33m2. Balance a reaction\x1b[0m");
    println!("\x1b[33m3. Molar mass\x1b[0m");
    println!("\x1b[33m4. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush()
}

/// one line from stdin, `None` at the end of input
fn get_user_input() -> io::Result<Option<String>> {
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input))
}

fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("\x1b[36m{}\x1b[0m", text);
    io::stdout().flush()?;
    get_user_input()
}

fn print_error(err: &dyn std::fmt::Display) {
    println!("\x1b[31m{}\x1b[0m", err);
}

/// Tokens, element composition, number of entries and net charge of a formula
pub fn formula_report(formula: &str, policy: DuplicatePolicy) -> Result<String, ChemError> {
    let mut report = format!("Formula: {}\n", formula);
    for token in tokens(formula) {
        let token = token?;
        report.push_str(&format!(
            "  element {:<3} coefficient {:<4} charge {:+}\n",
            token.symbol, token.coefficient, token.charge
        ));
    }
    let species = read_species_with(formula, policy)?;
    let mut composition: Vec<(&String, &i64)> = species.iter().collect();
    composition.sort();
    let composition: Vec<String> = composition
        .iter()
        .map(|(symbol, n)| format!("{}:{}", symbol, n))
        .collect();
    report.push_str(&format!("Composition: {{{}}}\n", composition.join(", ")));
    report.push_str(&format!("Entries: {}\n", count_elements(formula)?));
    report.push_str(&format!("Net charge: {}\n", try_charge(formula)?));
    Ok(report)
}

/// Species of a reaction typed on one line, separated by spaces or commas
pub fn parse_species_line(line: &str) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn balance_line(line: &str, config: &BalancerConfig) -> Result<BalancedReaction, ChemError> {
    balance_reaction(parse_species_line(line).as_slice(), config)
}

fn formula_menu(config: &BalancerConfig) -> io::Result<()> {
    let Some(formula) = prompt("Enter a formula (e.g. C19HF37O5S-): ")? else {
        return Ok(());
    };
    match formula_report(formula.trim(), config.duplicate_policy) {
        Ok(report) => println!("{}", report),
        Err(err) => print_error(&err),
    }
    Ok(())
}

fn balance_menu(config: &BalancerConfig) -> io::Result<()> {
    let Some(line) = prompt("Enter the species of the reaction (e.g. e- H+ O2 H2O): ")? else {
        return Ok(());
    };
    match balance_line(&line, config) {
        Ok(reaction) => reaction.pretty_print(),
        Err(err) => print_error(&err),
    }
    Ok(())
}

fn molar_mass_menu() -> io::Result<()> {
    let Some(formula) = prompt("Enter a formula: ")? else {
        return Ok(());
    };
    match calculate_molar_mass(formula.trim()) {
        Ok((molar_mass, _)) => println!("Molar mass of {}: {:.5} g/mol", formula.trim(), molar_mass),
        Err(err) => print_error(&err),
    }
    Ok(())
}

fn settings_menu(manager: &mut ConfigManager) -> io::Result<()> {
    println!(
        "Settings from '{}':",
        manager.config_file().display()
    );
    match serde_json::to_string_pretty(manager.get_config()) {
        Ok(json) => println!("{}", json),
        Err(err) => print_error(&err),
    }
    let Some(name) = prompt("Setting to change (empty to return, 'reset' for defaults): ")? else {
        return Ok(());
    };
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }
    if name == "reset" {
        match manager.reset_to_defaults() {
            Ok(()) => println!("Defaults restored"),
            Err(err) => print_error(&err),
        }
        return Ok(());
    }
    let Some(value) = prompt("New value: ")? else {
        return Ok(());
    };
    match manager.set_value(name, &value) {
        Ok(()) => println!("Saved"),
        Err(err) => print_error(&err),
    }
    Ok(())
}

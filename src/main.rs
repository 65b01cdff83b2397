use FCSysChem::Chemistry::stoichiometry::balance_reaction;
use FCSysChem::cli::cli_main::run_interactive_menu;
use FCSysChem::settings::ConfigManager;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// `fcsys-chem e- H+ O2 H2O` balances the given species, without arguments the interactive menu starts
pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ConfigManager::new();
    TermLogger::init(
        manager.get_config().log_level_filter(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let species: Vec<String> = std::env::args().skip(1).collect();
    if species.is_empty() {
        run_interactive_menu(&mut manager)?;
    } else {
        let reaction = balance_reaction(species.as_slice(), manager.get_config())?;
        reaction.pretty_print();
    }
    Ok(())
}

/// interactive text menu and helpers of the command-line tool
pub mod cli_main;

#[allow(non_snake_case)]
pub mod Chemistry;
pub mod cli;
pub mod settings;

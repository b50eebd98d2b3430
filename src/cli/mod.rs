pub mod commands;
pub mod core;
mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod views;

pub use shell::{run_cli, SCRIPT_ENV};

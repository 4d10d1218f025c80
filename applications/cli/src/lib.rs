//! Cadence CLI
//!
//! Opens the session database, starts the engine, runs one subcommand and
//! waits for the resulting writes before exiting.

pub mod commands;
pub mod config;
pub mod scanner;

pub use commands::{execute, Command};
pub use config::AppConfig;
pub use scanner::DirectoryScanner;

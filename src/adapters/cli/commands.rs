//! CLI Command Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DevSniper - watches dev wallet sells and fires buy orders
#[derive(Parser, Debug)]
#[command(
    name = "devsniper",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Dev-wallet sell sniper core",
    long_about = "DevSniper evaluates dev-wallet sell signals against a user-configured \
                  threshold and drives buy orders through a connected wallet bridge, \
                  tracking every order to a terminal state."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the sniper service over the host message port (stdin/stdout)
    Run(RunCmd),

    /// Print the current persisted settings
    Settings(SettingsCmd),
}

/// Run the sniper service
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Show persisted settings
#[derive(Parser, Debug)]
pub struct SettingsCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_config() {
        let app = CliApp::try_parse_from(["devsniper", "run", "--config", "custom.toml"]).unwrap();
        match app.command {
            Command::Run(cmd) => assert_eq!(cmd.config, PathBuf::from("custom.toml")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let app = CliApp::try_parse_from(["devsniper", "run", "--verbose", "--debug"]).unwrap();
        assert!(app.verbose);
        assert!(app.debug);
    }
}

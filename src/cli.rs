// CLI module - command-line argument parsing and handlers
//
// Flags on the main invocation override config (--api-url, --demo).
// The config subcommand manages the config file:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};

/// Terminal explorer for batted-ball data
#[derive(Parser)]
#[command(name = "dugout")]
#[command(version = VERSION)]
#[command(about = "Terminal explorer for batted-ball data", long_about = None)]
pub struct Cli {
    /// Override the backend base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Explore a built-in mock dataset without a backend
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Handle a subcommand if one was given. Returns true if handled (exit after).
pub fn handle_command(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, path, reset }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show();
            } else if *reset {
                handle_config_reset();
            } else {
                // No flag provided, show usage
                println!("Usage: dugout config [--show|--path|--reset]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --reset   Reset config file to defaults");
            }
            true
        }
        None => false,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("Could not determine config path"),
    }
}

fn handle_config_show() {
    let config = Config::from_env();
    println!("# Effective configuration (file + environment)");
    println!();
    print!("{}", config.to_toml());
}

fn handle_config_reset() {
    let config = Config::default();
    match config.save() {
        Ok(()) => {
            if let Some(path) = Config::config_path() {
                println!("Config reset to defaults: {}", path.display());
            }
        }
        Err(e) => eprintln!("Failed to reset config: {e}"),
    }
}

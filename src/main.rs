//! Entry point for **hyprland-helper**.
//!
//! Parses the command line, loads the optional config file, runs one
//! action and maps its outcome to an exit code.

use clap::Parser;
use hyprland_helper::actions::ErrorKind;
use hyprland_helper::cli::Cli;
use hyprland_helper::config::Config;
use log::{info, warn};
use std::path::Path;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

/// Load the config from `explicit` or the default location, falling back
/// to compiled-in defaults.
fn load_config(explicit: Option<&Path>) -> Config {
    let path = match explicit.map(Path::to_path_buf).or_else(Config::default_path) {
        Some(path) => path,
        None => return Config::default(),
    };
    if explicit.is_none() && !path.exists() {
        return Config::default();
    }
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    if let Err(e) = cli.execute(config) {
        if e.kind() == ErrorKind::StaleReference {
            info!("{}", e);
        } else {
            eprintln!("hyprland-helper: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

//! drupal-jekyll CLI
//!
//! Imports posts from a Drupal 7 database into a Jekyll site, placing each
//! one under the directory its menu position implies.

mod cli_types;
mod commands;
mod config;
mod error;
mod logging;
mod progress;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let config_file = cli.config.as_deref();
    let result = match cli.command {
        Commands::Import {
            conn,
            output,
            dry_run,
        } => commands::import::run_import_command(conn, config_file, output, dry_run, cli.quiet),
        Commands::Menu { conn } => commands::menu::run_menu(conn, config_file),
        Commands::Config { action } => match action {
            ConfigAction::Show { conn } => commands::config::run_config_show(conn, config_file),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

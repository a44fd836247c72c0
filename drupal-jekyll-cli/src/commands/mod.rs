pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod menu;

use drupal_jekyll_db::DrupalSource;

use crate::CliError;
use crate::config::ImportConfig;

/// Connect to the configured Drupal database.
pub(crate) fn open_source(config: &ImportConfig) -> Result<DrupalSource, CliError> {
    log::debug!(
        "Connecting to {} database '{}' on {} as '{}' (password {})",
        config.driver,
        config.dbname,
        config.host,
        config.user,
        if config.password.is_empty() { "empty" } else { "set" },
    );
    DrupalSource::open(&config.connect_params(), config.query_options()).map_err(|e| {
        CliError::database(format!("Failed to open Drupal database {}: {}", config.dbname, e))
    })
}

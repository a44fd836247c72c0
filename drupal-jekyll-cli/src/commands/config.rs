use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::ConnectionArgs;
use crate::config::{Setting, Settings, ValueSource, config_path, load_config_file, mask_value};

/// Show effective settings and their sources.
pub(crate) fn run_config_show(conn: ConnectionArgs, config_file: Option<&Path>) -> Result<(), CliError> {
    log::info!(
        "{}",
        "Import Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let path = config_file.map(Path::to_path_buf).or_else(config_path);
    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let file = load_config_file(config_file)?;
    let settings = Settings::resolve(&conn, &file, |k| std::env::var(k).ok());

    let types = Setting {
        value: settings.types.value.as_ref().map(|t| t.join(",")),
        source: settings.types.source.clone(),
    };
    let password = Setting {
        value: settings.password.value.as_deref().map(mask_value),
        source: settings.password.source.clone(),
    };
    let fields: [(&str, &Setting<String>); 7] = [
        ("driver", &settings.driver),
        ("dbname", &settings.dbname),
        ("user", &settings.user),
        ("password", &password),
        ("host", &settings.host),
        ("prefix", &settings.prefix),
        ("types", &types),
    ];

    for (name, setting) in fields {
        let source_str = format!("({})", setting.source);
        match (&setting.value, &setting.source) {
            (_, ValueSource::Missing) | (None, _) => {
                log::info!(
                    "  {:<10} {} {}",
                    name,
                    "-".if_supports_color(Stdout, |t| t.red()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            (Some(value), _) => {
                log::info!(
                    "  {:<10} {} {}",
                    name,
                    value,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    if let Err(e) = settings.into_config() {
        log::info!("");
        log::warn!("{}", e);
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match config_path() {
        Some(p) => {
            println!("{}", p.display());
            Ok(())
        }
        None => Err(CliError::Io(std::io::Error::other(
            "could not determine config directory",
        ))),
    }
}

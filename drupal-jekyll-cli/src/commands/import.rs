use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use drupal_jekyll_import::{FsSink, ImportError, ImportReport, MemorySink, run_import};

use super::open_source;
use crate::CliError;
use crate::cli_types::ConnectionArgs;
use crate::config::ImportConfig;
use crate::progress::BarProgress;

/// Import Drupal content into a Jekyll source tree.
pub(crate) fn run_import_command(
    conn: ConnectionArgs,
    config_file: Option<&Path>,
    output: Option<PathBuf>,
    dry_run: bool,
    quiet: bool,
) -> Result<(), CliError> {
    // Settings are validated before the database is touched
    let config = ImportConfig::load(&conn, config_file)?;
    let source = open_source(&config)?;
    let progress = BarProgress::new(quiet);

    let output = match output {
        Some(p) => p,
        None => std::env::current_dir()?,
    };

    log::info!(
        "Importing {} from {} ({}){}",
        config.types.join(", ").if_supports_color(Stdout, |t| t.bold()),
        config.dbname.if_supports_color(Stdout, |t| t.cyan()),
        source.driver(),
        if dry_run { " (dry run)" } else { "" },
    );

    let report = if dry_run {
        let mut sink = MemorySink::new();
        let report = run_import(&source, &mut sink, Some(&progress)).map_err(import_error)?;
        log::info!("");
        log::info!("Would write:");
        for (path, contents) in sink.files() {
            log::info!(
                "  {} {}",
                output.join(path).display(),
                format!("({} bytes)", contents.len()).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        report
    } else {
        let mut sink = FsSink::new(&output);
        run_import(&source, &mut sink, Some(&progress)).map_err(import_error)?
    };

    print_summary(&report, &output, dry_run);
    Ok(())
}

fn import_error(e: ImportError) -> CliError {
    CliError::import(e.to_string())
}

fn print_summary(report: &ImportReport, output: &Path, dry_run: bool) {
    let stats = &report.stats;
    log::info!("");
    log::info!(
        "{} {}",
        if dry_run { "Planned import into" } else { "Imported into" }
            .if_supports_color(Stdout, |t| t.bold()),
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Menu links: {}", stats.menu_links);
    log::info!("  Records:    {}", stats.records);
    log::info!(
        "  Posts:      {}",
        stats.posts.if_supports_color(Stdout, |t| t.green())
    );
    log::info!(
        "  Drafts:     {}",
        stats.drafts.if_supports_color(Stdout, |t| t.green())
    );

    if report.is_clean() {
        return;
    }

    log::warn!(
        "{} record(s) skipped:",
        stats.failed.if_supports_color(Stdout, |t| t.yellow())
    );
    for failure in &report.failures {
        log::warn!(
            "  nid {} (mlid {}) {:?}: {}",
            failure.nid,
            failure.mlid,
            failure.title,
            failure.error
        );
    }
}

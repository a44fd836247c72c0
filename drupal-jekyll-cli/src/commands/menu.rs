use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use drupal_jekyll_core::MenuError;
use drupal_jekyll_import::build_menu_index;

use super::open_source;
use crate::CliError;
use crate::cli_types::ConnectionArgs;
use crate::config::ImportConfig;

/// Run pass 1 only and print every link with the directory it maps to.
pub(crate) fn run_menu(conn: ConnectionArgs, config_file: Option<&Path>) -> Result<(), CliError> {
    let config = ImportConfig::load(&conn, config_file)?;
    let source = open_source(&config)?;
    let index = build_menu_index(&source).map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} ({} links)",
        "Menu index".if_supports_color(Stdout, |t| t.bold()),
        index.len(),
    );
    log::info!("");

    let mut unresolved = Unresolved::default();
    for link in index.iter() {
        match index.resolve_path(link.mlid) {
            Ok(path) => {
                log::info!(
                    "  {:>6} {:>6}  {}/{}",
                    link.mlid,
                    link.plid,
                    path.if_supports_color(Stdout, |t| t.dimmed()),
                    link.slug.if_supports_color(Stdout, |t| t.cyan()),
                );
            }
            Err(e) => {
                unresolved.record(&e);
                log::warn!("  {:>6} {:>6}  {}", link.mlid, link.plid, e);
            }
        }
    }

    if unresolved.total() > 0 {
        log::info!("");
        log::warn!(
            "{} dangling and {} over-deep link(s); content under them will be skipped",
            unresolved.dangling,
            unresolved.too_deep
        );
    }
    Ok(())
}

/// Links whose path could not be resolved, by cause.
#[derive(Debug, Default, PartialEq, Eq)]
struct Unresolved {
    dangling: usize,
    too_deep: usize,
}

impl Unresolved {
    fn record(&mut self, error: &MenuError) {
        if error.is_dangling() {
            self.dangling += 1;
        } else {
            self.too_deep += 1;
        }
    }

    fn total(&self) -> usize {
        self.dangling + self.too_deep
    }
}

#[cfg(test)]
mod tests {
    use drupal_jekyll_core::{MenuIndex, MenuRow};

    use super::*;

    fn row(mlid: i64, plid: i64) -> MenuRow {
        MenuRow {
            title: format!("Link {}", mlid),
            nid: mlid * 10,
            mlid,
            plid,
        }
    }

    #[test]
    fn unresolved_links_are_split_by_cause() {
        // 2 points at a missing parent; 3 and 4 form a cycle
        let index: MenuIndex = [row(1, 0), row(2, 99), row(3, 4), row(4, 3)]
            .into_iter()
            .collect();

        let mut unresolved = Unresolved::default();
        for link in index.iter() {
            if let Err(e) = index.resolve_path(link.mlid) {
                unresolved.record(&e);
            }
        }
        assert_eq!(
            unresolved,
            Unresolved {
                dangling: 1,
                too_deep: 2
            }
        );
        assert_eq!(unresolved.total(), 3);
    }
}

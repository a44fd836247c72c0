//! The two-pass import.
//!
//! Pass 1 drains every menu row into a [`MenuIndex`]. Only once that index
//! is complete does pass 2 read content rows, since any record may sit
//! under any menu link. Per-record problems (dangling menu links, cyclic
//! chains, unusable titles) are collected into the report; a failed write
//! stops the run.

use std::io;
use std::path::{Path, PathBuf};

use drupal_jekyll_core::{MenuIndex, RowSource};
use thiserror::Error;

use crate::importer::{DRAFTS_DIR, LAYOUTS_DIR, POSTS_DIR, Publication, RecordError, RecordImporter};
use crate::progress::ImportProgress;
use crate::sink::FileSink;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {stage} rows: {source}")]
    Source {
        stage: &'static str,
        source: BoxError,
    },
    #[error("I/O error writing {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// Counters from a single import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub menu_links: u64,
    pub records: u64,
    pub posts: u64,
    pub drafts: u64,
    pub failed: u64,
}

/// A record that was skipped, and why.
#[derive(Debug)]
pub struct RecordFailure {
    pub nid: i64,
    pub mlid: i64,
    pub title: String,
    pub error: RecordError,
}

/// Outcome of [`run_import`].
#[derive(Debug, Default)]
pub struct ImportReport {
    pub stats: ImportStats,
    /// Written files, in write order
    pub written: Vec<PathBuf>,
    pub failures: Vec<RecordFailure>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pass 1: read every menu row and build the index.
pub fn build_menu_index<R: RowSource>(source: &R) -> Result<MenuIndex, ImportError> {
    let rows = source.menu_rows().map_err(|e| ImportError::Source {
        stage: "menu",
        source: Box::new(e),
    })?;
    Ok(MenuIndex::build(rows))
}

/// Run both passes, writing into `sink`.
///
/// The optional `progress` callback is invoked once per content record.
pub fn run_import<R, S>(
    source: &R,
    sink: &mut S,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError>
where
    R: RowSource,
    S: FileSink,
{
    let mut report = ImportReport::default();

    for dir in [POSTS_DIR, DRAFTS_DIR, LAYOUTS_DIR] {
        sink.ensure_dir(Path::new(dir))
            .map_err(|source| ImportError::Write {
                path: dir.to_string(),
                source,
            })?;
    }

    if let Some(p) = progress {
        p.on_phase("Reading menu links");
    }
    let index = build_menu_index(source)?;
    report.stats.menu_links = index.len() as u64;
    log::debug!("Menu index holds {} links", index.len());

    if let Some(p) = progress {
        p.on_phase("Writing content records");
    }
    let records = source.content_rows().map_err(|e| ImportError::Source {
        stage: "content",
        source: Box::new(e),
    })?;
    let total = records.len();
    report.stats.records = total as u64;

    let mut importer = RecordImporter::new(&index, sink);
    for (i, record) in records.into_iter().enumerate() {
        match importer.import(&record) {
            Ok(target) => {
                match target.publication {
                    Publication::Post => report.stats.posts += 1,
                    Publication::Draft => report.stats.drafts += 1,
                }
                report.written.push(target.file);
            }
            Err(RecordError::Write { path, source }) => {
                return Err(ImportError::Write { path, source });
            }
            Err(error) => {
                log::warn!("Skipping nid {} ({}): {}", record.nid, record.title, error);
                report.stats.failed += 1;
                report.failures.push(RecordFailure {
                    nid: record.nid,
                    mlid: record.mlid,
                    title: record.title.clone(),
                    error,
                });
            }
        }

        if let Some(p) = progress {
            p.on_record(i + 1, total, &record.title);
        }
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Wrote {} posts and {} drafts ({} skipped)",
            report.stats.posts, report.stats.drafts, report.stats.failed
        ));
    }

    Ok(report)
}

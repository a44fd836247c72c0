//! Pass 2: one content record in, one file out.

use std::io;
use std::path::PathBuf;

use drupal_jekyll_core::{ContentRecord, MenuError, MenuIndex, slugify};
use thiserror::Error;

use crate::document::{DocumentError, OutputDocument};
use crate::sink::FileSink;

/// Published records go here.
pub const POSTS_DIR: &str = "_posts";
/// Unpublished records go here.
pub const DRAFTS_DIR: &str = "_drafts";
/// Created empty so the tree is a valid Jekyll site skeleton.
pub const LAYOUTS_DIR: &str = "_layouts";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error("Title {title:?} does not produce a usable file name")]
    EmptySlug { title: String },
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("I/O error writing {path}: {source}")]
    Write { path: String, source: io::Error },
}

impl RecordError {
    /// Write failures abort the whole import; everything else only skips the record.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

/// Whether a record lands in `_posts` or `_drafts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publication {
    Post,
    Draft,
}

impl Publication {
    pub fn of(record: &ContentRecord) -> Self {
        if record.published {
            Self::Post
        } else {
            Self::Draft
        }
    }

    pub fn base_dir(self) -> &'static str {
        match self {
            Self::Post => POSTS_DIR,
            Self::Draft => DRAFTS_DIR,
        }
    }
}

/// Resolved output location of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub publication: Publication,
    pub dir: PathBuf,
    pub file: PathBuf,
}

/// Work out where a record will be written: `<base>/<menu path>/<slug>.md`.
pub fn target_for(record: &ContentRecord, index: &MenuIndex) -> Result<ImportTarget, RecordError> {
    let slug = slugify(&record.title);
    if slug.is_empty() {
        return Err(RecordError::EmptySlug {
            title: record.title.clone(),
        });
    }

    let publication = Publication::of(record);
    let menu_path = index.resolve_path(record.mlid)?;

    let mut dir = PathBuf::from(publication.base_dir());
    dir.extend(menu_path.split('/').filter(|segment| !segment.is_empty()));
    let file = dir.join(format!("{slug}.md"));

    Ok(ImportTarget {
        publication,
        dir,
        file,
    })
}

/// Writes records into a sink using a finished menu index.
pub struct RecordImporter<'a, S: FileSink> {
    index: &'a MenuIndex,
    sink: &'a mut S,
}

impl<'a, S: FileSink> RecordImporter<'a, S> {
    pub fn new(index: &'a MenuIndex, sink: &'a mut S) -> Self {
        Self { index, sink }
    }

    /// Import one record, overwriting any file already at its target.
    pub fn import(&mut self, record: &ContentRecord) -> Result<ImportTarget, RecordError> {
        let target = target_for(record, self.index)?;
        let text = OutputDocument::from_record(record).render()?;

        self.sink
            .ensure_dir(&target.dir)
            .map_err(|source| RecordError::Write {
                path: target.dir.display().to_string(),
                source,
            })?;
        self.sink
            .write_file(&target.file, &text)
            .map_err(|source| RecordError::Write {
                path: target.file.display().to_string(),
                source,
            })?;

        log::debug!("nid {} -> {}", record.nid, target.file.display());
        Ok(target)
    }
}

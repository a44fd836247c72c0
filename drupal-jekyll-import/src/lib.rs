//! Turn Drupal content rows into a Jekyll source tree.
//!
//! This crate owns the two-pass import: pass 1 builds the menu index,
//! pass 2 assembles one front-matter document per content record and hands
//! it to a [`FileSink`] at the path its menu position dictates.

pub mod document;
pub mod importer;
pub mod pipeline;
pub mod progress;
pub mod sink;

pub use document::{DocumentError, FrontMatter, MetaValue, OutputDocument};
pub use importer::{
    DRAFTS_DIR, ImportTarget, LAYOUTS_DIR, POSTS_DIR, Publication, RecordError, RecordImporter,
    target_for,
};
pub use pipeline::{ImportError, ImportReport, ImportStats, RecordFailure, build_menu_index, run_import};
pub use progress::ImportProgress;
pub use sink::{FileSink, FsSink, MemorySink};

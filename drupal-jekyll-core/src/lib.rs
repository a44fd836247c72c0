//! Core types for migrating Drupal content into a Jekyll source tree.
//!
//! Holds the pieces with no I/O: slug generation, the menu index built
//! from `menu_links` rows, per-record path resolution, and the row types
//! and [`RowSource`] trait that feed them.

pub mod error;
pub mod menu;
pub mod record;
pub mod slug;
pub mod source;

pub use error::MenuError;
pub use menu::{MAX_MENU_DEPTH, MenuIndex, MenuLink, MenuRow};
pub use record::ContentRecord;
pub use slug::slugify;
pub use source::{MemorySource, RowSource};

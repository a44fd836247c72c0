//! Row source abstraction.
//!
//! The pipeline only needs two ordered row sets: the menu rows for pass 1
//! and the content rows for pass 2. Anything that can produce them (a
//! database, a fixture) implements [`RowSource`].

use std::convert::Infallible;

use crate::menu::MenuRow;
use crate::record::ContentRecord;

/// A provider of menu and content rows, in source order.
pub trait RowSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Rows feeding the menu index.
    fn menu_rows(&self) -> Result<Vec<MenuRow>, Self::Error>;

    /// Rows to be written out as documents.
    fn content_rows(&self) -> Result<Vec<ContentRecord>, Self::Error>;
}

/// Row source backed by plain vectors.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub menu: Vec<MenuRow>,
    pub content: Vec<ContentRecord>,
}

impl MemorySource {
    pub fn new(menu: Vec<MenuRow>, content: Vec<ContentRecord>) -> Self {
        Self { menu, content }
    }
}

impl RowSource for MemorySource {
    type Error = Infallible;

    fn menu_rows(&self) -> Result<Vec<MenuRow>, Self::Error> {
        Ok(self.menu.clone())
    }

    fn content_rows(&self) -> Result<Vec<ContentRecord>, Self::Error> {
        Ok(self.content.clone())
    }
}

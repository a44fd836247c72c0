//! Menu hierarchy index and path resolution.
//!
//! Drupal stores its navigation as a flat adjacency list: every
//! `menu_links` row carries its own `mlid` and its parent's `plid`
//! (`0` for top-level entries). Pass 1 of an import loads those rows into a
//! [`MenuIndex`]; pass 2 asks the index for the directory path of each
//! content record by walking parent pointers upward. No tree is ever
//! materialized.

use std::collections::BTreeMap;

use crate::error::MenuError;
use crate::slug::slugify;

/// Upper bound on parent hops when resolving a path.
///
/// Drupal 7 itself caps menus at 9 levels, so anything deeper than this is
/// corrupt (most likely a cycle) rather than real structure.
pub const MAX_MENU_DEPTH: usize = 64;

/// One row of the menu query: a node and the menu link that points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub title: String,
    pub nid: i64,
    pub mlid: i64,
    pub plid: i64,
}

/// A menu link as held by the index. The slug is derived once on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub mlid: i64,
    pub plid: i64,
    pub nid: i64,
    pub slug: String,
}

impl MenuLink {
    pub fn is_root(&self) -> bool {
        self.plid == 0
    }
}

impl From<MenuRow> for MenuLink {
    fn from(row: MenuRow) -> Self {
        Self {
            slug: slugify(&row.title),
            mlid: row.mlid,
            plid: row.plid,
            nid: row.nid,
        }
    }
}

/// Mapping from `mlid` to its parent link and slug.
///
/// Built once in pass 1, then only read.
#[derive(Debug, Clone, Default)]
pub struct MenuIndex {
    links: BTreeMap<i64, MenuLink>,
}

impl MenuIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from menu rows, consuming them in order.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = MenuRow>,
    {
        let mut index = Self::new();
        for row in rows {
            index.insert(row);
        }
        index
    }

    /// Insert a row. A row whose `mlid` is already present replaces the
    /// earlier entry; the replaced link is returned.
    pub fn insert(&mut self, row: MenuRow) -> Option<MenuLink> {
        let link = MenuLink::from(row);
        let mlid = link.mlid;
        let previous = self.links.insert(mlid, link);
        if let Some(ref prev) = previous {
            log::debug!(
                "menu link {} seen again; plid {} replaced by {}",
                mlid,
                prev.plid,
                self.links[&mlid].plid
            );
        }
        previous
    }

    pub fn get(&self, mlid: i64) -> Option<&MenuLink> {
        self.links.get(&mlid)
    }

    pub fn contains(&self, mlid: i64) -> bool {
        self.links.contains_key(&mlid)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterate links in ascending `mlid` order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuLink> {
        self.links.values()
    }

    /// Resolve the directory path for a menu link.
    ///
    /// The result is `/`-prefixed and lists the slugs of every ancestor from
    /// the top-level link down to the immediate parent. The link's own slug
    /// is not part of it, and a top-level link resolves to `""`.
    pub fn resolve_path(&self, mlid: i64) -> Result<String, MenuError> {
        self.resolve_path_with_limit(mlid, MAX_MENU_DEPTH)
    }

    /// Like [`resolve_path`](Self::resolve_path) with an explicit hop limit.
    pub fn resolve_path_with_limit(&self, mlid: i64, limit: usize) -> Result<String, MenuError> {
        let ancestors = self.ancestors(mlid, limit)?;

        let mut path = String::new();
        for link in ancestors.iter().rev() {
            path.push('/');
            path.push_str(&link.slug);
        }
        Ok(path)
    }

    /// Ancestors of `mlid`, nearest parent first.
    fn ancestors(&self, mlid: i64, limit: usize) -> Result<Vec<&MenuLink>, MenuError> {
        let mut current = self
            .links
            .get(&mlid)
            .ok_or(MenuError::DanglingLink { mlid })?;

        let mut chain = Vec::new();
        while !current.is_root() {
            if chain.len() >= limit {
                return Err(MenuError::DepthExceeded { mlid, limit });
            }
            let parent = self
                .links
                .get(&current.plid)
                .ok_or(MenuError::DanglingParent {
                    child: current.mlid,
                    plid: current.plid,
                })?;
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }
}

impl FromIterator<MenuRow> for MenuIndex {
    fn from_iter<I: IntoIterator<Item = MenuRow>>(iter: I) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;

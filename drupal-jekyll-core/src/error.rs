use thiserror::Error;

/// Errors raised while walking the menu index.
///
/// These are per-record failures: the importer reports them and moves on
/// to the next content row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// The record's own menu link is not in the index
    #[error("dangling menu reference: mlid {mlid} is not in the menu index")]
    DanglingLink { mlid: i64 },

    /// A link in the chain points at a parent that is not in the index
    #[error("dangling menu reference: mlid {child} points at missing parent {plid}")]
    DanglingParent { child: i64, plid: i64 },

    /// The parent chain did not reach a root within the depth limit
    #[error("menu chain from mlid {mlid} exceeds {limit} levels (cyclic menu data?)")]
    DepthExceeded { mlid: i64, limit: usize },
}

impl MenuError {
    /// True for either kind of missing-link failure.
    pub fn is_dangling(&self) -> bool {
        matches!(self, Self::DanglingLink { .. } | Self::DanglingParent { .. })
    }
}

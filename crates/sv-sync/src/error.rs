use sv_store::StoreError;
use thiserror::Error;

/// Errors that end a sync cycle without a result.
///
/// Transport failures are not here: they are reported as
/// [`CycleOutcome::Failed`][crate::CycleOutcome::Failed] and retried.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("merge failed: {0}")]
    Store(#[from] StoreError),
}

impl SyncError {
    /// `true` if retrying cannot help and the operator must intervene.
    pub fn is_fatal(&self) -> bool {
        match self {
            SyncError::Store(e) => e.is_integrity(),
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

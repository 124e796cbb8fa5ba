use thiserror::Error;

/// Engine errors. Only the snapshot boundary can fail; the expansion
/// computation itself skips malformed records instead of erroring, so one bad
/// record cannot blank the whole calendar.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    CoreError(#[from] tribune_core::error::CoreError),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

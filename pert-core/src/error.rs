use thiserror::Error;

/// Reasons an imported snapshot is turned away before it reaches the store.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Error reading or parsing the snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid snapshot format: missing `{0}`")]
    MissingField(&'static str),

    #[error("Invalid snapshot format: `{0}` must be an array")]
    NotAnArray(&'static str),
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store lock poisoned by a panicked writer: {0}")]
    Poisoned(String),
    #[error("invalid scan bounds: min '{min}' sorts after max '{max}'")]
    InvalidScanBounds { min: String, max: String },
    #[error("failure reading store snapshot '{path}': {source}")]
    SnapshotRead {
        path: String,
        source: std::io::Error,
    },
    #[error("failure writing store snapshot '{path}': {source}")]
    SnapshotWrite {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed store snapshot '{path}': {message}")]
    MalformedSnapshot { path: String, message: String },
}

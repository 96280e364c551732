use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("VpkCore error: {0}")]
    Core(#[from] vpkcore::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no archive is open")]
    NoArchiveOpen,

    #[error("an extraction is already running for this archive")]
    ExtractionInProgress,

    #[error("extraction worker panicked")]
    WorkerPanicked,

    #[error("no platform config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;

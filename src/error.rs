use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcbVizError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid injection count: {0}")]
    InvalidCount(String),

    #[error("Unsupported option: {0}")]
    UnsupportedOption(String),
}

pub type Result<T> = std::result::Result<T, EcbVizError>;

//! Errors from calling a worker.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamingError {
    #[error("connect to {0} timed out")]
    ConnectTimeout(String),
    #[error("call to {0} timed out")]
    CallTimeout(String),
    #[error(transparent)]
    Wire(#[from] corelib::WireError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StreamingError>;

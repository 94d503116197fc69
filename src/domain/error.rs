use std::string::FromUtf8Error;
use thiserror::Error;

/// Why a collected file could not be embedded.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("invalid UTF-8: {source}")]
    Decode {
        #[source]
        source: FromUtf8Error,
    },
}

impl From<std::io::Error> for ReadError {
    fn from(source: std::io::Error) -> Self {
        ReadError::Io { source }
    }
}

impl From<FromUtf8Error> for ReadError {
    fn from(source: FromUtf8Error) -> Self {
        ReadError::Decode { source }
    }
}

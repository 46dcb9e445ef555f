use thiserror::Error;

use crate::store::EntityKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Raw value {0} does not fit a decimal")]
    DecimalOverflow(String),
    #[error("Invalid config: {0}")]
    Config(String),
    #[error("Unknown resolution: {0}")]
    UnknownResolution(String),
    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),
    #[error("Expected {expected} record under key {key}")]
    RecordKindMismatch { expected: EntityKind, key: String },
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::usecase::ports::decoder::DecodeError;

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to decode {file}: {source}")]
    Decode {
        file: String,
        #[source]
        source: DecodeError,
    },

    #[error("transform of {file} was cancelled")]
    Cancelled { file: String },

    #[error("row {row} is out of range ({len} records)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("field `{field}` is not present on record {row}")]
    FieldNotPresent { field: &'static str, row: usize },

    #[error("file name must not be empty")]
    EmptyFileName,

    #[error("no records belong to file `{0}`")]
    UnknownFile(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write export")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

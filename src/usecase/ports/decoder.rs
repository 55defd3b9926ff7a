use std::path::Path;

use thiserror::Error;

use crate::domain::entities::cell::RawRow;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    #[error("workbook has no sheets")]
    NoSheets,

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("failed to parse csv")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A source file already decoded into positional rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSheet {
    /// Display name of the file, used as the `File Name` of its records.
    pub name: String,
    pub size_bytes: Option<u64>,
    pub rows: Vec<RawRow>,
}

pub trait SheetDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<DecodedSheet, DecodeError>;
}

/// File name shown for a decoded source.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("dataset")
        .to_string()
}

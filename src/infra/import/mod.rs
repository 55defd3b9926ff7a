pub mod csv;
pub mod xlsx;

use std::path::Path;

use crate::usecase::ports::decoder::{DecodeError, DecodedSheet, SheetDecoder};

pub use self::csv::CsvDecoder;
pub use self::xlsx::XlsxDecoder;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Picks the decoder from the file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoDecoder;

impl SheetDecoder for AutoDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedSheet, DecodeError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if extension == "csv" {
            CsvDecoder.decode(path)
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            XlsxDecoder.decode(path)
        } else {
            Err(DecodeError::Unsupported(path.display().to_string()))
        }
    }
}

fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|meta| meta.len())
}

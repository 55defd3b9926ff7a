use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::domain::entities::cell::{CellValue, RawRow};
use crate::usecase::ports::decoder::{display_name, DecodeError, DecodedSheet, SheetDecoder};

/// Reads a CSV export as rows. Every line is kept, the preamble included,
/// and rows may differ in length. Plain numeric fields become numbers so
/// blank rules match the workbook decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvDecoder;

impl SheetDecoder for CsvDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedSheet, DecodeError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows: Vec<RawRow> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(csv_cell).collect());
        }
        debug!(path = %path.display(), rows = rows.len(), "decoded csv");

        Ok(DecodedSheet {
            name: display_name(path),
            size_bytes: super::file_size(path),
            rows,
        })
    }
}

/// A field that is a plain decimal number (no separators, no letters) is
/// decoded as a number; anything else stays text.
fn csv_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    let plain = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    match trimmed.parse::<f64>() {
        Ok(value) if plain && value.is_finite() => CellValue::Number(value),
        _ => CellValue::from(field),
    }
}

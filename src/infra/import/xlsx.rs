use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::domain::entities::cell::{CellValue, RawRow};
use crate::usecase::ports::decoder::{display_name, DecodeError, DecodedSheet, SheetDecoder};

/// Reads the first worksheet of any workbook calamine can open.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxDecoder;

impl SheetDecoder for XlsxDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedSheet, DecodeError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|err| DecodeError::Workbook(err.to_string()))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(DecodeError::NoSheets)?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|err| DecodeError::Workbook(err.to_string()))?;

        let rows: Vec<RawRow> = range
            .rows()
            .map(|row| row.iter().map(cell_to_value).collect())
            .collect();
        debug!(path = %path.display(), sheet = %sheet_name, rows = rows.len(), "decoded workbook");

        Ok(DecodedSheet {
            name: display_name(path),
            size_bytes: super::file_size(path),
            rows,
        })
    }
}

pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(v) => CellValue::from(v.as_str()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => CellValue::text(v.to_string()),
        Data::DateTimeIso(v) => CellValue::text(v.as_str()),
        Data::DurationIso(v) => CellValue::text(v.as_str()),
        Data::Error(v) => CellValue::text(format!("{v:?}")),
    }
}

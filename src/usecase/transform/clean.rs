use crate::config::IngestConfig;
use crate::domain::entities::cell::{CellValue, RawRow};

/// Drops the fixed metadata block and rollup rows, then removes the
/// running total column. The header row comes first in the output.
pub fn clean_rows(rows: Vec<RawRow>, config: &IngestConfig) -> Vec<RawRow> {
    let mut cleaned: Vec<RawRow> = rows
        .into_iter()
        .skip(config.header_rows)
        .filter(|row| !is_summary_row(row, &config.summary_markers))
        .collect();

    if let Some(total_idx) = cleaned
        .first()
        .and_then(|header| total_column_index(header, &config.total_column_marker))
    {
        for row in &mut cleaned {
            if total_idx < row.len() {
                row.remove(total_idx);
            }
        }
    }

    cleaned
}

/// Cells are joined with single spaces before matching, so a marker may
/// straddle two adjacent cells.
pub fn is_summary_row(row: &[CellValue], markers: &[String]) -> bool {
    let joined = row
        .iter()
        .map(CellValue::as_text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    markers.iter().any(|marker| joined.contains(marker.as_str()))
}

fn total_column_index(header: &[CellValue], marker: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| !cell.is_blank() && cell.as_text().to_lowercase().contains(marker))
}

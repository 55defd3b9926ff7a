use crate::config::IngestConfig;
use crate::domain::entities::cell::{CellValue, RawRow};
use crate::domain::entities::record::{ColumnConfig, TransformedRecord};
use crate::usecase::transform::mapper::ColumnMapping;

/// Records produced by one step of a [`Reshaper`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReshapeBatch {
    pub records: Vec<TransformedRecord>,
    pub rows_done: usize,
    pub rows_total: usize,
}

/// Expands a cleaned wide sheet into long-format records, `chunk_rows`
/// data rows per step. Callers may yield, report progress or stop between
/// steps; draining the iterator always gives the same records as one pass.
pub struct Reshaper<'a> {
    file_name: &'a str,
    rows: &'a [RawRow],
    mapping: ColumnMapping,
    placeholder: &'a str,
    chunk_rows: usize,
    cursor: usize,
}

impl<'a> Reshaper<'a> {
    pub fn new(
        cleaned: &'a [RawRow],
        file_name: &'a str,
        columns: &ColumnConfig,
        ingest: &'a IngestConfig,
    ) -> Self {
        let (mapping, rows) = match cleaned.split_first() {
            Some((header, rows)) if !rows.is_empty() => {
                (ColumnMapping::resolve(header, columns), rows)
            }
            _ => (ColumnMapping::default(), &cleaned[..0]),
        };

        Self {
            file_name,
            rows,
            mapping,
            placeholder: &ingest.placeholder,
            chunk_rows: ingest.chunk_rows.max(1),
            cursor: 0,
        }
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn rows_total(&self) -> usize {
        self.rows.len()
    }

    fn reshape_row(&self, row: &[CellValue], out: &mut Vec<TransformedRecord>) {
        let has_required_dimension = self
            .mapping
            .brand
            .is_none_or(|idx| row.get(idx).is_some_and(|cell| !cell.is_blank()));
        if !has_required_dimension {
            return;
        }

        let dimension = |idx: Option<usize>| idx.map(|idx| cell_text(row, idx));

        for period in &self.mapping.periods {
            let Some(cell) = row.get(period.column_index) else {
                continue;
            };
            if cell.is_blank() {
                continue;
            }
            let impression = cell.as_text();
            if impression == self.placeholder {
                continue;
            }

            out.push(TransformedRecord {
                file_name: self.file_name.to_string(),
                brand_name: dimension(self.mapping.brand),
                media_type: dimension(self.mapping.media_type),
                ad_type: dimension(self.mapping.ad_type),
                year: period.year.clone(),
                month: period.month.clone(),
                impression,
            });
        }
    }
}

impl Iterator for Reshaper<'_> {
    type Item = ReshapeBatch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.rows.len() || self.mapping.periods.is_empty() {
            return None;
        }

        let end = (self.cursor + self.chunk_rows).min(self.rows.len());
        let mut records = Vec::new();
        for row in &self.rows[self.cursor..end] {
            self.reshape_row(row, &mut records);
        }
        self.cursor = end;

        Some(ReshapeBatch {
            records,
            rows_done: end,
            rows_total: self.rows.len(),
        })
    }
}

fn cell_text(row: &[CellValue], idx: usize) -> String {
    row.get(idx)
        .filter(|cell| !cell.is_blank())
        .map(CellValue::as_text)
        .unwrap_or_default()
}

/// Single blocking pass over a cleaned sheet.
pub fn reshape(
    cleaned: &[RawRow],
    file_name: &str,
    columns: &ColumnConfig,
    ingest: &IngestConfig,
) -> Vec<TransformedRecord> {
    Reshaper::new(cleaned, file_name, columns, ingest)
        .flat_map(|batch| batch.records)
        .collect()
}

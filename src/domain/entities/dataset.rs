use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::entities::record::RecordField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: RecordField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Next sort after a header click: the same key flips direction, a new
    /// key starts ascending.
    pub fn toggled(current: Option<SortSpec>, field: RecordField) -> SortSpec {
        let direction = match current {
            Some(spec) if spec.field == field && spec.direction == SortDirection::Asc => {
                SortDirection::Desc
            }
            _ => SortDirection::Asc,
        };
        SortSpec { field, direction }
    }
}

/// Sort and 1-based page of the flat record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableState {
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRow {
    /// Position in the session's record collection, for cell edits.
    pub index: usize,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub columns: Vec<String>,
    pub rows: Vec<PageRow>,
    pub total_rows: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Ledger entry for one ingested source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: Option<u64>,
    pub rows_added: usize,
    pub uploaded_at: DateTime<Local>,
}

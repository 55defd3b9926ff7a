use std::collections::BTreeMap;

use crate::domain::entities::record::RecordField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub row_idx: usize,
    pub field: RecordField,
}

#[derive(Debug, Clone, Default)]
pub struct StagedEdits {
    pub staged_cells: BTreeMap<CellKey, String>,
    pub renamed_files: BTreeMap<String, String>,
}

impl StagedEdits {
    pub fn stage_cell(&mut self, row_idx: usize, field: RecordField, value: impl Into<String>) {
        self.staged_cells
            .insert(CellKey { row_idx, field }, value.into());
    }

    pub fn stage_rename(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.renamed_files.insert(from.into(), to.into());
    }

    pub fn is_empty(&self) -> bool {
        self.staged_cells.is_empty() && self.renamed_files.is_empty()
    }
}

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{EngineConfig, ViewSettings};
use crate::domain::entities::aggregate::ChartView;
use crate::domain::entities::dataset::{SortSpec, TableState, UploadedFile};
use crate::domain::entities::filter::{ChartFilterSet, FilterDimension, FilterOptions};
use crate::domain::entities::record::{ColumnConfig, RecordField, TransformedRecord};
use crate::error::{EngineError, Result};

/// Everything one analysis session holds. Records only change through the
/// mutation methods below; every view is recomputed from this state.
#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfig,
    records: Vec<TransformedRecord>,
    files: Vec<UploadedFile>,
    filters: ChartFilterSet,
    table: TableState,
    display_names: BTreeMap<RecordField, String>,
    active_view: ChartView,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        let table = TableState::new(config.table.page_size);
        Self {
            config,
            records: Vec::new(),
            files: Vec::new(),
            filters: ChartFilterSet::default(),
            table,
            display_names: BTreeMap::new(),
            active_view: ChartView::ShareOfVoice,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn column_config(&self) -> ColumnConfig {
        self.config.columns
    }

    /// Applies to files ingested from now on; existing records keep their shape.
    pub fn set_column_config(&mut self, columns: ColumnConfig) {
        self.config.columns = columns;
    }

    pub fn view_settings(&self) -> &ViewSettings {
        &self.config.view
    }

    pub fn view_settings_mut(&mut self) -> &mut ViewSettings {
        &mut self.config.view
    }

    pub fn records(&self) -> &[TransformedRecord] {
        &self.records
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn filters(&self) -> &ChartFilterSet {
        &self.filters
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Fields carried by the record set, taken from its first record.
    pub fn fields(&self) -> Vec<RecordField> {
        match self.records.first() {
            Some(record) => record.fields(),
            None => self.config.columns.fields(),
        }
    }

    pub fn has_field(&self, field: RecordField) -> bool {
        self.records.first().is_some_and(|record| record.has(field))
    }

    pub fn append_records(&mut self, file: UploadedFile, records: Vec<TransformedRecord>) {
        debug!(file = %file.name, added = records.len(), "appending records");
        self.records.extend(records);
        self.files.push(file);
        self.table.page = 1;
    }

    /// Drops every record and ledger entry of `file_name`; returns the
    /// number of records removed.
    pub fn remove_file(&mut self, file_name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.file_name != file_name);
        self.files.retain(|file| file.name != file_name);
        let removed = before - self.records.len();
        debug!(file = file_name, removed, "removed file");
        self.table.page = 1;
        removed
    }

    pub fn edit_cell(&mut self, row: usize, field: RecordField, value: String) -> Result<()> {
        self.check_cell(row, field)?;
        if let Some(record) = self.records.get_mut(row) {
            record.set(field, value);
        }
        self.table.page = 1;
        Ok(())
    }

    pub(crate) fn check_cell(&self, row: usize, field: RecordField) -> Result<()> {
        let record = self.records.get(row).ok_or(EngineError::RowOutOfRange {
            row,
            len: self.records.len(),
        })?;
        if !record.has(field) {
            return Err(EngineError::FieldNotPresent {
                field: field.label(),
                row,
            });
        }
        Ok(())
    }

    /// Renames `from` to the trimmed `to` on every record and ledger entry.
    pub fn rename_file(&mut self, from: &str, to: &str) -> Result<usize> {
        let to = to.trim();
        if to.is_empty() {
            return Err(EngineError::EmptyFileName);
        }
        let mut renamed = 0;
        for record in self.records.iter_mut().filter(|r| r.file_name == from) {
            record.file_name = to.to_string();
            renamed += 1;
        }
        if renamed == 0 {
            return Err(EngineError::UnknownFile(from.to_string()));
        }
        for file in self.files.iter_mut().filter(|f| f.name == from) {
            file.name = to.to_string();
        }
        debug!(from, to, renamed, "renamed file");
        self.table.page = 1;
        Ok(renamed)
    }

    pub fn unique_file_names(&self) -> Vec<String> {
        FilterOptions::from_records(&self.records).file_names
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.files.clear();
        self.filters = ChartFilterSet::default();
        self.table = TableState::new(self.config.table.page_size);
        self.display_names.clear();
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }

    pub fn filtered_records(&self) -> Vec<&TransformedRecord> {
        self.filters.apply(&self.records)
    }

    pub fn set_filters(&mut self, filters: ChartFilterSet) {
        self.filters = filters;
        self.table.page = 1;
    }

    pub fn toggle_filter(&mut self, dimension: FilterDimension, value: &str, checked: bool) {
        let values = self.filters.values_mut(dimension);
        if checked {
            values.insert(value.to_string());
        } else {
            values.remove(value);
        }
        self.table.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(ChartFilterSet::default());
    }

    pub fn select_all_filters(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let filters = ChartFilterSet::select_all(&self.filter_options());
        self.set_filters(filters);
    }

    pub fn sort_by(&mut self, field: RecordField) -> SortSpec {
        let spec = SortSpec::toggled(self.table.sort, field);
        self.table.sort = Some(spec);
        self.table.page = 1;
        spec
    }

    pub fn set_page(&mut self, page: usize) {
        self.table.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.table.page_size = page_size.max(1);
        self.table.page = 1;
    }

    /// An empty name restores the default header.
    pub fn set_display_name(&mut self, field: RecordField, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.display_names.remove(&field);
        } else {
            self.display_names.insert(field, name.to_string());
        }
    }

    pub fn display_name(&self, field: RecordField) -> &str {
        self.display_names
            .get(&field)
            .map(String::as_str)
            .unwrap_or(field.label())
    }

    pub fn display_columns(&self) -> Vec<String> {
        self.fields()
            .into_iter()
            .map(|field| self.display_name(field).to_string())
            .collect()
    }

    pub fn set_active_view(&mut self, view: ChartView) {
        self.active_view = view;
    }

    /// The selected view, falling back to SOV when a distribution view
    /// asks for a field the records do not carry.
    pub fn active_view(&self) -> ChartView {
        match self.active_view {
            ChartView::AdType if !self.records.is_empty() && !self.has_field(RecordField::AdType) => {
                ChartView::ShareOfVoice
            }
            ChartView::MediaType
                if !self.records.is_empty() && !self.has_field(RecordField::MediaType) =>
            {
                ChartView::ShareOfVoice
            }
            view => view,
        }
    }
}

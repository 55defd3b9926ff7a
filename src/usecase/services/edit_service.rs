use tracing::info;

use crate::domain::entities::edit::StagedEdits;
use crate::error::{EngineError, Result};
use crate::session::Session;

pub struct EditService<'s> {
    session: &'s mut Session,
}

impl<'s> EditService<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self { session }
    }

    /// Applies staged cell edits and then file renames. Everything is checked
    /// first, so a bad edit leaves the session untouched.
    pub fn apply_edits(&mut self, edits: StagedEdits) -> Result<()> {
        if edits.is_empty() {
            return Ok(());
        }
        for key in edits.staged_cells.keys() {
            self.session.check_cell(key.row_idx, key.field)?;
        }
        let known = self.session.unique_file_names();
        for (from, to) in &edits.renamed_files {
            if to.trim().is_empty() {
                return Err(EngineError::EmptyFileName);
            }
            if !known.contains(from) {
                return Err(EngineError::UnknownFile(from.clone()));
            }
        }

        let cells = edits.staged_cells.len();
        for (key, value) in edits.staged_cells {
            self.session.edit_cell(key.row_idx, key.field, value)?;
        }
        for (from, to) in &edits.renamed_files {
            self.session.rename_file(from, to)?;
        }
        info!(cells, renames = edits.renamed_files.len(), "applied edits");
        Ok(())
    }

    pub fn remove_file(&mut self, file_name: &str) -> Result<usize> {
        let known = self.session.files().iter().any(|f| f.name == file_name)
            || self.session.records().iter().any(|r| r.file_name == file_name);
        if !known {
            return Err(EngineError::UnknownFile(file_name.to_string()));
        }
        Ok(self.session.remove_file(file_name))
    }
}

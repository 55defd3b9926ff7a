use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::entities::cell::RawRow;
use crate::domain::entities::dataset::UploadedFile;
use crate::domain::entities::record::TransformedRecord;
use crate::error::{EngineError, Result};
use crate::session::Session;
use crate::usecase::ports::decoder::{DecodedSheet, SheetDecoder};
use crate::usecase::transform::clean::clean_rows;
use crate::usecase::transform::reshape::Reshaper;

/// Shared stop request, checked between reshape steps.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestProgress<'a> {
    pub file_name: &'a str,
    pub rows_done: usize,
    pub rows_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub file_name: String,
    pub rows_added: usize,
    pub data_rows: usize,
    pub periods: usize,
}

type ProgressFn<'p> = Box<dyn FnMut(&IngestProgress<'_>) + 'p>;

/// Runs files through clean → map → reshape and appends the records to a
/// session, one file at a time.
#[derive(Default)]
pub struct IngestService<'p> {
    cancel: Option<CancelFlag>,
    progress: Option<ProgressFn<'p>>,
}

impl<'p> IngestService<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_progress(mut self, progress: impl FnMut(&IngestProgress<'_>) + 'p) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }

    /// Cleans and reshapes one sheet without touching any session.
    pub fn transform(
        &mut self,
        config: &EngineConfig,
        file_name: &str,
        rows: Vec<RawRow>,
    ) -> Result<(Vec<TransformedRecord>, IngestReport)> {
        let cleaned = clean_rows(rows, &config.ingest);
        let mut reshaper = Reshaper::new(&cleaned, file_name, &config.columns, &config.ingest);
        let periods = reshaper.mapping().periods.len();
        let data_rows = reshaper.rows_total();
        debug!(file = file_name, data_rows, periods, "reshaping sheet");

        let mut records = Vec::new();
        loop {
            if self.is_cancelled() {
                warn!(file = file_name, "transform cancelled");
                return Err(EngineError::Cancelled {
                    file: file_name.to_string(),
                });
            }
            let Some(batch) = reshaper.next() else {
                break;
            };
            records.extend(batch.records);
            if let Some(progress) = self.progress.as_mut() {
                progress(&IngestProgress {
                    file_name,
                    rows_done: batch.rows_done,
                    rows_total: batch.rows_total,
                });
            }
        }

        let report = IngestReport {
            file_name: file_name.to_string(),
            rows_added: records.len(),
            data_rows,
            periods,
        };
        Ok((records, report))
    }

    pub fn ingest_sheet(&mut self, session: &mut Session, sheet: DecodedSheet) -> Result<IngestReport> {
        let DecodedSheet {
            name,
            size_bytes,
            rows,
        } = sheet;
        let (records, report) = self.transform(session.config(), &name, rows)?;
        info!(file = %name, rows_added = report.rows_added, "ingested file");

        session.append_records(
            UploadedFile {
                name,
                size_bytes,
                rows_added: report.rows_added,
                uploaded_at: Local::now(),
            },
            records,
        );
        Ok(report)
    }

    /// One file's decoded rows, handled as a batch of one.
    pub fn ingest_rows(
        &mut self,
        session: &mut Session,
        file_name: &str,
        rows: Vec<RawRow>,
    ) -> Result<IngestReport> {
        let was_empty = session.files().is_empty();
        let result = self.ingest_sheet(
            session,
            DecodedSheet {
                name: file_name.to_string(),
                size_bytes: None,
                rows,
            },
        );
        select_default_filters(session, was_empty, result.is_ok());
        result
    }

    /// Ingests already-decoded sheets in order. A cancelled file stops the
    /// batch; files ingested before it are kept.
    pub fn ingest_sheets(
        &mut self,
        session: &mut Session,
        sheets: Vec<DecodedSheet>,
    ) -> Vec<Result<IngestReport>> {
        let sources = sheets.into_iter().map(Ok);
        self.run_batch(session, sources)
    }

    /// Decodes and ingests each path in order. A file that fails to decode
    /// contributes nothing and the batch carries on.
    pub fn ingest_paths<P: AsRef<Path>>(
        &mut self,
        session: &mut Session,
        decoder: &dyn SheetDecoder,
        paths: &[P],
    ) -> Vec<Result<IngestReport>> {
        let sources = paths.iter().map(|path| {
            let path = path.as_ref();
            decoder.decode(path).map_err(|source| {
                warn!(path = %path.display(), error = %source, "failed to decode file");
                EngineError::Decode {
                    file: path.display().to_string(),
                    source,
                }
            })
        });
        self.run_batch(session, sources)
    }

    fn run_batch(
        &mut self,
        session: &mut Session,
        sources: impl Iterator<Item = Result<DecodedSheet>>,
    ) -> Vec<Result<IngestReport>> {
        let was_empty = session.files().is_empty();
        let mut results = Vec::new();

        for source in sources {
            let result = source.and_then(|sheet| self.ingest_sheet(session, sheet));
            let cancelled = matches!(result, Err(EngineError::Cancelled { .. }));
            results.push(result);
            if cancelled {
                break;
            }
        }

        let any_ingested = results.iter().any(Result::is_ok);
        select_default_filters(session, was_empty, any_ingested);
        results
    }
}

/// After the first upload, or while nothing is filtered, every filter
/// starts with all of its values selected.
fn select_default_filters(session: &mut Session, was_empty: bool, any_ingested: bool) {
    if any_ingested
        && session.config().ingest.auto_select_filters
        && (was_empty || !session.filters().is_active())
    {
        session.select_all_filters();
    }
}

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use sov_engine::cli::Cli;
use sov_engine::domain::entities::record::ColumnConfig;
use sov_engine::infra::export::tsv::{export_records, export_view};
use sov_engine::infra::import::AutoDecoder;
use sov_engine::usecase::services::ingest_service::IngestService;
use sov_engine::usecase::services::query_service::QueryService;
use sov_engine::{EngineConfig, Session};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when no file could be ingested.
fn run(cli: Cli) -> Result<bool> {
    let mut config = EngineConfig::load_or_default(cli.config.as_deref())
        .context("failed to load engine config")?;
    if cli.brand_only {
        config.columns = ColumnConfig::brand_only();
    }
    if let Some(granularity) = cli.granularity {
        config.view.granularity = granularity.into();
    }
    if let Some(display) = cli.display {
        config.view.display_mode = display.into();
    }

    let mut session = Session::new(config);
    let results = IngestService::new().ingest_paths(&mut session, &AutoDecoder, &cli.files);

    let mut ingested = 0;
    for result in &results {
        match result {
            Ok(report) => {
                ingested += 1;
                info!(
                    file = %report.file_name,
                    rows_added = report.rows_added,
                    periods = report.periods,
                    "file ready"
                );
            }
            Err(err) => error!("{err}"),
        }
    }
    if ingested == 0 {
        error!("no file could be ingested");
        return Ok(false);
    }

    let query = QueryService::new(&session);
    let views = match cli.view.chart_view() {
        Some(view) => vec![view],
        None => query.available_views(),
    };
    let results: Vec<_> = views.into_iter().map(|view| query.view(view)).collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        let mut payload = json!({ "files": session.files(), "views": results });
        if cli.records {
            payload["records"] = serde_json::to_value(session.records())?;
        }
        serde_json::to_writer_pretty(&mut out, &payload).context("failed to write json")?;
        writeln!(out)?;
    } else {
        let mode = session.view_settings().display_mode;
        for (index, result) in results.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            write!(out, "{}", export_view(result, mode)?)?;
        }
        if cli.records {
            writeln!(out)?;
            write!(out, "{}", export_records(&query.full_table())?)?;
        }
    }
    Ok(true)
}

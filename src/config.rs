use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::aggregate::{DisplayMode, Granularity};
use crate::domain::entities::record::ColumnConfig;
use crate::error::{EngineError, Result};

pub const CONFIG_FILE_NAME: &str = "engine.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ingest: IngestConfig,
    pub columns: ColumnConfig,
    pub view: ViewSettings,
    pub table: TableConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Leading metadata rows dropped from every source sheet.
    pub header_rows: usize,
    /// Lower-case fragments marking rollup rows.
    pub summary_markers: Vec<String>,
    /// Header fragment marking the running total column.
    pub total_column_marker: String,
    pub placeholder: String,
    /// Data rows reshaped per step before control returns to the caller.
    pub chunk_rows: usize,
    pub auto_select_filters: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            header_rows: 18,
            summary_markers: vec![
                "all ad types".to_string(),
                "all media types".to_string(),
                "all brands".to_string(),
                "all ".to_string(),
            ],
            total_column_marker: "sum".to_string(),
            placeholder: "-".to_string(),
            chunk_rows: 500,
            auto_select_filters: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub granularity: Granularity,
    pub display_mode: DisplayMode,
    /// Brands below this share of voice are left out of the SOV ranking.
    pub min_percentage: f64,
    pub sov_max_brands: usize,
    pub ad_type_max_brands: usize,
    pub media_type_max_brands: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            display_mode: DisplayMode::Percentage,
            min_percentage: 0.0,
            sov_max_brands: 10,
            ad_type_max_brands: 10,
            media_type_max_brands: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { page_size: 50 }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(contents).map_err(|err| EngineError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents)?;
                debug!(path = %path.display(), "loaded engine config");
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no engine config, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ingest.chunk_rows == 0 {
            return Err(EngineError::Config(
                "ingest.chunk_rows must be greater than zero".to_string(),
            ));
        }
        if self.table.page_size == 0 {
            return Err(EngineError::Config(
                "table.page_size must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.view.min_percentage) {
            return Err(EngineError::Config(format!(
                "view.min_percentage out of range: {}",
                self.view.min_percentage
            )));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sov-engine").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::entities::aggregate::{ChartView, DisplayMode, Granularity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Sov,
    Adtype,
    Mediatype,
    Trend,
    Crosstab,
    /// Every view the ingested records support
    All,
}

impl ViewArg {
    /// `None` means every view.
    pub fn chart_view(self) -> Option<ChartView> {
        match self {
            ViewArg::Sov => Some(ChartView::ShareOfVoice),
            ViewArg::Adtype => Some(ChartView::AdType),
            ViewArg::Mediatype => Some(ChartView::MediaType),
            ViewArg::Trend => Some(ChartView::Trend),
            ViewArg::Crosstab => Some(ChartView::CrossTab),
            ViewArg::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Month,
    Year,
}

impl From<GranularityArg> for Granularity {
    fn from(value: GranularityArg) -> Self {
        match value {
            GranularityArg::Month => Granularity::Month,
            GranularityArg::Year => Granularity::Year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayArg {
    Value,
    Percentage,
}

impl From<DisplayArg> for DisplayMode {
    fn from(value: DisplayArg) -> Self {
        match value {
            DisplayArg::Value => DisplayMode::Value,
            DisplayArg::Percentage => DisplayMode::Percentage,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sov-engine")]
#[command(about = "Reshape media-monitoring exports and report share of voice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Spreadsheet or CSV exports to ingest, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Engine configuration (TOML); defaults to the per-user config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// View to print
    #[arg(short, long, value_enum, default_value = "sov")]
    pub view: ViewArg,

    /// Print JSON instead of tab-separated text
    #[arg(long)]
    pub json: bool,

    /// Source files carry only the brand column before the periods
    #[arg(long)]
    pub brand_only: bool,

    /// Overrides the configured trend and cross-tab granularity
    #[arg(long, value_enum)]
    pub granularity: Option<GranularityArg>,

    /// Overrides the configured cross-tab display mode
    #[arg(long, value_enum)]
    pub display: Option<DisplayArg>,

    /// Also print the full record table
    #[arg(long)]
    pub records: bool,
}

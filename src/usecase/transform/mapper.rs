use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::record::{ColumnConfig, PeriodColumn};

static PERIOD_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})\s+(\w+)").expect("period header pattern is valid"));

/// Where each enabled dimension and every period lives in a cleaned sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnMapping {
    pub brand: Option<usize>,
    pub media_type: Option<usize>,
    pub ad_type: Option<usize>,
    pub periods: Vec<PeriodColumn>,
}

impl ColumnMapping {
    pub fn resolve(header: &[CellValue], config: &ColumnConfig) -> Self {
        let mut next = 0;
        let mut claim = |enabled: bool| {
            enabled.then(|| {
                let idx = next;
                next += 1;
                idx
            })
        };
        let brand = claim(config.include_brand);
        let media_type = claim(config.include_media_type);
        let ad_type = claim(config.include_ad_type);

        Self {
            brand,
            media_type,
            ad_type,
            periods: find_period_columns(header, config.dimension_count()),
        }
    }
}

/// Period columns in header order, scanning from `first_idx` onward.
pub fn find_period_columns(header: &[CellValue], first_idx: usize) -> Vec<PeriodColumn> {
    header
        .iter()
        .enumerate()
        .skip(first_idx)
        .filter_map(|(column_index, cell)| {
            if cell.is_blank() {
                return None;
            }
            let text = cell.as_text();
            let captures = PERIOD_HEADER.captures(&text)?;
            Some(PeriodColumn {
                column_index,
                year: captures[1].to_string(),
                month: captures[2].to_string(),
            })
        })
        .collect()
}

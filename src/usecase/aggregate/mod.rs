pub mod bucket;
pub mod category;
pub mod crosstab;
pub mod numeric;
pub mod sov;
pub mod trend;

use std::collections::HashMap;

use crate::config::ViewSettings;
use crate::domain::entities::aggregate::{ChartView, ViewResult};
use crate::domain::entities::filter::ChartFilterSet;
use crate::domain::entities::record::{RecordField, TransformedRecord};

pub const UNKNOWN: &str = "Unknown";

/// Computes one view over the records that pass `filters`. Pure: nothing
/// is cached between calls.
pub fn aggregate(
    records: &[TransformedRecord],
    filters: &ChartFilterSet,
    view: ChartView,
    settings: &ViewSettings,
) -> ViewResult {
    let filtered = filters.apply(records);
    match view {
        ChartView::ShareOfVoice => ViewResult::ShareOfVoice(sov::share_of_voice(&filtered, settings)),
        ChartView::AdType => ViewResult::AdType(bucket::fold_distributions(
            category::brand_distribution(&filtered, RecordField::AdType),
            settings.ad_type_max_brands,
        )),
        ChartView::MediaType => ViewResult::MediaType(bucket::fold_distributions(
            category::brand_distribution(&filtered, RecordField::MediaType),
            settings.media_type_max_brands,
        )),
        ChartView::Trend => {
            let brands = sov::selected_brands(&sov::share_of_voice(&filtered, settings));
            ViewResult::Trend(trend::brand_trend(&filtered, &brands, settings.granularity))
        }
        ChartView::CrossTab => {
            ViewResult::CrossTab(crosstab::sov_table(&filtered, settings.granularity))
        }
    }
}

/// Running sums keyed by name, remembering first-seen order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tally {
    order: Vec<String>,
    sums: HashMap<String, f64>,
}

impl Tally {
    pub(crate) fn add(&mut self, key: &str, value: f64) {
        match self.sums.get_mut(key) {
            Some(sum) => *sum += value,
            None => {
                self.order.push(key.to_string());
                self.sums.insert(key.to_string(), value);
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> f64 {
        self.sums.get(key).copied().unwrap_or(0.0)
    }

    pub(crate) fn total(&self) -> f64 {
        self.order.iter().map(|key| self.get(key)).sum()
    }

    pub(crate) fn keys(&self) -> &[String] {
        &self.order
    }

    pub(crate) fn into_entries(self) -> Vec<(String, f64)> {
        let Tally { order, mut sums } = self;
        order
            .into_iter()
            .map(|key| {
                let value = sums.remove(&key).unwrap_or(0.0);
                (key, value)
            })
            .collect()
    }
}

/// Brand label used for grouping; blank brands collapse into "Unknown".
pub fn brand_key(record: &TransformedRecord) -> &str {
    record
        .brand_name
        .as_deref()
        .filter(|brand| !brand.is_empty())
        .unwrap_or(UNKNOWN)
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Time unit the trend and cross-tab views group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Month,
    Year,
}

/// Whether tabular views present raw sums or shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Value,
    #[default]
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    #[serde(rename = "sov")]
    ShareOfVoice,
    #[serde(rename = "adtype")]
    AdType,
    #[serde(rename = "mediatype")]
    MediaType,
    Trend,
    #[serde(rename = "crosstab")]
    CrossTab,
}

impl ChartView {
    pub const ALL: [ChartView; 5] = [
        ChartView::ShareOfVoice,
        ChartView::AdType,
        ChartView::MediaType,
        ChartView::Trend,
        ChartView::CrossTab,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartView::ShareOfVoice => "Share of Voice (SOV) - Impression Distribution",
            ChartView::AdType => "Ad Type Distribution by Brand",
            ChartView::MediaType => "Media Type Distribution by Brand",
            ChartView::Trend => "Impression Trend by Brand",
            ChartView::CrossTab => "SOV by Period and Brand",
        }
    }
}

/// Single-dimension aggregate. `other_names` is filled only on an
/// "Others" bucket and lists the entries folded into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedEntry {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_names: Vec<String>,
}

impl AggregatedEntry {
    pub fn new(name: impl Into<String>, value: f64, percentage: f64) -> Self {
        Self {
            name: name.into(),
            value,
            percentage,
            other_names: Vec::new(),
        }
    }

    pub fn is_bucket(&self) -> bool {
        !self.other_names.is_empty()
    }
}

/// One category of a brand's stacked distribution: share of that brand's
/// own total plus the absolute sum behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub percentage: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandDistribution {
    pub name: String,
    pub total: f64,
    pub shares: Vec<CategoryShare>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_names: Vec<String>,
}

impl BrandDistribution {
    pub fn share(&self, category: &str) -> Option<&CategoryShare> {
        self.shares.iter().find(|share| share.category == category)
    }
}

/// Categories across a distribution list, in first-seen order.
pub fn distribution_categories(list: &[BrandDistribution]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for share in list.iter().flat_map(|item| item.shares.iter()) {
        if !categories.contains(&share.category) {
            categories.push(share.category.clone());
        }
    }
    categories
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandValue {
    pub brand: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: String,
    pub values: Vec<BrandValue>,
}

impl TrendPoint {
    pub fn value(&self, brand: &str) -> f64 {
        self.values
            .iter()
            .find(|item| item.brand == brand)
            .map(|item| item.value)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub granularity: Granularity,
    pub brands: Vec<String>,
    pub points: Vec<TrendPoint>,
}

pub const YEAR_TOTAL_LABEL: &str = "Year Total";

/// Period × brand sums for the cross-tab view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SovTable {
    pub granularity: Granularity,
    pub periods: Vec<String>,
    pub brands: Vec<String>,
    pub data: BTreeMap<String, BTreeMap<String, f64>>,
    pub totals: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabCell {
    pub brand: String,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabRow {
    pub label: String,
    pub cells: Vec<CrossTabCell>,
    pub total: f64,
    /// Share of the grand total carried by this row.
    pub total_percentage: f64,
}

impl SovTable {
    pub fn grand_total(&self) -> f64 {
        self.periods
            .iter()
            .map(|period| self.period_total(period))
            .sum()
    }

    pub fn period_total(&self, period: &str) -> f64 {
        self.totals.get(period).copied().unwrap_or(0.0)
    }

    pub fn value(&self, period: &str, brand: &str) -> f64 {
        self.data
            .get(period)
            .and_then(|row| row.get(brand))
            .copied()
            .unwrap_or(0.0)
    }

    /// Brand share within one period.
    pub fn cell_percentage(&self, period: &str, brand: &str) -> f64 {
        percent_of(self.value(period, brand), self.period_total(period))
    }

    /// Period share of the grand total.
    pub fn period_percentage(&self, period: &str) -> f64 {
        percent_of(self.period_total(period), self.grand_total())
    }

    pub fn brand_total(&self, brand: &str) -> f64 {
        self.periods
            .iter()
            .map(|period| self.value(period, brand))
            .sum()
    }

    /// The synthesized "Year Total" row; present exactly in month view.
    pub fn year_total_row(&self) -> Option<CrossTabRow> {
        if self.granularity != Granularity::Month {
            return None;
        }
        let grand_total = self.grand_total();
        let cells = self
            .brands
            .iter()
            .map(|brand| {
                let value = self.brand_total(brand);
                CrossTabCell {
                    brand: brand.clone(),
                    value,
                    percentage: percent_of(value, grand_total),
                }
            })
            .collect();
        Some(CrossTabRow {
            label: YEAR_TOTAL_LABEL.to_string(),
            cells,
            total: grand_total,
            total_percentage: percent_of(grand_total, grand_total),
        })
    }

    /// Period rows in order, followed by the year total row in month view.
    pub fn rows(&self) -> Vec<CrossTabRow> {
        let mut rows: Vec<CrossTabRow> = self
            .periods
            .iter()
            .map(|period| CrossTabRow {
                label: period.clone(),
                cells: self
                    .brands
                    .iter()
                    .map(|brand| CrossTabCell {
                        brand: brand.clone(),
                        value: self.value(period, brand),
                        percentage: self.cell_percentage(period, brand),
                    })
                    .collect(),
                total: self.period_total(period),
                total_percentage: self.period_percentage(period),
            })
            .collect();
        rows.extend(self.year_total_row());
        rows
    }
}

/// `value / total * 100`, or 0 when the total is empty.
pub fn percent_of(value: f64, total: f64) -> f64 {
    if total.abs() < f64::EPSILON {
        return 0.0;
    }
    let percentage = value / total * 100.0;
    if percentage.is_finite() {
        percentage
    } else {
        0.0
    }
}

/// Every view result in one shape so exporters can match on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "lowercase")]
pub enum ViewResult {
    #[serde(rename = "sov")]
    ShareOfVoice(Vec<AggregatedEntry>),
    #[serde(rename = "adtype")]
    AdType(Vec<BrandDistribution>),
    #[serde(rename = "mediatype")]
    MediaType(Vec<BrandDistribution>),
    Trend(TrendSeries),
    #[serde(rename = "crosstab")]
    CrossTab(SovTable),
}

impl ViewResult {
    pub fn view(&self) -> ChartView {
        match self {
            ViewResult::ShareOfVoice(_) => ChartView::ShareOfVoice,
            ViewResult::AdType(_) => ChartView::AdType,
            ViewResult::MediaType(_) => ChartView::MediaType,
            ViewResult::Trend(_) => ChartView::Trend,
            ViewResult::CrossTab(_) => ChartView::CrossTab,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ViewResult::ShareOfVoice(entries) => entries.is_empty(),
            ViewResult::AdType(list) | ViewResult::MediaType(list) => list.is_empty(),
            ViewResult::Trend(series) => series.points.is_empty(),
            ViewResult::CrossTab(table) => table.periods.is_empty(),
        }
    }
}

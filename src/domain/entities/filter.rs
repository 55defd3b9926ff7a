use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::entities::record::{RecordField, TransformedRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterDimension {
    FileName,
    Brand,
    Year,
    AdType,
    MediaType,
    Month,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 6] = [
        FilterDimension::FileName,
        FilterDimension::Brand,
        FilterDimension::Year,
        FilterDimension::AdType,
        FilterDimension::MediaType,
        FilterDimension::Month,
    ];

    pub fn field(self) -> RecordField {
        match self {
            FilterDimension::FileName => RecordField::FileName,
            FilterDimension::Brand => RecordField::BrandName,
            FilterDimension::Year => RecordField::Year,
            FilterDimension::AdType => RecordField::AdType,
            FilterDimension::MediaType => RecordField::MediaType,
            FilterDimension::Month => RecordField::Month,
        }
    }
}

/// Selected values per dimension. An empty set leaves that dimension
/// unrestricted; a non-empty set keeps only records whose value is a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartFilterSet {
    pub file_names: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub years: BTreeSet<String>,
    pub ad_types: BTreeSet<String>,
    pub media_types: BTreeSet<String>,
    pub months: BTreeSet<String>,
}

impl ChartFilterSet {
    pub fn values(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::FileName => &self.file_names,
            FilterDimension::Brand => &self.brands,
            FilterDimension::Year => &self.years,
            FilterDimension::AdType => &self.ad_types,
            FilterDimension::MediaType => &self.media_types,
            FilterDimension::Month => &self.months,
        }
    }

    pub fn values_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::FileName => &mut self.file_names,
            FilterDimension::Brand => &mut self.brands,
            FilterDimension::Year => &mut self.years,
            FilterDimension::AdType => &mut self.ad_types,
            FilterDimension::MediaType => &mut self.media_types,
            FilterDimension::Month => &mut self.months,
        }
    }

    pub fn is_active(&self) -> bool {
        FilterDimension::ALL
            .into_iter()
            .any(|dimension| !self.values(dimension).is_empty())
    }

    pub fn matches(&self, record: &TransformedRecord) -> bool {
        FilterDimension::ALL.into_iter().all(|dimension| {
            let selected = self.values(dimension);
            if selected.is_empty() {
                return true;
            }
            record
                .get(dimension.field())
                .is_some_and(|value| selected.contains(value))
        })
    }

    pub fn apply<'a>(&self, records: &'a [TransformedRecord]) -> Vec<&'a TransformedRecord> {
        if !self.is_active() {
            return records.iter().collect();
        }
        records.iter().filter(|record| self.matches(record)).collect()
    }

    /// Selects every value currently offered for each dimension.
    pub fn select_all(options: &FilterOptions) -> Self {
        let mut filters = Self::default();
        for dimension in FilterDimension::ALL {
            filters
                .values_mut(dimension)
                .extend(options.values(dimension).iter().cloned());
        }
        filters
    }
}

/// Distinct values per dimension, used to populate filter pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub file_names: Vec<String>,
    pub brands: Vec<String>,
    pub years: Vec<String>,
    pub ad_types: Vec<String>,
    pub media_types: Vec<String>,
    pub months: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[TransformedRecord]) -> Self {
        let first = records.first();
        let carries = |field: RecordField| first.is_some_and(|record| record.has(field));

        let mut years = distinct(records, RecordField::Year);
        years.sort();

        Self {
            file_names: distinct(records, RecordField::FileName),
            brands: distinct(records, RecordField::BrandName),
            years,
            ad_types: if carries(RecordField::AdType) {
                distinct(records, RecordField::AdType)
            } else {
                Vec::new()
            },
            media_types: if carries(RecordField::MediaType) {
                distinct(records, RecordField::MediaType)
            } else {
                Vec::new()
            },
            months: distinct(records, RecordField::Month),
        }
    }

    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::FileName => &self.file_names,
            FilterDimension::Brand => &self.brands,
            FilterDimension::Year => &self.years,
            FilterDimension::AdType => &self.ad_types,
            FilterDimension::MediaType => &self.media_types,
            FilterDimension::Month => &self.months,
        }
    }
}

fn distinct(records: &[TransformedRecord], field: RecordField) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| record.get(field))
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file: &str, brand: &str, ad_type: Option<&str>, year: &str) -> TransformedRecord {
        TransformedRecord {
            file_name: file.to_string(),
            brand_name: Some(brand.to_string()),
            media_type: None,
            ad_type: ad_type.map(str::to_string),
            year: year.to_string(),
            month: "January".to_string(),
            impression: "10".to_string(),
        }
    }

    #[test]
    fn empty_filter_set_passes_everything_through() {
        let records = vec![
            record("a", "X", None, "2024"),
            record("b", "Y", None, "2023"),
        ];
        let filters = ChartFilterSet::default();
        assert!(!filters.is_active());
        assert_eq!(filters.apply(&records).len(), 2);
    }

    #[test]
    fn dimensions_combine_with_and_values_with_or() {
        let records = vec![
            record("a", "X", None, "2024"),
            record("a", "Y", None, "2024"),
            record("b", "X", None, "2023"),
            record("c", "Z", None, "2024"),
        ];
        let mut filters = ChartFilterSet::default();
        filters.brands.extend(["X".to_string(), "Y".to_string()]);
        filters.years.insert("2024".to_string());

        let kept = filters.apply(&records);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.year == "2024"));
    }

    #[test]
    fn selected_dimension_excludes_records_without_that_field() {
        let records = vec![record("a", "X", None, "2024")];
        let mut filters = ChartFilterSet::default();
        filters.ad_types.insert("Banner".to_string());
        assert!(filters.apply(&records).is_empty());
    }

    #[test]
    fn options_keep_first_occurrence_order_and_sort_years() {
        let records = vec![
            record("b.xlsx", "Y", Some("Video"), "2024"),
            record("a.xlsx", "X", Some(""), "2022"),
            record("b.xlsx", "Y", Some("Banner"), "2023"),
        ];
        let options = FilterOptions::from_records(&records);
        assert_eq!(options.file_names, vec!["b.xlsx", "a.xlsx"]);
        assert_eq!(options.brands, vec!["Y", "X"]);
        assert_eq!(options.years, vec!["2022", "2023", "2024"]);
        assert_eq!(options.ad_types, vec!["Video", "Banner"]);
        assert!(options.media_types.is_empty(), "records carry no media type");
    }
}

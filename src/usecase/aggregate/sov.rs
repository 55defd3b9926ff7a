use crate::config::ViewSettings;
use crate::domain::entities::aggregate::{percent_of, AggregatedEntry};
use crate::domain::entities::record::TransformedRecord;
use crate::usecase::aggregate::bucket::fold_entries;
use crate::usecase::aggregate::numeric::parse_impression;
use crate::usecase::aggregate::{brand_key, Tally};

/// Brand totals before Top-N bucketing.
#[derive(Debug, Clone, PartialEq)]
pub struct SovRanking {
    /// Sum over every brand, including ones later dropped by the threshold.
    pub total: f64,
    pub entries: Vec<AggregatedEntry>,
}

/// Impressions per brand ranked by value. Brands with no positive volume
/// or a share below `min_percentage` are left out.
pub fn brand_totals(records: &[&TransformedRecord], min_percentage: f64) -> SovRanking {
    let mut tally = Tally::default();
    for record in records {
        tally.add(brand_key(record), parse_impression(&record.impression));
    }
    let total = tally.total();

    let mut entries: Vec<AggregatedEntry> = tally
        .into_entries()
        .into_iter()
        .map(|(name, value)| {
            let percentage = if total > 0.0 {
                percent_of(value, total)
            } else {
                0.0
            };
            AggregatedEntry::new(name, value, percentage)
        })
        .filter(|entry| entry.value > 0.0 && entry.percentage >= min_percentage)
        .collect();
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));

    SovRanking { total, entries }
}

pub fn share_of_voice(
    records: &[&TransformedRecord],
    settings: &ViewSettings,
) -> Vec<AggregatedEntry> {
    let ranking = brand_totals(records, settings.min_percentage);
    fold_entries(ranking.entries, settings.sov_max_brands, ranking.total)
}

/// Named brands kept by the SOV cut, in rank order.
pub fn selected_brands(entries: &[AggregatedEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| !entry.is_bucket())
        .map(|entry| entry.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: Option<&str>, impression: &str) -> TransformedRecord {
        TransformedRecord {
            file_name: "f".to_string(),
            brand_name: brand.map(str::to_string),
            media_type: None,
            ad_type: None,
            year: "2024".to_string(),
            month: "January".to_string(),
            impression: impression.to_string(),
        }
    }

    #[test]
    fn ranks_brands_and_buckets_tail() {
        let records = vec![
            record(Some("C"), "100"),
            record(Some("A"), "300"),
            record(Some("B"), "200"),
            record(Some("A"), "400"),
        ];
        let refs: Vec<&TransformedRecord> = records.iter().collect();
        let settings = ViewSettings {
            sov_max_brands: 2,
            ..ViewSettings::default()
        };

        let entries = share_of_voice(&refs, &settings);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "A");
        assert_eq!(entries[0].value, 700.0);
        assert!((entries[0].percentage - 70.0).abs() < 1e-9);
        assert_eq!(entries[1].name, "Others (2 brands)");
        assert_eq!(entries[1].value, 300.0);
        assert!((entries[1].percentage - 30.0).abs() < 1e-9);
        assert_eq!(entries[1].other_names, vec!["B", "C"]);
        assert_eq!(selected_brands(&entries), vec!["A"]);
    }

    #[test]
    fn blank_brands_group_as_unknown_and_junk_counts_zero() {
        let records = vec![
            record(None, "1,000"),
            record(Some(""), "500"),
            record(Some("X"), "abc"),
        ];
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let ranking = brand_totals(&refs, 0.0);

        assert_eq!(ranking.total, 1500.0);
        assert_eq!(ranking.entries.len(), 1, "zero-volume brands are dropped");
        assert_eq!(ranking.entries[0].name, "Unknown");
        assert_eq!(ranking.entries[0].percentage, 100.0);
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let records: Vec<TransformedRecord> = (1..=7)
            .map(|idx| record(Some(&format!("B{idx}")), &(idx * 37).to_string()))
            .collect();
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let entries = share_of_voice(&refs, &ViewSettings::default());
        let sum: f64 = entries.iter().map(|e| e.percentage).sum();

        assert!((sum - 100.0).abs() < 0.1, "sum was {sum}");
    }

    #[test]
    fn threshold_excludes_small_brands_before_ranking() {
        let records = vec![record(Some("A"), "990"), record(Some("B"), "10")];
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let ranking = brand_totals(&refs, 5.0);

        assert_eq!(ranking.entries.len(), 1);
        assert_eq!(ranking.entries[0].name, "A");
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let records = vec![record(Some("Y"), "5"), record(Some("X"), "5")];
        let refs: Vec<&TransformedRecord> = records.iter().collect();
        let names: Vec<String> = brand_totals(&refs, 0.0)
            .entries
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Y", "X"]);
    }

    #[test]
    fn empty_input_yields_no_entries() {
        assert!(share_of_voice(&[], &ViewSettings::default()).is_empty());
    }
}

use std::collections::HashMap;

use crate::domain::entities::aggregate::{percent_of, BrandDistribution, CategoryShare};
use crate::domain::entities::record::{RecordField, TransformedRecord};
use crate::usecase::aggregate::numeric::parse_impression;
use crate::usecase::aggregate::{brand_key, Tally, UNKNOWN};

/// Per-brand split of impressions across `field` (ad type or media type).
/// Each share is relative to that brand's own total, not the grand total.
/// Only positive measures count. Brands are ranked by their total, largest
/// first.
pub fn brand_distribution(
    records: &[&TransformedRecord],
    field: RecordField,
) -> Vec<BrandDistribution> {
    let mut brands: Vec<String> = Vec::new();
    let mut by_brand: HashMap<String, Tally> = HashMap::new();

    for record in records {
        let value = parse_impression(&record.impression);
        if value <= 0.0 {
            continue;
        }
        let brand = brand_key(record);
        let category = record
            .get(field)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN);
        let tally = by_brand.entry(brand.to_string()).or_insert_with(|| {
            brands.push(brand.to_string());
            Tally::default()
        });
        tally.add(category, value);
    }

    let mut result: Vec<BrandDistribution> = brands
        .into_iter()
        .filter_map(|name| {
            let tally = by_brand.remove(&name)?;
            let total = tally.total();
            if total == 0.0 {
                return None;
            }
            let shares = tally
                .into_entries()
                .into_iter()
                .map(|(category, value)| CategoryShare {
                    category,
                    percentage: percent_of(value, total),
                    value,
                })
                .collect();
            Some(BrandDistribution {
                name,
                total,
                shares,
                other_names: Vec::new(),
            })
        })
        .collect();
    result.sort_by(|a, b| b.total.total_cmp(&a.total));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: &str, ad_type: &str, impression: &str) -> TransformedRecord {
        TransformedRecord {
            file_name: "f".to_string(),
            brand_name: Some(brand.to_string()),
            media_type: None,
            ad_type: Some(ad_type.to_string()),
            year: "2024".to_string(),
            month: "January".to_string(),
            impression: impression.to_string(),
        }
    }

    #[test]
    fn shares_are_normalised_per_brand() {
        let records = vec![
            record("A", "Video", "75"),
            record("A", " Banner ", "25"),
            record("B", "Video", "1,000"),
        ];
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let dist = brand_distribution(&refs, RecordField::AdType);

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].name, "B", "largest brand first");
        assert_eq!(dist[0].share("Video").map(|s| s.percentage), Some(100.0));
        let banner = dist[1].share("Banner").expect("trimmed category");
        assert_eq!(banner.value, 25.0);
        assert!((banner.percentage - 25.0).abs() < 1e-9);
        let sum: f64 = dist[1].shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.1);
    }

    #[test]
    fn missing_category_is_unknown_and_zero_brands_drop() {
        let records = vec![record("A", "", "10"), record("Z", "Video", "0")];
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let dist = brand_distribution(&refs, RecordField::AdType);

        assert_eq!(dist.len(), 1);
        assert_eq!(dist[0].shares[0].category, "Unknown");
    }

    #[test]
    fn zero_and_negative_measures_are_ignored() {
        let records = vec![
            record("A", "Video", "100"),
            record("A", "Banner", "0"),
            record("B", "Video", "100"),
            record("B", "Print", "-50"),
            record("C", "Video", "50"),
            record("C", "Print", "-50"),
        ];
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let dist = brand_distribution(&refs, RecordField::AdType);

        assert_eq!(dist.len(), 3, "offsetting values do not cancel a brand out");
        for brand in &dist {
            assert_eq!(brand.shares.len(), 1, "brand {}", brand.name);
            assert_eq!(brand.shares[0].category, "Video");
            assert_eq!(brand.shares[0].percentage, 100.0);
        }
        assert_eq!(dist[0].total, 100.0);
        assert_eq!(dist[2].name, "C");
        assert_eq!(dist[2].total, 50.0);
    }

    #[test]
    fn absent_field_groups_everything_as_unknown() {
        let records = vec![record("A", "Video", "10")];
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let dist = brand_distribution(&refs, RecordField::MediaType);

        assert_eq!(dist[0].shares.len(), 1);
        assert_eq!(dist[0].shares[0].category, "Unknown");
    }
}

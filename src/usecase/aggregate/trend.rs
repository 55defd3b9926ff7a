use std::collections::{HashMap, HashSet};

use crate::domain::entities::aggregate::{BrandValue, Granularity, TrendPoint, TrendSeries};
use crate::domain::entities::record::TransformedRecord;
use crate::usecase::aggregate::numeric::{parse_impression, period_key, sort_periods};
use crate::usecase::aggregate::{brand_key, Tally};

/// Impressions per period for the given brands. The brand list comes from
/// the SOV ranking so both views show the same brands.
pub fn brand_trend(
    records: &[&TransformedRecord],
    brands: &[String],
    granularity: Granularity,
) -> TrendSeries {
    let selected: HashSet<&str> = brands.iter().map(String::as_str).collect();
    let mut periods: Vec<String> = Vec::new();
    let mut by_period: HashMap<String, Tally> = HashMap::new();

    for record in records {
        let period = period_key(record, granularity);
        let tally = by_period.entry(period.to_string()).or_insert_with(|| {
            periods.push(period.to_string());
            Tally::default()
        });
        let brand = brand_key(record);
        if selected.contains(brand) {
            tally.add(brand, parse_impression(&record.impression));
        }
    }

    sort_periods(&mut periods, granularity);

    let points = periods
        .into_iter()
        .map(|period| {
            let tally = by_period.remove(&period).unwrap_or_default();
            let values = brands
                .iter()
                .map(|brand| BrandValue {
                    brand: brand.clone(),
                    value: tally.get(brand),
                })
                .collect();
            TrendPoint { period, values }
        })
        .collect();

    TrendSeries {
        granularity,
        brands: brands.to_vec(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: &str, year: &str, month: &str, impression: &str) -> TransformedRecord {
        TransformedRecord {
            file_name: "f".to_string(),
            brand_name: Some(brand.to_string()),
            media_type: None,
            ad_type: None,
            year: year.to_string(),
            month: month.to_string(),
            impression: impression.to_string(),
        }
    }

    #[test]
    fn month_view_uses_calendar_order_and_selected_brands() {
        let records = vec![
            record("A", "2024", "March", "10"),
            record("B", "2024", "January", "5"),
            record("A", "2024", "January", "20"),
            record("C", "2024", "February", "99"),
        ];
        let refs: Vec<&TransformedRecord> = records.iter().collect();
        let brands = vec!["A".to_string(), "B".to_string()];

        let series = brand_trend(&refs, &brands, Granularity::Month);

        let periods: Vec<&str> = series.points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["January", "February", "March"]);
        assert_eq!(series.points[0].value("A"), 20.0);
        assert_eq!(series.points[0].value("B"), 5.0);
        assert_eq!(series.points[1].value("A"), 0.0, "C is not a selected brand");
        assert_eq!(series.points[1].value("C"), 0.0);
    }

    #[test]
    fn year_view_sums_months_in_ascending_years() {
        let records = vec![
            record("A", "2024", "January", "1"),
            record("A", "2023", "May", "2"),
            record("A", "2024", "June", "3"),
        ];
        let refs: Vec<&TransformedRecord> = records.iter().collect();

        let series = brand_trend(&refs, &["A".to_string()], Granularity::Year);

        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].period, "2023");
        assert_eq!(series.points[1].value("A"), 4.0);
    }
}

use std::collections::BTreeMap;

use crate::domain::entities::aggregate::{Granularity, SovTable};
use crate::domain::entities::record::TransformedRecord;
use crate::usecase::aggregate::numeric::{parse_impression, period_key, sort_periods};
use crate::usecase::aggregate::{brand_key, Tally};

/// Period × brand sums with per-period totals. Brands are ordered by their
/// overall volume, periods by calendar (month) or number (year).
pub fn sov_table(records: &[&TransformedRecord], granularity: Granularity) -> SovTable {
    let mut period_totals = Tally::default();
    let mut brand_totals = Tally::default();
    let mut data: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for record in records {
        let period = period_key(record, granularity);
        let brand = brand_key(record);
        let value = parse_impression(&record.impression);

        period_totals.add(period, value);
        brand_totals.add(brand, value);
        *data
            .entry(period.to_string())
            .or_default()
            .entry(brand.to_string())
            .or_insert(0.0) += value;
    }

    let mut periods = period_totals.keys().to_vec();
    sort_periods(&mut periods, granularity);

    let mut ranked_brands = brand_totals.into_entries();
    ranked_brands.sort_by(|a, b| b.1.total_cmp(&a.1));

    SovTable {
        granularity,
        periods,
        brands: ranked_brands.into_iter().map(|(brand, _)| brand).collect(),
        data,
        totals: period_totals.into_entries().into_iter().collect(),
    }
}

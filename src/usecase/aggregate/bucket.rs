use crate::domain::entities::aggregate::{
    percent_of, AggregatedEntry, BrandDistribution, CategoryShare,
};
use crate::usecase::aggregate::Tally;

pub fn others_label(count: usize) -> String {
    format!("Others ({count} brands)")
}

/// Keeps the first `max_count - 1` ranked entries and folds the rest into
/// one "Others" entry measured against the same `denominator`.
/// A `max_count` of zero disables bucketing.
pub fn fold_entries(
    mut ranked: Vec<AggregatedEntry>,
    max_count: usize,
    denominator: f64,
) -> Vec<AggregatedEntry> {
    if max_count == 0 || ranked.len() <= max_count {
        return ranked;
    }

    let folded = ranked.split_off(max_count - 1);
    let value: f64 = folded.iter().map(|entry| entry.value).sum();
    ranked.push(AggregatedEntry {
        name: others_label(folded.len()),
        value,
        percentage: percent_of(value, denominator),
        other_names: folded.into_iter().map(|entry| entry.name).collect(),
    });
    ranked
}

/// Same cut as [`fold_entries`] for per-brand distributions. The bucket's
/// categories are summed across the folded brands and re-normalised
/// against the bucket's own total.
pub fn fold_distributions(
    mut ranked: Vec<BrandDistribution>,
    max_count: usize,
) -> Vec<BrandDistribution> {
    if max_count == 0 || ranked.len() <= max_count {
        return ranked;
    }

    let folded = ranked.split_off(max_count - 1);
    let mut categories = Tally::default();
    for share in folded.iter().flat_map(|item| item.shares.iter()) {
        categories.add(&share.category, share.value);
    }
    let total = categories.total();

    ranked.push(BrandDistribution {
        name: others_label(folded.len()),
        total,
        shares: categories
            .into_entries()
            .into_iter()
            .map(|(category, value)| CategoryShare {
                category,
                percentage: percent_of(value, total),
                value,
            })
            .collect(),
        other_names: folded.into_iter().map(|item| item.name).collect(),
    });
    ranked
}

use std::cmp::Ordering;

use crate::domain::entities::dataset::{PageResult, PageRow, SortDirection, SortSpec, TableState};
use crate::domain::entities::record::{RecordField, TransformedRecord};
use crate::usecase::aggregate::numeric::{month_sort_key, parse_impression, parse_year};

/// Compares two records on one column using that column's natural order.
pub fn compare_field(a: &TransformedRecord, b: &TransformedRecord, field: RecordField) -> Ordering {
    let text = |record: &TransformedRecord| record.get(field).unwrap_or_default().to_lowercase();
    match field {
        RecordField::Year => parse_year(&a.year).cmp(&parse_year(&b.year)),
        RecordField::Month => month_sort_key(&a.month).cmp(&month_sort_key(&b.month)),
        RecordField::Impression => {
            parse_impression(&a.impression).total_cmp(&parse_impression(&b.impression))
        }
        _ => text(a).cmp(&text(b)),
    }
}

/// Record indices in display order. Ascending is a stable sort and
/// descending is its exact reverse.
pub fn sorted_indices(records: &[TransformedRecord], sort: Option<SortSpec>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    if let Some(spec) = sort {
        indices.sort_by(|&a, &b| compare_field(&records[a], &records[b], spec.field));
        if spec.direction == SortDirection::Desc {
            indices.reverse();
        }
    }
    indices
}

pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// Slice of the sorted table for `state.page` (1-based, clamped).
pub fn page(
    records: &[TransformedRecord],
    fields: &[RecordField],
    columns: Vec<String>,
    state: &TableState,
) -> PageResult {
    let order = sorted_indices(records, state.sort);
    let total_rows = order.len();
    let total_pages = total_pages(total_rows, state.page_size);
    let page = state.page.clamp(1, total_pages);
    let start = (page - 1) * state.page_size;

    let rows = order
        .into_iter()
        .skip(start)
        .take(state.page_size)
        .map(|index| PageRow {
            index,
            values: fields
                .iter()
                .map(|field| records[index].get(*field).unwrap_or_default().to_string())
                .collect(),
        })
        .collect();

    PageResult {
        columns,
        rows,
        total_rows,
        page,
        total_pages,
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

    fn fixture() -> Vec<TransformedRecord> {
        vec![
            record("beta", "2024", "March", "1,000"),
            record("Alpha", "2023", "Smarch", "20"),
            record("gamma", "2024", "January", "300"),
            record("alpha", "2022", "January", "9"),
        ]
    }

    fn spec(field: RecordField, direction: SortDirection) -> Option<SortSpec> {
        Some(SortSpec { field, direction })
    }

    #[test]
    fn names_compare_case_insensitively() {
        let records = fixture();
        let order = sorted_indices(&records, spec(RecordField::BrandName, SortDirection::Asc));
        assert_eq!(order, vec![1, 3, 0, 2], "ties keep collection order");
    }

    #[test]
    fn months_follow_calendar_with_unknown_last() {
        let records = fixture();
        let order = sorted_indices(&records, spec(RecordField::Month, SortDirection::Asc));
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn impressions_compare_numerically() {
        let records = fixture();
        let order = sorted_indices(&records, spec(RecordField::Impression, SortDirection::Asc));
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn descending_is_exact_reverse_of_ascending() {
        let records = fixture();
        for field in [RecordField::Year, RecordField::BrandName, RecordField::FileName] {
            let mut asc = sorted_indices(&records, spec(field, SortDirection::Asc));
            let desc = sorted_indices(&records, spec(field, SortDirection::Desc));
            asc.reverse();
            assert_eq!(asc, desc, "field {field:?}");
        }
    }

    #[test]
    fn toggling_flips_same_key_and_resets_new_key() {
        let first = SortSpec::toggled(None, RecordField::Year);
        assert_eq!(first.direction, SortDirection::Asc);
        let second = SortSpec::toggled(Some(first), RecordField::Year);
        assert_eq!(second.direction, SortDirection::Desc);
        let third = SortSpec::toggled(Some(second), RecordField::Year);
        assert_eq!(third.direction, SortDirection::Asc);
        let other = SortSpec::toggled(Some(second), RecordField::Month);
        assert_eq!(other.direction, SortDirection::Asc);
    }

    #[test]
    fn page_slices_sorted_rows() {
        let records = fixture();
        let fields = vec![RecordField::BrandName, RecordField::Impression];
        let state = TableState {
            sort: spec(RecordField::Impression, SortDirection::Desc),
            page: 2,
            page_size: 3,
        };

        let result = page(&records, &fields, vec!["Brand".into(), "Imp".into()], &state);

        assert_eq!(result.total_rows, 4);
        assert_eq!(result.total_pages, 2);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].index, 3);
        assert_eq!(result.rows[0].values, vec!["alpha", "9"]);
    }

    #[test]
    fn page_number_is_clamped() {
        let state = TableState {
            sort: None,
            page: 9,
            page_size: 10,
        };
        let result = page(&[], &[], Vec::new(), &state);
        assert_eq!(result.page, 1);
        assert_eq!(result.total_pages, 1);
        assert!(result.rows.is_empty());
    }
}

use std::io::Write;

use csv::{Writer, WriterBuilder};

use crate::domain::entities::aggregate::{
    distribution_categories, AggregatedEntry, BrandDistribution, DisplayMode, SovTable,
    TrendSeries, ViewResult,
};
use crate::domain::entities::cell::format_number;
use crate::domain::entities::dataset::PageResult;
use crate::error::{EngineError, Result};

type TsvWriter = Writer<Vec<u8>>;

fn tsv_writer(buffer: Vec<u8>) -> TsvWriter {
    WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(buffer)
}

fn finish(writer: TsvWriter) -> Result<String> {
    let buffer = writer
        .into_inner()
        .map_err(|err| EngineError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// The record table as shown: header of display names, then the page rows.
pub fn export_records(page: &PageResult) -> Result<String> {
    let mut writer = tsv_writer(Vec::new());
    writer.write_record(&page.columns)?;
    for row in &page.rows {
        writer.write_record(&row.values)?;
    }
    finish(writer)
}

/// A view result as a titled TSV block. `mode` only affects the cross-tab.
pub fn export_view(result: &ViewResult, mode: DisplayMode) -> Result<String> {
    let mut buffer = Vec::new();
    writeln!(buffer, "{}", result.view().title())?;
    writeln!(buffer)?;

    let mut writer = tsv_writer(buffer);
    match result {
        ViewResult::ShareOfVoice(entries) => write_entries(&mut writer, entries)?,
        ViewResult::AdType(list) | ViewResult::MediaType(list) => {
            write_distributions(&mut writer, list)?
        }
        ViewResult::Trend(series) => write_trend(&mut writer, series)?,
        ViewResult::CrossTab(table) => write_cross_tab(&mut writer, table, mode)?,
    }
    finish(writer)
}

fn write_entries(writer: &mut TsvWriter, entries: &[AggregatedEntry]) -> Result<()> {
    writer.write_record(["Brand", "Impressions", "Percentage", "Grouped Brands"])?;
    for entry in entries {
        writer.write_record([
            entry.name.clone(),
            format_number(entry.value),
            format_percentage(entry.percentage),
            entry.other_names.join(", "),
        ])?;
    }
    Ok(())
}

fn write_distributions(writer: &mut TsvWriter, list: &[BrandDistribution]) -> Result<()> {
    let categories = distribution_categories(list);

    let mut header = vec!["Brand".to_string()];
    header.extend(categories.iter().map(|c| format!("{c} %")));
    header.extend(categories.iter().map(|c| format!("{c} Value")));
    header.push("Grouped Brands".to_string());
    writer.write_record(&header)?;

    for item in list {
        let mut row = vec![item.name.clone()];
        row.extend(categories.iter().map(|c| {
            format_percentage(item.share(c).map_or(0.0, |share| share.percentage))
        }));
        row.extend(
            categories
                .iter()
                .map(|c| format_number(item.share(c).map_or(0.0, |share| share.value))),
        );
        row.push(item.other_names.join(", "));
        writer.write_record(&row)?;
    }
    Ok(())
}

fn write_trend(writer: &mut TsvWriter, series: &TrendSeries) -> Result<()> {
    let mut header = vec!["Period".to_string()];
    header.extend(series.brands.iter().cloned());
    writer.write_record(&header)?;

    for point in &series.points {
        let mut row = vec![point.period.clone()];
        row.extend(series.brands.iter().map(|b| format_number(point.value(b))));
        writer.write_record(&row)?;
    }
    Ok(())
}

fn write_cross_tab(writer: &mut TsvWriter, table: &SovTable, mode: DisplayMode) -> Result<()> {
    let mut header = vec!["Period".to_string()];
    header.extend(table.brands.iter().cloned());
    header.push("Total".to_string());
    header.push("Share of Total".to_string());
    writer.write_record(&header)?;

    for table_row in table.rows() {
        let mut row = vec![table_row.label];
        row.extend(table_row.cells.iter().map(|cell| match mode {
            DisplayMode::Value => format_number(cell.value),
            DisplayMode::Percentage => format_percentage(cell.percentage),
        }));
        row.push(format_number(table_row.total));
        row.push(format_percentage(table_row.total_percentage));
        writer.write_record(&row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::domain::entities::aggregate::{CategoryShare, Granularity};
    use crate::domain::entities::dataset::PageRow;

    #[test]
    fn sov_export_lists_grouped_brands() {
        let mut others = AggregatedEntry::new("Others (2 brands)", 300.0, 30.0);
        others.other_names = vec!["B".to_string(), "C".to_string()];
        let result = ViewResult::ShareOfVoice(vec![AggregatedEntry::new("A", 700.0, 70.0), others]);

        let text = export_view(&result, DisplayMode::Percentage).expect("export");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Share of Voice (SOV) - Impression Distribution");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Brand\tImpressions\tPercentage\tGrouped Brands");
        assert_eq!(lines[3], "A\t700\t70.0%\t");
        assert_eq!(lines[4], "Others (2 brands)\t300\t30.0%\tB, C");
    }

    #[test]
    fn distribution_export_has_percent_then_value_columns() {
        let result = ViewResult::AdType(vec![BrandDistribution {
            name: "A".to_string(),
            total: 400.0,
            shares: vec![
                CategoryShare {
                    category: "Video".to_string(),
                    percentage: 75.0,
                    value: 300.0,
                },
                CategoryShare {
                    category: "Banner".to_string(),
                    percentage: 25.0,
                    value: 100.0,
                },
            ],
            other_names: Vec::new(),
        }]);

        let text = export_view(&result, DisplayMode::Percentage).expect("export");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[2],
            "Brand\tVideo %\tBanner %\tVideo Value\tBanner Value\tGrouped Brands"
        );
        assert_eq!(lines[3], "A\t75.0%\t25.0%\t300\t100\t");
    }

    #[test]
    fn cross_tab_export_honors_display_mode() {
        let mut data = BTreeMap::new();
        data.insert(
            "January".to_string(),
            BTreeMap::from([("A".to_string(), 30.0), ("B".to_string(), 10.0)]),
        );
        let table = SovTable {
            granularity: Granularity::Month,
            periods: vec!["January".to_string()],
            brands: vec!["A".to_string(), "B".to_string()],
            data,
            totals: BTreeMap::from([("January".to_string(), 40.0)]),
        };
        let result = ViewResult::CrossTab(table);

        let pct = export_view(&result, DisplayMode::Percentage).expect("export");
        let values = export_view(&result, DisplayMode::Value).expect("export");

        assert!(pct.contains("January\t75.0%\t25.0%\t40\t100.0%"));
        assert!(values.contains("January\t30\t10\t40\t100.0%"));
        assert!(values.contains("Year Total\t30\t10\t40\t100.0%"));
    }

    #[test]
    fn records_export_writes_header_and_rows() {
        let page = PageResult {
            columns: vec!["Brand Name".to_string(), "Impression (ad contact)".to_string()],
            rows: vec![PageRow {
                index: 0,
                values: vec!["A".to_string(), "1,000".to_string()],
            }],
            total_rows: 1,
            page: 1,
            total_pages: 1,
        };

        let text = export_records(&page).expect("export");

        assert_eq!(text, "Brand Name\tImpression (ad contact)\nA\t1,000\n");
    }
}

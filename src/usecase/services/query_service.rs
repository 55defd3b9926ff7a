use crate::domain::entities::aggregate::{
    AggregatedEntry, BrandDistribution, ChartView, SovTable, TrendSeries, ViewResult,
};
use crate::domain::entities::dataset::{PageResult, TableState};
use crate::domain::entities::filter::FilterOptions;
use crate::domain::entities::record::RecordField;
use crate::session::Session;
use crate::usecase::aggregate::aggregate;
use crate::usecase::table;

/// Read side of a session: chart views and the record table.
pub struct QueryService<'s> {
    session: &'s Session,
}

impl<'s> QueryService<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn view(&self, view: ChartView) -> ViewResult {
        aggregate(
            self.session.records(),
            self.session.filters(),
            view,
            self.session.view_settings(),
        )
    }

    pub fn active_view(&self) -> ViewResult {
        self.view(self.session.active_view())
    }

    /// Every view the records can feed; distribution views need their field.
    pub fn available_views(&self) -> Vec<ChartView> {
        ChartView::ALL
            .into_iter()
            .filter(|view| match view {
                ChartView::AdType => self.session.has_field(RecordField::AdType),
                ChartView::MediaType => self.session.has_field(RecordField::MediaType),
                _ => true,
            })
            .collect()
    }

    pub fn share_of_voice(&self) -> Vec<AggregatedEntry> {
        match self.view(ChartView::ShareOfVoice) {
            ViewResult::ShareOfVoice(entries) => entries,
            _ => Vec::new(),
        }
    }

    pub fn ad_type(&self) -> Vec<BrandDistribution> {
        match self.view(ChartView::AdType) {
            ViewResult::AdType(list) => list,
            _ => Vec::new(),
        }
    }

    pub fn media_type(&self) -> Vec<BrandDistribution> {
        match self.view(ChartView::MediaType) {
            ViewResult::MediaType(list) => list,
            _ => Vec::new(),
        }
    }

    pub fn trend(&self) -> Option<TrendSeries> {
        match self.view(ChartView::Trend) {
            ViewResult::Trend(series) => Some(series),
            _ => None,
        }
    }

    pub fn cross_tab(&self) -> Option<SovTable> {
        match self.view(ChartView::CrossTab) {
            ViewResult::CrossTab(table) => Some(table),
            _ => None,
        }
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.session.filter_options()
    }

    /// Current page of the unfiltered record table, sorted per table state.
    pub fn table_page(&self) -> PageResult {
        table::page(
            self.session.records(),
            &self.session.fields(),
            self.session.display_columns(),
            self.session.table(),
        )
    }

    /// All records in table sort order, as one page; used for exports.
    pub fn full_table(&self) -> PageResult {
        let state = TableState {
            sort: self.session.table().sort,
            page: 1,
            page_size: self.session.records().len().max(1),
        };
        table::page(
            self.session.records(),
            &self.session.fields(),
            self.session.display_columns(),
            &state,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::UploadedFile;
    use crate::domain::entities::filter::FilterDimension;
    use crate::domain::entities::record::TransformedRecord;
    use chrono::Local;

    fn record(brand: &str, ad_type: &str, impression: &str) -> TransformedRecord {
        TransformedRecord {
            file_name: "a.xlsx".to_string(),
            brand_name: Some(brand.to_string()),
            media_type: Some("Online".to_string()),
            ad_type: Some(ad_type.to_string()),
            year: "2024".to_string(),
            month: "January".to_string(),
            impression: impression.to_string(),
        }
    }

    fn session() -> Session {
        let mut session = Session::default();
        session.append_records(
            UploadedFile {
                name: "a.xlsx".to_string(),
                size_bytes: Some(10),
                rows_added: 3,
                uploaded_at: Local::now(),
            },
            vec![
                record("A", "Video", "700"),
                record("B", "Banner", "200"),
                record("A", "Banner", "100"),
            ],
        );
        session
    }

    #[test]
    fn views_respect_session_filters() {
        let mut session = session();
        session.toggle_filter(FilterDimension::AdType, "Banner", true);
        let query = QueryService::new(&session);

        let sov = query.share_of_voice();
        assert_eq!(sov.len(), 2);
        assert_eq!(sov[0].name, "B");
        assert_eq!(sov[0].value, 200.0);
    }

    #[test]
    fn table_page_is_not_filtered() {
        let mut session = session();
        session.toggle_filter(FilterDimension::Brand, "B", true);
        session.sort_by(RecordField::Impression);
        let page = QueryService::new(&session).table_page();

        assert_eq!(page.total_rows, 3);
        assert_eq!(page.rows[0].index, 2);
        assert_eq!(page.columns.len(), 7);
    }

    #[test]
    fn full_table_ignores_paging() {
        let mut session = session();
        session.set_page_size(1);
        session.set_page(2);
        let table = QueryService::new(&session).full_table();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.total_pages, 1);
    }

    #[test]
    fn all_views_available_with_full_records() {
        let session = session();
        assert_eq!(QueryService::new(&session).available_views(), ChartView::ALL.to_vec());
        assert!(QueryService::new(&Session::default()).ad_type().is_empty());
    }
}

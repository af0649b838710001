use contracts::dashboards::d402_sales_overview::{
    FilterOptions, MetricCard, SalesFilter, SalesOverviewResponse, TOP_SELLERS_MAX,
    TOP_SELLERS_MIN, TOP_STATES,
};

use super::aggregation;
use super::SalesOverviewError;
use crate::shared::format::format_compact;
use crate::shared::sales_api::{ProviderQuery, SalesDataProvider};

/// Fetch -> filter -> aggregate for one set of filters
///
/// Blocks on the provider. Nothing is cached: every call fetches again.
pub fn get_sales_overview(
    provider: &dyn SalesDataProvider,
    filter: SalesFilter,
) -> Result<SalesOverviewResponse, SalesOverviewError> {
    validate(&filter)?;

    let query = ProviderQuery {
        region: filter.region,
        year: filter.year,
    };
    let fetched = provider.fetch(&query)?;
    let available_sellers = aggregation::unique_sellers(&fetched);

    let records = aggregation::filter_by_sellers(fetched, &filter.sellers);
    if records.is_empty() {
        tracing::warn!(
            "D402 Dashboard: no sales for region='{}' year={:?} sellers={:?}",
            filter.region,
            filter.year,
            filter.sellers
        );
    }

    let total_revenue = aggregation::total_revenue(&records);
    let sales_count = records.len();

    let revenue_by_state = aggregation::revenue_by_state(&records);
    let top_states = aggregation::top_states(&revenue_by_state, TOP_STATES);
    let monthly_revenue = aggregation::monthly_revenue(&records);
    let monthly_revenue_range = aggregation::revenue_range(&monthly_revenue);
    let revenue_by_category = aggregation::revenue_by_category(&records);
    let sellers = aggregation::seller_summary(&records);
    let top_sellers = aggregation::top_sellers(&sellers, filter.top_sellers);

    let metrics = vec![
        MetricCard {
            label: "Receita".to_string(),
            value: format_compact(total_revenue, "R$"),
        },
        MetricCard {
            label: "Quantidade de vendas".to_string(),
            value: format_compact(sales_count as f64, ""),
        },
    ];

    Ok(SalesOverviewResponse {
        filter,
        records,
        available_sellers,
        metrics,
        total_revenue,
        sales_count,
        revenue_by_state,
        monthly_revenue,
        monthly_revenue_range,
        top_states,
        revenue_by_category,
        sellers,
        top_sellers,
    })
}

pub fn filter_options() -> FilterOptions {
    FilterOptions::default()
}

fn validate(filter: &SalesFilter) -> Result<(), SalesOverviewError> {
    if !(TOP_SELLERS_MIN..=TOP_SELLERS_MAX).contains(&filter.top_sellers) {
        return Err(SalesOverviewError::InvalidFilter(format!(
            "top_sellers must be between {} and {}, got {}",
            TOP_SELLERS_MIN, TOP_SELLERS_MAX, filter.top_sellers
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_sales_overview::aggregation::tests::{sale, sample};
    use crate::shared::sales_api::SalesApiError;
    use chrono::Datelike;
    use contracts::dashboards::d402_sales_overview::SaleRecord;
    use contracts::enums::Region;
    use std::sync::Mutex;

    /// Serves `sample()` with server-side year filtering and records every query
    struct FakeProvider {
        records: Vec<SaleRecord>,
        queries: Mutex<Vec<ProviderQuery>>,
    }

    impl FakeProvider {
        fn new(records: Vec<SaleRecord>) -> Self {
            Self {
                records,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl SalesDataProvider for FakeProvider {
        fn fetch(&self, query: &ProviderQuery) -> Result<Vec<SaleRecord>, SalesApiError> {
            self.queries.lock().unwrap().push(*query);
            Ok(self
                .records
                .iter()
                .filter(|r| query.year.map_or(true, |y| r.purchase_date.year() == y))
                .cloned()
                .collect())
        }
    }

    struct FailingProvider;

    impl SalesDataProvider for FailingProvider {
        fn fetch(&self, _query: &ProviderQuery) -> Result<Vec<SaleRecord>, SalesApiError> {
            Err(SalesApiError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_unfiltered_overview() {
        let provider = FakeProvider::new(sample());
        let overview = get_sales_overview(&provider, SalesFilter::default()).unwrap();
        assert_eq!(overview.sales_count, 6);
        assert_eq!(overview.total_revenue, 1970.0);
        assert_eq!(overview.metrics[0].value, "R$ 1.97 mil");
        assert_eq!(overview.metrics[1].value, "6.00 ");
        assert_eq!(overview.top_states.len(), 4);
        assert_eq!(overview.top_sellers.len(), 4);
        assert_eq!(overview.available_sellers.len(), 4);
    }

    #[test]
    fn test_region_and_year_go_to_provider() {
        let provider = FakeProvider::new(sample());
        let filter = SalesFilter::default()
            .with_region(Region::Sudeste)
            .with_year(2022);
        let overview = get_sales_overview(&provider, filter).unwrap();
        let queries = provider.queries.lock().unwrap();
        assert_eq!(
            queries.as_slice(),
            &[ProviderQuery {
                region: Region::Sudeste,
                year: Some(2022)
            }]
        );
        assert!(overview.records.iter().all(|r| r.purchase_date.year() == 2022));
        assert_eq!(overview.sales_count, 1);
    }

    #[test]
    fn test_seller_filter_is_local() {
        let provider = FakeProvider::new(sample());
        let filter = SalesFilter::default().with_sellers(["Bruno"]);
        let overview = get_sales_overview(&provider, filter).unwrap();
        assert!(overview.records.iter().all(|r| r.seller == "Bruno"));
        assert_eq!(overview.total_revenue, 290.0);
        // options still list everyone the provider returned
        assert_eq!(overview.available_sellers, vec!["Ana", "Bruno", "Carla", "Diego"]);
        let by_state: f64 = overview.revenue_by_state.iter().map(|s| s.revenue).sum();
        assert!((by_state - overview.total_revenue).abs() < 1e-9);
    }

    #[test]
    fn test_seller_filter_matching_nothing() {
        let provider = FakeProvider::new(sample());
        let filter = SalesFilter::default().with_sellers(["Ninguem"]);
        let overview = get_sales_overview(&provider, filter).unwrap();
        assert!(overview.records.is_empty());
        assert!(overview.revenue_by_state.is_empty());
        assert!(overview.monthly_revenue.is_empty());
        assert!(overview.monthly_revenue_range.is_none());
        assert!(overview.top_sellers.is_empty());
        assert_eq!(overview.metrics[0].value, "R$ 0.00 ");
    }

    #[test]
    fn test_top_sellers_bounds_accepted() {
        let mut records = sample();
        for i in 0..12 {
            records.push(sale("01/06/2021", 10.0 + i as f64, "livros", "SP", &format!("V{i:02}")));
        }
        let provider = FakeProvider::new(records);
        for n in [TOP_SELLERS_MIN, TOP_SELLERS_MAX] {
            let filter = SalesFilter::default().with_top_sellers(n);
            let overview = get_sales_overview(&provider, filter).unwrap();
            assert_eq!(overview.top_sellers.len(), n);
            assert_eq!(overview.top_sellers[..], overview.sellers[..n]);
        }
    }

    #[test]
    fn test_top_sellers_out_of_range_rejected() {
        let provider = FakeProvider::new(sample());
        for n in [0, 1, 11] {
            let filter = SalesFilter::default().with_top_sellers(n);
            let err = get_sales_overview(&provider, filter).unwrap_err();
            assert!(matches!(err, SalesOverviewError::InvalidFilter(_)));
        }
        assert!(provider.queries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_provider_failure_propagates() {
        let err = get_sales_overview(&FailingProvider, SalesFilter::default()).unwrap_err();
        assert!(matches!(
            err,
            SalesOverviewError::Provider(SalesApiError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn test_same_filters_same_tables() {
        let provider = FakeProvider::new(sample());
        let filter = SalesFilter::default().with_sellers(["Ana", "Carla"]);
        let first = get_sales_overview(&provider, filter.clone()).unwrap();
        let second = get_sales_overview(&provider, filter).unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.queries.lock().unwrap().len(), 2);
    }
}

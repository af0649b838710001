use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers;
use crate::shared::sales_api::SalesDataProvider;

/// Состояние, общее для всех обработчиков
#[derive(Clone)]
pub struct AppState {
    pub sales_provider: Arc<dyn SalesDataProvider>,
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // DASHBOARDS
        // ========================================
        // D402 Sales Overview Dashboard
        .route(
            "/api/d402/sales_overview",
            get(handlers::d402_sales_overview::get_sales_overview),
        )
        .route(
            "/api/d402/filter_options",
            get(handlers::d402_sales_overview::get_filter_options),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_sales_overview::aggregation::tests::sample;
    use crate::shared::sales_api::{ProviderQuery, SalesApiError};
    use contracts::dashboards::d402_sales_overview::{
        FilterOptions, SaleRecord, SalesOverviewResponse,
    };
    use contracts::enums::Region;

    struct StaticProvider(Vec<SaleRecord>);

    impl SalesDataProvider for StaticProvider {
        fn fetch(&self, query: &ProviderQuery) -> Result<Vec<SaleRecord>, SalesApiError> {
            if query.region == Region::Norte {
                return Err(SalesApiError::Status {
                    status: 500,
                    body: "falha".to_string(),
                });
            }
            Ok(self.0.clone())
        }
    }

    async fn spawn_app() -> String {
        let state = AppState {
            sales_provider: Arc::new(StaticProvider(sample())),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, configure_routes(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_health() {
        let base = spawn_app().await;
        let body = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_sales_overview_endpoint() {
        let base = spawn_app().await;
        let response = reqwest::get(format!(
            "{base}/api/d402/sales_overview?region=sudeste&year=&sellers=Ana,Bruno&top_sellers=2"
        ))
        .await
        .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let overview: SalesOverviewResponse = response.json().await.unwrap();
        assert_eq!(overview.filter.region, Region::Sudeste);
        assert_eq!(overview.filter.year, None);
        assert_eq!(overview.sales_count, 4);
        assert_eq!(overview.top_sellers.len(), 2);
        assert_eq!(overview.top_sellers[0].seller, "Bruno");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_sales_overview_bad_requests() {
        let base = spawn_app().await;
        for query in ["top_sellers=11", "region=leste", "year=dois-mil"] {
            let response = reqwest::get(format!("{base}/api/d402/sales_overview?{query}"))
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 400, "{query}");
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_sales_overview_provider_failure() {
        let base = spawn_app().await;
        let response = reqwest::get(format!("{base}/api/d402/sales_overview?region=norte"))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 502);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_filter_options_endpoint() {
        let base = spawn_app().await;
        let options: FilterOptions = reqwest::get(format!("{base}/api/d402/filter_options"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(options, FilterOptions::default());
    }
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d402_sales_overview::{
    FilterOptions, SalesFilter, SalesOverviewRequest, SalesOverviewResponse,
};
use std::sync::Arc;

use crate::dashboards::d402_sales_overview::{service, SalesOverviewError};
use crate::routes::AppState;

/// GET /api/d402/sales_overview?region=sudeste&year=2022&sellers=Ana,Bruno&top_sellers=5
pub async fn get_sales_overview(
    State(state): State<AppState>,
    Query(request): Query<SalesOverviewRequest>,
) -> Result<Json<SalesOverviewResponse>, StatusCode> {
    let filter = match SalesFilter::try_from(request) {
        Ok(filter) => filter,
        Err(e) => {
            tracing::warn!("D402 Dashboard: Rejected request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    tracing::info!(
        "D402 Dashboard: Getting sales overview (region='{}', year={:?}, {} sellers selected, top {})",
        filter.region,
        filter.year,
        filter.sellers.len(),
        filter.top_sellers
    );

    let provider = Arc::clone(&state.sales_provider);
    let result =
        tokio::task::spawn_blocking(move || service::get_sales_overview(provider.as_ref(), filter))
            .await;

    match result {
        Ok(Ok(response)) => {
            tracing::info!(
                "D402 Dashboard: Returning {} records, {} states, {} months",
                response.sales_count,
                response.revenue_by_state.len(),
                response.monthly_revenue.len()
            );
            Ok(Json(response))
        }
        Ok(Err(SalesOverviewError::InvalidFilter(e))) => {
            tracing::warn!("D402 Dashboard: Invalid filter: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
        Ok(Err(SalesOverviewError::Provider(e))) => {
            tracing::error!("D402 Dashboard: Sales API failed: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
        Err(e) => {
            tracing::error!("D402 Dashboard: Pipeline task failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d402/filter_options
pub async fn get_filter_options() -> Json<FilterOptions> {
    Json(service::filter_options())
}

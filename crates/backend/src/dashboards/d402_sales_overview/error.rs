use thiserror::Error;

use crate::shared::sales_api::SalesApiError;

#[derive(Debug, Error)]
pub enum SalesOverviewError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error(transparent)]
    Provider(#[from] SalesApiError),
}

pub mod labdados;

use contracts::dashboards::d402_sales_overview::SaleRecord;
use contracts::enums::Region;
use thiserror::Error;

pub use labdados::LabDadosClient;

/// Ошибки источника данных о продажах
#[derive(Debug, Error)]
pub enum SalesApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Sales API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed sales payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Server-side part of the filter: the provider knows region and year only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProviderQuery {
    pub region: Region,
    pub year: Option<i32>,
}

impl ProviderQuery {
    /// `regiao` / `ano` pairs; empty strings mean "unfiltered"
    pub fn params(&self) -> [(&'static str, String); 2] {
        [
            ("regiao", self.region.query_value().to_string()),
            ("ano", self.year.map(|y| y.to_string()).unwrap_or_default()),
        ]
    }
}

/// Трейт для источников данных о продажах
///
/// Blocking by contract: callers inside the async runtime go through
/// `spawn_blocking`.
pub trait SalesDataProvider: Send + Sync {
    fn fetch(&self, query: &ProviderQuery) -> Result<Vec<SaleRecord>, SalesApiError>;
}

use contracts::dashboards::d402_sales_overview::SaleRecord;

use super::{ProviderQuery, SalesApiError, SalesDataProvider};

/// Блокирующий HTTP-клиент для API продаж (labdados.com/produtos)
pub struct LabDadosClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl LabDadosClient {
    /// Must be called outside of the async runtime (e.g. inside `spawn_blocking`)
    pub fn new(url: impl Into<String>) -> Result<Self, SalesApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SalesDataProvider for LabDadosClient {
    fn fetch(&self, query: &ProviderQuery) -> Result<Vec<SaleRecord>, SalesApiError> {
        let params = query.params();
        tracing::debug!(
            "Sales API request: {} regiao='{}' ano='{}'",
            self.url,
            params[0].1,
            params[1].1
        );

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .query(&params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!("Sales API returned HTTP {}: {}", status.as_u16(), body);
            return Err(SalesApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        let records: Vec<SaleRecord> = serde_json::from_str(&body)?;
        tracing::info!("Sales API returned {} records", records.len());
        Ok(records)
    }
}

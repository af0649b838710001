use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::enums::Region;

/// First and last year offered by the year slider
pub const YEAR_MIN: i32 = 2020;
pub const YEAR_MAX: i32 = 2023;

/// Bounds and default of the "how many sellers" input
pub const TOP_SELLERS_MIN: usize = 2;
pub const TOP_SELLERS_MAX: usize = 10;
pub const TOP_SELLERS_DEFAULT: usize = 5;

/// Number of rows in the "top states" table
pub const TOP_STATES: usize = 5;

/// One sale as returned by the sales API
///
/// Field names follow the provider's JSON exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Data da Compra", with = "super::purchase_date")]
    pub purchase_date: NaiveDate,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Local da compra")]
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "Vendedor")]
    pub seller: String,
}

/// Query string of GET /api/d402/sales_overview
///
/// `sellers` is a comma-separated list; absent or empty means every seller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesOverviewRequest {
    pub region: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
    pub sellers: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub top_sellers: Option<usize>,
}

/// `ano=` (empty) is how the dashboard asks for the whole period
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Active dashboard filters, rebuilt for every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFilter {
    pub region: Region,
    /// `None` = whole period
    pub year: Option<i32>,
    /// Empty = all sellers
    pub sellers: BTreeSet<String>,
    pub top_sellers: usize,
}

impl Default for SalesFilter {
    fn default() -> Self {
        Self {
            region: Region::Brasil,
            year: None,
            sellers: BTreeSet::new(),
            top_sellers: TOP_SELLERS_DEFAULT,
        }
    }
}

impl SalesFilter {
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_sellers<I, S>(mut self, sellers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sellers = sellers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_top_sellers(mut self, top_sellers: usize) -> Self {
        self.top_sellers = top_sellers;
        self
    }
}

impl TryFrom<SalesOverviewRequest> for SalesFilter {
    type Error = String;

    fn try_from(request: SalesOverviewRequest) -> Result<Self, Self::Error> {
        let region = match request.region.as_deref() {
            None => Region::Brasil,
            Some(code) => {
                Region::from_code(code).ok_or_else(|| format!("unknown region: {code}"))?
            }
        };

        let sellers = request
            .sellers
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            region,
            year: request.year,
            sellers,
            top_sellers: request.top_sellers.unwrap_or(TOP_SELLERS_DEFAULT),
        })
    }
}

/// Revenue of one state, with its map coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRevenue {
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    pub revenue: f64,
}

/// Revenue of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// First day of the month
    pub month_start: NaiveDate,
    pub year: i32,
    pub month: u32,
    /// English month name, e.g. "January"
    pub month_name: String,
    pub revenue: f64,
}

/// Y-axis range of the monthly revenue chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

/// Sum and count of sales per seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerSummary {
    pub seller: String,
    pub revenue: f64,
    pub sales_count: usize,
}

/// A pre-formatted metric card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

/// Response of GET /api/d402/sales_overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOverviewResponse {
    /// Filters the tables were computed with
    pub filter: SalesFilter,
    /// Records after the seller filter
    pub records: Vec<SaleRecord>,
    /// Seller options, taken from the fetch before the seller filter
    pub available_sellers: Vec<String>,
    /// "Receita" and "Quantidade de vendas" cards
    pub metrics: Vec<MetricCard>,
    pub total_revenue: f64,
    pub sales_count: usize,
    /// Sorted by revenue, highest first
    pub revenue_by_state: Vec<StateRevenue>,
    /// Chronological
    pub monthly_revenue: Vec<MonthlyRevenue>,
    /// `None` when there are no monthly buckets
    pub monthly_revenue_range: Option<RevenueRange>,
    pub top_states: Vec<StateRevenue>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub sellers: Vec<SellerSummary>,
    pub top_sellers: Vec<SellerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOption {
    pub code: String,
    pub name: String,
}

/// Catalog for the sidebar widgets (GET /api/d402/filter_options)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<RegionOption>,
    pub year_min: i32,
    pub year_max: i32,
    /// "Dados de todo o periodo" is checked initially
    pub all_periods_default: bool,
    pub top_sellers_min: usize,
    pub top_sellers_max: usize,
    pub top_sellers_default: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            regions: Region::all()
                .into_iter()
                .map(|r| RegionOption {
                    code: r.query_value().to_string(),
                    name: r.display_name().to_string(),
                })
                .collect(),
            year_min: YEAR_MIN,
            year_max: YEAR_MAX,
            all_periods_default: true,
            top_sellers_min: TOP_SELLERS_MIN,
            top_sellers_max: TOP_SELLERS_MAX,
            top_sellers_default: TOP_SELLERS_DEFAULT,
        }
    }
}

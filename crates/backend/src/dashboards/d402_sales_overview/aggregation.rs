//! Aggregate tables of the sales overview
//!
//! Every function here is pure: the tables depend only on the records passed in.

use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d402_sales_overview::{
    CategoryRevenue, MonthlyRevenue, RevenueRange, SaleRecord, SellerSummary, StateRevenue,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Keeps only sales of the selected sellers; an empty selection keeps everything
pub fn filter_by_sellers(records: Vec<SaleRecord>, sellers: &BTreeSet<String>) -> Vec<SaleRecord> {
    if sellers.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| sellers.contains(&r.seller))
        .collect()
}

/// Distinct sellers in order of first appearance
pub fn unique_sellers(records: &[SaleRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.seller.as_str()))
        .map(|r| r.seller.clone())
        .collect()
}

pub fn total_revenue(records: &[SaleRecord]) -> f64 {
    records.iter().map(|r| r.price).sum()
}

/// Sum of price per key; keys come out in ascending order
fn sum_by<'a, F>(records: &'a [SaleRecord], key: F) -> BTreeMap<&'a str, f64>
where
    F: Fn(&'a SaleRecord) -> &'a str,
{
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(key(record)).or_insert(0.0) += record.price;
    }
    totals
}

/// Revenue per state, highest first, with the coordinates of the state's first sale
pub fn revenue_by_state(records: &[SaleRecord]) -> Vec<StateRevenue> {
    let mut coordinates: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for record in records {
        coordinates
            .entry(record.state.as_str())
            .or_insert((record.lat, record.lon));
    }

    let mut rows: Vec<StateRevenue> = sum_by(records, |r| r.state.as_str())
        .into_iter()
        .map(|(state, revenue)| {
            let (lat, lon) = coordinates.get(state).copied().unwrap_or_default();
            StateRevenue {
                state: state.to_string(),
                lat,
                lon,
                revenue,
            }
        })
        .collect();
    // stable: equal revenues stay in state order
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

pub fn top_states(by_state: &[StateRevenue], n: usize) -> Vec<StateRevenue> {
    by_state.iter().take(n).cloned().collect()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month(start: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Revenue per calendar month, chronological
///
/// Covers every month from the first to the last sale; months without
/// sales in between carry zero revenue.
pub fn monthly_revenue(records: &[SaleRecord]) -> Vec<MonthlyRevenue> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(month_start(record.purchase_date)).or_insert(0.0) += record.price;
    }

    let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    let mut current = Some(first);
    while let Some(start) = current.filter(|s| *s <= last) {
        rows.push(MonthlyRevenue {
            month_start: start,
            year: start.year(),
            month: start.month(),
            month_name: MONTH_NAMES[start.month0() as usize].to_string(),
            revenue: totals.get(&start).copied().unwrap_or(0.0),
        });
        current = next_month(start);
    }
    rows
}

/// Y-axis range of the monthly chart, from the revenue column
pub fn revenue_range(monthly: &[MonthlyRevenue]) -> Option<RevenueRange> {
    let mut values = monthly.iter().map(|m| m.revenue);
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(RevenueRange { min, max })
}

/// Revenue per product category, highest first
pub fn revenue_by_category(records: &[SaleRecord]) -> Vec<CategoryRevenue> {
    let mut rows: Vec<CategoryRevenue> = sum_by(records, |r| r.category.as_str())
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue {
            category: category.to_string(),
            revenue,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

/// Sum and count of sales per seller, highest revenue first
pub fn seller_summary(records: &[SaleRecord]) -> Vec<SellerSummary> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(record.seller.as_str()).or_insert((0.0, 0));
        entry.0 += record.price;
        entry.1 += 1;
    }

    let mut rows: Vec<SellerSummary> = totals
        .into_iter()
        .map(|(seller, (revenue, sales_count))| SellerSummary {
            seller: seller.to_string(),
            revenue,
            sales_count,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

pub fn top_sellers(summary: &[SellerSummary], n: usize) -> Vec<SellerSummary> {
    summary.iter().take(n).cloned().collect()
}

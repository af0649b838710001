pub mod aggregation;
pub mod error;
pub mod service;

pub use error::SalesOverviewError;

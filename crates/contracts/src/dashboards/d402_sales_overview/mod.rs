pub mod dto;
pub mod purchase_date;

pub use dto::*;

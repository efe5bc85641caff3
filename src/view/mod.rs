//! View module - Filtering and aggregation over a dataset

mod aggregate;
mod filter;

pub use aggregate::{avg_price_by_beds_bathrooms, avg_price_by_neighbourhood, PivotTable};
pub use filter::{filter, FilterSelection, View};

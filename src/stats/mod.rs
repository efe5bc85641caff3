//! Stats module - Statistical calculations

mod calculator;
mod density;

pub use calculator::{BoxStats, GroupStats, StatsCalculator};
pub use density::{GaussianKde, Histogram};

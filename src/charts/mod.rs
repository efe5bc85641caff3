//! Charts module - Chart data and rendering

mod chart_data;
mod plotter;

pub use chart_data::{ChartData, PriceDistribution, RoomTypeBox, Violin};
pub use plotter::ChartPlotter;

//! Chart Data Module
//! Everything the six dashboard panels draw, derived from one filtered view.

use polars::prelude::*;

use crate::data::{ROOM_TYPE_COL, SUPERHOST_COL};
use crate::stats::{BoxStats, GaussianKde, GroupStats, Histogram, StatsCalculator};
use crate::view::{avg_price_by_beds_bathrooms, avg_price_by_neighbourhood, PivotTable, View};

/// Samples along each density curve.
pub const KDE_POINTS: usize = 200;

/// Bandwidths a violin extends past its most extreme values.
pub const VIOLIN_CUT: f64 = 2.0;

/// Price histogram with a density curve scaled to bin counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceDistribution {
    pub histogram: Histogram,
    pub kde_curve: Vec<[f64; 2]>,
}

impl PriceDistribution {
    pub fn new(prices: &[f64], bins: usize) -> Self {
        let histogram = Histogram::new(prices, bins);
        let scale = prices.len() as f64 * histogram.bin_width();

        let kde_curve = match (GaussianKde::new(prices), histogram.edges.first(), histogram.edges.last()) {
            (Some(kde), Some(&lo), Some(&hi)) => kde
                .curve(lo, hi, KDE_POINTS)
                .into_iter()
                .map(|[x, d]| [x, d * scale])
                .collect(),
            _ => Vec::new(),
        };

        Self {
            histogram,
            kde_curve,
        }
    }
}

/// Price box plot for one room type.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomTypeBox {
    pub room_type: String,
    pub count: usize,
    pub stats: BoxStats,
}

/// Price violin for one superhost value.
#[derive(Debug, Clone, PartialEq)]
pub struct Violin {
    pub label: String,
    /// `[price, density]` pairs; empty when the group has no spread.
    pub density: Vec<[f64; 2]>,
    pub stats: BoxStats,
}

impl Violin {
    fn new(label: &str, prices: &[f64]) -> Option<Self> {
        let stats = StatsCalculator::box_stats(prices)?;
        let density = GaussianKde::new(prices)
            .map(|kde| {
                let (lo, hi) = kde.support(VIOLIN_CUT);
                kde.curve(lo, hi, KDE_POINTS)
            })
            .unwrap_or_default();

        Some(Self {
            label: label.to_string(),
            density,
            stats,
        })
    }

    /// Largest density value, used to scale the violin width.
    pub fn peak(&self) -> f64 {
        self.density.iter().map(|p| p[1]).fold(0.0, f64::max)
    }
}

/// Inputs for all dashboard panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub listing_count: usize,
    pub price_summary: GroupStats,
    pub distribution: PriceDistribution,
    pub neighbourhood_prices: Vec<(String, f64)>,
    pub room_type_boxes: Vec<RoomTypeBox>,
    /// `None` when the source had no superhost column.
    pub superhost: Option<Vec<Violin>>,
    /// `[number_of_reviews, price]` points.
    pub reviews_vs_price: Vec<[f64; 2]>,
    pub beds_bathrooms: PivotTable,
}

impl ChartData {
    pub fn from_view(view: &View, has_superhost: bool, bins: usize) -> PolarsResult<Self> {
        let prices = view.prices()?;
        let superhost = if has_superhost {
            Some(Self::superhost_violins(view)?)
        } else {
            None
        };

        Ok(Self {
            listing_count: view.len(),
            price_summary: StatsCalculator::compute_descriptive_stats(&prices),
            distribution: PriceDistribution::new(&prices, bins),
            neighbourhood_prices: avg_price_by_neighbourhood(view)?,
            room_type_boxes: Self::room_type_boxes(view)?,
            superhost,
            reviews_vs_price: view.reviews_vs_price()?,
            beds_bathrooms: avg_price_by_beds_bathrooms(view)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.listing_count == 0
    }

    fn room_type_boxes(view: &View) -> PolarsResult<Vec<RoomTypeBox>> {
        let mut boxes = Vec::new();
        for room_type in view.room_types()? {
            let prices = view.prices_where(col(ROOM_TYPE_COL).eq(lit(room_type.as_str())))?;
            if let Some(stats) = StatsCalculator::box_stats(&prices) {
                boxes.push(RoomTypeBox {
                    room_type,
                    count: prices.len(),
                    stats,
                });
            }
        }
        Ok(boxes)
    }

    fn superhost_violins(view: &View) -> PolarsResult<Vec<Violin>> {
        let mut violins = Vec::new();
        for (flag, label) in [(false, "false"), (true, "true")] {
            let prices = view.prices_where(col(SUPERHOST_COL).eq(lit(flag)))?;
            violins.extend(Violin::new(label, &prices));
        }
        Ok(violins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Listing};
    use crate::view::{filter, FilterSelection};

    fn listing(room_type: &str, price: f64, reviews: Option<f64>, superhost: Option<bool>) -> Listing {
        Listing {
            price,
            neighbourhood: "Mitte".to_string(),
            room_type: room_type.to_string(),
            beds: 1.0,
            bathrooms: 1.0,
            number_of_reviews: reviews,
            host_is_superhost: superhost,
        }
    }

    fn dataset(has_superhost: bool) -> Dataset {
        Dataset::new(
            vec![
                listing("Private room", 40.0, Some(3.0), Some(true)),
                listing("Entire home/apt", 120.0, Some(10.0), Some(false)),
                listing("Private room", 55.0, None, Some(true)),
                listing("Entire home/apt", 180.0, Some(1.0), None),
                listing("Private room", 65.0, Some(0.0), Some(false)),
            ],
            has_superhost,
        )
        .unwrap()
    }

    #[test]
    fn builds_every_panel() {
        let dataset = dataset(true);
        let view = View::full(&dataset);
        let data = ChartData::from_view(&view, dataset.has_superhost(), 40).unwrap();

        assert_eq!(data.listing_count, 5);
        assert_eq!(data.distribution.histogram.total(), 5);
        assert_eq!(data.distribution.kde_curve.len(), KDE_POINTS);
        assert_eq!(data.neighbourhood_prices, vec![("Mitte".to_string(), 92.0)]);

        let rooms: Vec<&str> = data.room_type_boxes.iter().map(|b| b.room_type.as_str()).collect();
        assert_eq!(rooms, vec!["Private room", "Entire home/apt"]);
        assert_eq!(data.room_type_boxes[0].count, 3);
        assert_eq!(data.room_type_boxes[0].stats.median, 55.0);

        let violins = data.superhost.as_ref().unwrap();
        let labels: Vec<&str> = violins.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["false", "true"]);
        assert!(violins.iter().all(|v| v.peak() > 0.0));

        assert_eq!(data.reviews_vs_price.len(), 4);
        assert_eq!(data.beds_bathrooms.get(1.0, 1.0), Some(92.0));
    }

    #[test]
    fn superhost_panel_requires_column() {
        let dataset = dataset(false);
        let data =
            ChartData::from_view(&View::full(&dataset), dataset.has_superhost(), 40).unwrap();
        assert!(data.superhost.is_none());
    }

    #[test]
    fn empty_view_gives_empty_panels() {
        let dataset = dataset(true);
        let view = filter(&dataset, &FilterSelection::default()).unwrap();
        let data = ChartData::from_view(&view, true, 40).unwrap();

        assert!(data.is_empty());
        assert!(data.distribution.histogram.is_empty());
        assert!(data.distribution.kde_curve.is_empty());
        assert!(data.neighbourhood_prices.is_empty());
        assert!(data.room_type_boxes.is_empty());
        assert_eq!(data.superhost, Some(Vec::new()));
        assert!(data.reviews_vs_price.is_empty());
        assert!(data.beds_bathrooms.is_empty());
    }

    #[test]
    fn kde_curve_scaled_to_counts() {
        let prices = [40.0, 50.0, 60.0, 70.0, 80.0, 90.0];
        let distribution = PriceDistribution::new(&prices, 5);
        let width = distribution.histogram.bin_width();
        let step = (90.0 - 40.0) / (KDE_POINTS - 1) as f64;
        let area: f64 = distribution.kde_curve.iter().map(|p| p[1] * step).sum();

        // Area under the scaled curve is at most n * bin_width
        assert!(area > 0.0);
        assert!(area <= prices.len() as f64 * width);
    }
}

//! Listing and Dataset types.

use polars::prelude::*;
use std::collections::BTreeSet;

/// Text used for a missing category cell.
pub const MISSING_CATEGORY: &str = "nan";

pub const PRICE_COL: &str = "price";
pub const NEIGHBOURHOOD_COL: &str = "neighbourhood";
pub const ROOM_TYPE_COL: &str = "room_type";
pub const BEDS_COL: &str = "beds";
pub const BATHROOMS_COL: &str = "bathrooms";
pub const REVIEWS_COL: &str = "number_of_reviews";
pub const SUPERHOST_COL: &str = "host_is_superhost";

/// One cleaned Airbnb listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub price: f64,
    pub neighbourhood: String,
    pub room_type: String,
    pub beds: f64,
    pub bathrooms: f64,
    pub number_of_reviews: Option<f64>,
    pub host_is_superhost: Option<bool>,
}

/// Cleaned listings, immutable once built.
///
/// The listings are mirrored into a DataFrame with one column per field;
/// filtering and aggregation run on that frame.
#[derive(Debug, Clone)]
pub struct Dataset {
    listings: Vec<Listing>,
    frame: DataFrame,
    has_superhost: bool,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            frame: DataFrame::empty(),
            has_superhost: false,
        }
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        // The frame is derived from the listings
        self.listings == other.listings && self.has_superhost == other.has_superhost
    }
}

impl Dataset {
    pub fn new(listings: Vec<Listing>, has_superhost: bool) -> PolarsResult<Self> {
        let frame = Self::build_frame(&listings)?;
        Ok(Self {
            listings,
            frame,
            has_superhost,
        })
    }

    fn build_frame(listings: &[Listing]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(
                PRICE_COL.into(),
                listings.iter().map(|l| l.price).collect::<Vec<f64>>(),
            ),
            Column::new(
                NEIGHBOURHOOD_COL.into(),
                listings
                    .iter()
                    .map(|l| l.neighbourhood.as_str())
                    .collect::<Vec<&str>>(),
            ),
            Column::new(
                ROOM_TYPE_COL.into(),
                listings
                    .iter()
                    .map(|l| l.room_type.as_str())
                    .collect::<Vec<&str>>(),
            ),
            Column::new(
                BEDS_COL.into(),
                listings.iter().map(|l| l.beds).collect::<Vec<f64>>(),
            ),
            Column::new(
                BATHROOMS_COL.into(),
                listings.iter().map(|l| l.bathrooms).collect::<Vec<f64>>(),
            ),
            Column::new(
                REVIEWS_COL.into(),
                listings
                    .iter()
                    .map(|l| l.number_of_reviews)
                    .collect::<Vec<Option<f64>>>(),
            ),
            Column::new(
                SUPERHOST_COL.into(),
                listings
                    .iter()
                    .map(|l| l.host_is_superhost)
                    .collect::<Vec<Option<bool>>>(),
            ),
        ])
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Columnar copy of the listings.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Whether the source carried a `host_is_superhost` column.
    pub fn has_superhost(&self) -> bool {
        self.has_superhost
    }

    /// Distinct neighbourhoods, sorted ascending.
    pub fn neighbourhoods(&self) -> Vec<String> {
        self.listings
            .iter()
            .map(|l| l.neighbourhood.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct room types in order of first appearance.
    pub fn room_types(&self) -> Vec<String> {
        first_seen(self.listings.iter().map(|l| l.room_type.as_str()))
    }
}

/// Distinct values of an iterator, keeping the order they first appear in.
pub fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(neighbourhood: &str, room_type: &str) -> Listing {
        Listing {
            price: 80.0,
            neighbourhood: neighbourhood.to_string(),
            room_type: room_type.to_string(),
            beds: 1.0,
            bathrooms: 1.0,
            number_of_reviews: None,
            host_is_superhost: None,
        }
    }

    #[test]
    fn distinct_values() {
        let dataset = Dataset::new(
            vec![
                listing("Mitte", "Private room"),
                listing("Kreuzberg", "Entire home/apt"),
                listing("Mitte", "Entire home/apt"),
                listing("Friedrichshain", "Shared room"),
            ],
            false,
        )
        .unwrap();

        assert_eq!(
            dataset.neighbourhoods(),
            vec!["Friedrichshain", "Kreuzberg", "Mitte"]
        );
        assert_eq!(
            dataset.room_types(),
            vec!["Private room", "Entire home/apt", "Shared room"]
        );
        assert_eq!(dataset.len(), 4);
        assert!(!dataset.has_superhost());
    }

    #[test]
    fn frame_mirrors_listings() {
        let mut superhost = listing("Mitte", "Private room");
        superhost.number_of_reviews = Some(12.0);
        superhost.host_is_superhost = Some(true);
        let dataset = Dataset::new(vec![superhost, listing("Pankow", "Shared room")], true).unwrap();

        let frame = dataset.frame();
        assert_eq!(frame.shape(), (2, 7));
        let neighbourhoods: Vec<Option<&str>> = frame
            .column(NEIGHBOURHOOD_COL)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(neighbourhoods, vec![Some("Mitte"), Some("Pankow")]);

        let reviews: Vec<Option<f64>> = frame
            .column(REVIEWS_COL)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(reviews, vec![Some(12.0), None]);
        assert_eq!(frame.column(SUPERHOST_COL).unwrap().null_count(), 1);
    }

    #[test]
    fn default_dataset_is_empty() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.frame().height(), 0);
    }
}

//! Filter Module
//! Selection of neighbourhoods and room types, and the view it produces.

use polars::prelude::*;
use std::collections::BTreeSet;

use crate::data::{first_seen, Dataset, NEIGHBOURHOOD_COL, PRICE_COL, REVIEWS_COL, ROOM_TYPE_COL};

/// Selected values for the two categorical filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub neighbourhoods: BTreeSet<String>,
    pub room_types: BTreeSet<String>,
}

impl FilterSelection {
    /// Everything selected: every listing passes.
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            neighbourhoods: dataset.neighbourhoods().into_iter().collect(),
            room_types: dataset.room_types().into_iter().collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.neighbourhoods.is_empty() || self.room_types.is_empty()
    }

    /// `neighbourhood IN (..) AND room_type IN (..)`
    fn predicate(&self) -> Expr {
        col(NEIGHBOURHOOD_COL)
            .is_in(lit(values_series(NEIGHBOURHOOD_COL, &self.neighbourhoods)))
            .and(col(ROOM_TYPE_COL).is_in(lit(values_series(ROOM_TYPE_COL, &self.room_types))))
    }
}

fn values_series(name: &str, values: &BTreeSet<String>) -> Series {
    Series::new(
        name.into(),
        values.iter().map(String::as_str).collect::<Vec<&str>>(),
    )
}

/// Read-only subset of a Dataset's frame, in dataset order.
#[derive(Debug, Clone)]
pub struct View {
    frame: DataFrame,
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        self.frame.equals_missing(&other.frame)
    }
}

impl View {
    /// View over every listing of a dataset.
    pub fn full(dataset: &Dataset) -> Self {
        Self {
            frame: dataset.frame().clone(),
        }
    }

    /// No listings, same columns as the dataset.
    fn empty(dataset: &Dataset) -> Self {
        Self {
            frame: dataset.frame().clear(),
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn prices(&self) -> PolarsResult<Vec<f64>> {
        f64_values(&self.frame, PRICE_COL)
    }

    /// Prices of the listings matching a predicate.
    pub fn prices_where(&self, predicate: Expr) -> PolarsResult<Vec<f64>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let df = self
            .frame
            .clone()
            .lazy()
            .filter(predicate)
            .select([col(PRICE_COL)])
            .collect()?;
        f64_values(&df, PRICE_COL)
    }

    /// Distinct room types in order of first appearance.
    pub fn room_types(&self) -> PolarsResult<Vec<String>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let room_types = self.frame.column(ROOM_TYPE_COL)?.str()?;
        Ok(first_seen(room_types.into_iter().flatten()))
    }

    /// `[number_of_reviews, price]` for listings that have a review count.
    pub fn reviews_vs_price(&self) -> PolarsResult<Vec<[f64; 2]>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let reviews = self.frame.column(REVIEWS_COL)?.f64()?;
        let prices = self.frame.column(PRICE_COL)?.f64()?;
        Ok(reviews
            .into_iter()
            .zip(prices)
            .filter_map(|(r, p)| Some([r?, p?]))
            .collect())
    }
}

/// Non-null values of a Float64 column.
fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    Ok(df.column(name)?.f64()?.into_iter().flatten().collect())
}

/// Listings whose neighbourhood AND room type are both selected.
pub fn filter(dataset: &Dataset, selection: &FilterSelection) -> PolarsResult<View> {
    let view = if dataset.is_empty() || selection.is_empty() {
        View::empty(dataset)
    } else {
        View {
            frame: dataset
                .frame()
                .clone()
                .lazy()
                .filter(selection.predicate())
                .collect()?,
        }
    };

    log::debug!(
        "Filter kept {} of {} listings ({} neighbourhoods, {} room types selected)",
        view.len(),
        dataset.len(),
        selection.neighbourhoods.len(),
        selection.room_types.len()
    );

    Ok(view)
}

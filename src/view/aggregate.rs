//! Aggregate Module
//! Mean price grouped by neighbourhood and by (beds, bathrooms).

use polars::prelude::*;

use super::filter::View;
use crate::data::{BATHROOMS_COL, BEDS_COL, NEIGHBOURHOOD_COL, PRICE_COL};

const MEAN_PRICE: &str = "mean_price";

/// Mean price per group key, as a lazy frame.
fn mean_price_by(view: &View, keys: &[&str]) -> LazyFrame {
    view.frame()
        .clone()
        .lazy()
        .group_by(keys.iter().map(|k| col(*k)).collect::<Vec<_>>())
        .agg([col(PRICE_COL).mean().alias(MEAN_PRICE)])
}

/// Mean price per neighbourhood, sorted descending by mean.
///
/// Equal means are ordered by neighbourhood name, ascending.
pub fn avg_price_by_neighbourhood(view: &View) -> PolarsResult<Vec<(String, f64)>> {
    if view.is_empty() {
        return Ok(Vec::new());
    }

    let means = mean_price_by(view, &[NEIGHBOURHOOD_COL])
        .sort_by_exprs(
            [col(MEAN_PRICE), col(NEIGHBOURHOOD_COL)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let names = means.column(NEIGHBOURHOOD_COL)?.str()?;
    let values = means.column(MEAN_PRICE)?.f64()?;
    Ok(names
        .into_iter()
        .zip(values)
        .filter_map(|(name, mean)| Some((name?.to_string(), mean?)))
        .collect())
}

/// Mean price for each (beds, bathrooms) pairing present in a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    /// Distinct bed counts, ascending.
    pub row_keys: Vec<f64>,
    /// Distinct bathroom counts, ascending.
    pub col_keys: Vec<f64>,
    /// `cells[row][col]`, `None` where no listing has that pairing.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    /// Mean price for a pairing, if any listing has it.
    pub fn get(&self, beds: f64, bathrooms: f64) -> Option<f64> {
        let r = key_index(&self.row_keys, beds)?;
        let c = key_index(&self.col_keys, bathrooms)?;
        self.cells[r][c]
    }

    /// Smallest and largest cell values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |range, &v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn sorted_keys(values: impl Iterator<Item = f64>) -> Vec<f64> {
    // `+ 0.0` folds -0.0 into 0.0
    let mut keys: Vec<f64> = values.map(|v| v + 0.0).collect();
    keys.sort_by(f64::total_cmp);
    keys.dedup();
    keys
}

fn key_index(keys: &[f64], value: f64) -> Option<usize> {
    keys.binary_search_by(|k| k.total_cmp(&(value + 0.0))).ok()
}

/// Mean price by beds (rows) and bathrooms (columns).
pub fn avg_price_by_beds_bathrooms(view: &View) -> PolarsResult<PivotTable> {
    if view.is_empty() {
        return Ok(PivotTable::default());
    }

    let means = mean_price_by(view, &[BEDS_COL, BATHROOMS_COL]).collect()?;
    let beds = means.column(BEDS_COL)?.f64()?;
    let bathrooms = means.column(BATHROOMS_COL)?.f64()?;
    let values = means.column(MEAN_PRICE)?.f64()?;
    let groups: Vec<(f64, f64, f64)> = beds
        .into_iter()
        .zip(bathrooms)
        .zip(values)
        .filter_map(|((b, ba), mean)| Some((b?, ba?, mean?)))
        .collect();

    let row_keys = sorted_keys(groups.iter().map(|g| g.0));
    let col_keys = sorted_keys(groups.iter().map(|g| g.1));
    let mut cells: Vec<Vec<Option<f64>>> = vec![vec![None; col_keys.len()]; row_keys.len()];
    for (b, ba, mean) in groups {
        if let (Some(r), Some(c)) = (key_index(&row_keys, b), key_index(&col_keys, ba)) {
            cells[r][c] = Some(mean);
        }
    }

    Ok(PivotTable {
        row_keys,
        col_keys,
        cells,
    })
}

//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;
mod model;

pub use cleaner::{parse_price, CleaningOptions, PriceError, PricePolicy};
pub use loader::{load, LoaderError};
pub use model::{
    first_seen, Dataset, Listing, BATHROOMS_COL, BEDS_COL, MISSING_CATEGORY, NEIGHBOURHOOD_COL,
    PRICE_COL, REVIEWS_COL, ROOM_TYPE_COL, SUPERHOST_COL,
};

//! CSV Listing Loader Module
//! Reads the listings CSV with Polars and extracts the columns the dashboard needs.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::cleaner::{clean, CleanReport, CleaningOptions, RawListing};
use super::model::{
    Dataset, BATHROOMS_COL, BEDS_COL, NEIGHBOURHOOD_COL, PRICE_COL, REVIEWS_COL, ROOM_TYPE_COL,
    SUPERHOST_COL,
};

const REQUIRED_COLUMNS: [&str; 6] = [
    PRICE_COL,
    NEIGHBOURHOOD_COL,
    ROOM_TYPE_COL,
    BEDS_COL,
    BATHROOMS_COL,
    REVIEWS_COL,
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    /// `line` is the 1-based CSV line, counting the header as line 1.
    #[error("Line {line}: unparseable price {value:?}")]
    UnparseablePrice { line: usize, value: String },
}

/// Load and clean a listings CSV.
pub fn load(path: &Path, options: &CleaningOptions) -> Result<Dataset, LoaderError> {
    let report = ListingLoader::load_csv(path, options)?;
    log::info!(
        "Loaded {} of {} listings from {} ({} without price, {} unparseable, {} at or above {})",
        report.dataset.len(),
        report.rows_read,
        path.display(),
        report.missing_price,
        report.unparseable_price,
        report.over_threshold,
        options.max_price,
    );
    Ok(report.dataset)
}

/// Handles CSV file loading with Polars.
pub struct ListingLoader;

impl ListingLoader {
    /// Read a CSV file and clean it, keeping the row accounting.
    pub fn load_csv(path: &Path, options: &CleaningOptions) -> Result<CleanReport, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let path_str = path.to_string_lossy().to_string();
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let (rows, has_superhost) = Self::extract_rows(&df)?;
        clean(rows, has_superhost, options)
    }

    /// Pull the listing columns out of a DataFrame, one raw row per record.
    pub fn extract_rows(df: &DataFrame) -> Result<(Vec<RawListing>, bool), LoaderError> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        let price = df.column(PRICE_COL)?;
        let neighbourhood = df.column(NEIGHBOURHOOD_COL)?;
        let room_type = df.column(ROOM_TYPE_COL)?;
        let superhost = df.column(SUPERHOST_COL).ok();

        let beds = df.column(BEDS_COL)?.cast(&DataType::Float64)?;
        let bathrooms = df.column(BATHROOMS_COL)?.cast(&DataType::Float64)?;
        let reviews = df.column(REVIEWS_COL)?.cast(&DataType::Float64)?;
        let beds = beds.f64()?;
        let bathrooms = bathrooms.f64()?;
        let reviews = reviews.f64()?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            rows.push(RawListing {
                price: text_at(price, i),
                neighbourhood: text_at(neighbourhood, i),
                room_type: text_at(room_type, i),
                beds: beds.get(i),
                bathrooms: bathrooms.get(i),
                number_of_reviews: reviews.get(i),
                host_is_superhost: superhost.and_then(|col| text_at(col, i)),
            });
        }

        Ok((rows, superhost.is_some()))
    }
}

/// Render a cell as text whatever its inferred type; nulls stay `None`.
fn text_at(column: &Column, index: usize) -> Option<String> {
    let value = column.get(index).ok()?;
    if value.is_null() {
        None
    } else if let Some(text) = value.get_str() {
        Some(text.to_string())
    } else {
        Some(value.to_string().trim_matches('"').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PricePolicy;
    use std::fs;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "airbnb_dashboard_{}_{}.csv",
            name,
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    const LISTINGS: &str = "\
id,neighbourhood,room_type,price,beds,bathrooms,number_of_reviews,host_is_superhost
1,Mitte,Entire home/apt,$120.00,2,1,15,t
2,Mitte,Private room,\"$1,234.50\",1,1,3,f
3,Kreuzberg,Private room,$45.00,,,0,t
4,Neukölln,Shared room,$20.00,1,,7,
5,Kreuzberg,Entire home/apt,,3,2,1,f
";

    #[test]
    fn loads_and_cleans_csv() {
        let path = write_fixture("listings", LISTINGS);
        let report = ListingLoader::load_csv(&path, &CleaningOptions::default()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(report.rows_read, 5);
        assert_eq!(report.over_threshold, 1);
        assert_eq!(report.missing_price, 1);

        let dataset = report.dataset;
        assert!(dataset.has_superhost());
        assert_eq!(dataset.len(), 3);

        let listings = dataset.listings();
        assert_eq!(listings[0].price, 120.0);
        assert_eq!(listings[0].neighbourhood, "Mitte");
        assert_eq!(listings[0].host_is_superhost, Some(true));
        assert_eq!(listings[1].beds, 0.0);
        assert_eq!(listings[1].bathrooms, 0.0);
        assert_eq!(listings[1].number_of_reviews, Some(0.0));
        assert_eq!(listings[2].neighbourhood, "Neukölln");
        assert_eq!(listings[2].host_is_superhost, None);

        for listing in listings {
            assert!(listing.price < 500.0);
        }
    }

    #[test]
    fn numeric_neighbourhoods_become_text() {
        let path = write_fixture(
            "numeric_neighbourhood",
            "neighbourhood,room_type,price,beds,bathrooms,number_of_reviews\n\
             10115,Private room,$50,1,1,2\n\
             10997,Private room,$60,1,1,4\n",
        );
        let dataset = load(&path, &CleaningOptions::default()).unwrap();
        fs::remove_file(&path).ok();

        assert!(!dataset.has_superhost());
        assert_eq!(dataset.neighbourhoods(), vec!["10115", "10997"]);
    }

    #[test]
    fn missing_required_column() {
        let path = write_fixture(
            "missing_column",
            "neighbourhood,room_type,price,beds,number_of_reviews\nMitte,Private room,$50,1,2\n",
        );
        let err = load(&path, &CleaningOptions::default());
        fs::remove_file(&path).ok();

        match err {
            Err(LoaderError::MissingColumn(col)) => assert_eq!(col, BATHROOMS_COL),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn rejected_price_names_csv_line() {
        let path = write_fixture(
            "rejected_price",
            "neighbourhood,room_type,price,beds,bathrooms,number_of_reviews\n\
             Mitte,Private room,$50,1,1,2\n\
             Mitte,Private room,on request,1,1,4\n",
        );
        let options = CleaningOptions {
            price_policy: PricePolicy::Reject,
            ..CleaningOptions::default()
        };
        let err = load(&path, &options);
        fs::remove_file(&path).ok();

        match err {
            Err(e @ LoaderError::UnparseablePrice { .. }) => {
                assert_eq!(e.to_string(), "Line 3: unparseable price \"on request\"");
            }
            other => panic!("expected UnparseablePrice, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load(
            Path::new("/nonexistent/listings.csv"),
            &CleaningOptions::default(),
        );
        assert!(matches!(err, Err(LoaderError::FileNotFound(_))));
    }
}

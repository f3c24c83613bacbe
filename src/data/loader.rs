//! CSV Data Loader Module
//! Reads the processed sales file with Polars and turns it into a date-sorted table.

use crate::data::{SalesRecord, SalesTable};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DATE_COLUMN: &str = "date";
pub const REGION_COLUMN: &str = "region";
pub const SALES_COLUMN: &str = "Sales";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The '{}' file was not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("Row {row}: cannot parse sales amount '{value}'")]
    InvalidSales { row: usize, value: String },
    #[error("Row {row}: region is empty")]
    EmptyRegion { row: usize },
}

/// Loads the sales CSV once at startup.
pub struct SalesLoader;

impl SalesLoader {
    /// Load a CSV file and return its rows sorted by date.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<SalesTable, LoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        // Every field is read as text and parsed per row below, so a late
        // non-integer amount can't be nulled by type inference.
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        debug!(rows = df.height(), columns = df.width(), "CSV read");

        let table = Self::from_dataframe(&df)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            regions = table.regions().len(),
            "Sales data loaded"
        );
        Ok(table)
    }

    /// Convert a frame holding `date`, `region` and `Sales` columns into a table.
    pub fn from_dataframe(df: &DataFrame) -> Result<SalesTable, LoaderError> {
        let date_col = Self::resolve_column(df, DATE_COLUMN)?;
        let region_col = Self::resolve_column(df, REGION_COLUMN)?;
        let sales_col = Self::resolve_column(df, SALES_COLUMN)?;

        let dates = Self::string_values(df, &date_col)?;
        let regions = Self::string_values(df, &region_col)?;
        let sales = Self::string_values(df, &sales_col)?;

        let mut records = Vec::with_capacity(df.height());
        let rows = dates.into_iter().zip(regions).zip(sales);
        for (i, ((date, region), amount)) in rows.enumerate() {
            let row = i + 1;

            let date_raw = date.unwrap_or_default();
            let date = parse_date(&date_raw).ok_or_else(|| LoaderError::InvalidDate {
                row,
                value: date_raw.clone(),
            })?;

            let region = region
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .ok_or(LoaderError::EmptyRegion { row })?;

            let sales_raw = amount.unwrap_or_default();
            let sales = parse_sales(&sales_raw).ok_or_else(|| LoaderError::InvalidSales {
                row,
                value: sales_raw.clone(),
            })?;

            records.push(SalesRecord {
                date,
                region,
                sales,
            });
        }

        Ok(SalesTable::from_records(records))
    }

    /// Find a column by name, ignoring case (`Sales` and `sales` both match).
    fn resolve_column(df: &DataFrame, wanted: &str) -> Result<String, LoaderError> {
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .find(|name| name.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LoaderError::MissingColumn(wanted.to_string()))
    }

    /// Column values rendered as strings, nulls kept as `None`.
    fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }
}

/// Parse the date formats the processed files are known to use.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok())
}

/// Parse a sales amount, tolerating currency formatting such as `$1,234.50`.
pub fn parse_sales(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

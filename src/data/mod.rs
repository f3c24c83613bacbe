//! Data module - CSV loading, sales table and region filtering

mod filter;
mod loader;
mod table;

pub use filter::{RegionFilter, RegionSelector};
pub use loader::{parse_date, parse_sales, LoaderError, SalesLoader};
pub use table::{SalesRecord, SalesTable};

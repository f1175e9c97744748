//! Price history sources: the provider contract and the CSV importer.

pub mod csv_import;
pub mod provider;

pub use csv_import::{load_csv, CsvProvider};
pub use provider::{check_range, FetchError, PriceProvider};

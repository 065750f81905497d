//! [`DataLoader`](super::DataLoader) implementations.

mod csv_impl;

pub use csv_impl::{load_from_csv, CsvLoader};

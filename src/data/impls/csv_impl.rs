//! CSV-backed [`DataLoader`]: one example per row, `label,pixel0,...,pixelN`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::ReaderBuilder;

use crate::data::{DataError, DataLoader, Dataset, Example};

/// Loads labeled examples from a headerless CSV file. The first field of a
/// row is the class label, the rest are grayscale feature values kept as-is.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
    num_classes: usize,
}

impl CsvLoader {
    pub fn new(path: impl AsRef<Path>, num_classes: usize) -> Self {
        CsvLoader {
            path: path.as_ref().to_path_buf(),
            num_classes,
        }
    }
}

impl DataLoader for CsvLoader {
    fn load(&self) -> Result<Dataset, DataError> {
        let file = File::open(&self.path)?;
        let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);

        let mut examples = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let line = idx + 1;

            let mut fields = record.iter();
            let label_field = fields.next().ok_or(DataError::EmptyFeatures)?;
            let label: usize = parse_field(label_field, line)?;
            let features = fields
                .map(|field| parse_field(field, line))
                .collect::<Result<Vec<f64>, _>>()?;

            examples.push(Example::new(features, label, self.num_classes)?);
        }
        Dataset::new(examples)
    }
}

/// Loads a dataset from `path` in one call.
///
/// # Errors
///
/// Whatever [`CsvLoader::load`] reports for the file.
pub fn load_from_csv(path: impl AsRef<Path>, num_classes: usize) -> Result<Dataset, DataError> {
    CsvLoader::new(path, num_classes).load()
}

fn parse_field<T>(value: &str, line: usize) -> Result<T, DataError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| DataError::Parse {
        line,
        value: value.to_string(),
        message: e.to_string(),
    })
}

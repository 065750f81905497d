//! Error types for dataset loading and validation.

use std::fmt;

/// Errors produced while loading or validating a dataset.
///
/// # Variants
///
/// - **Io**: the file could not be opened or read.
/// - **Csv**: the reader rejected the file structure, e.g. a row with a
///   different field count than the first row.
/// - **Parse**: a field that should be a number is not; carries the
///   1-based row number and the raw field.
/// - **EmptyDataset**: the file parsed but contained no rows.
/// - **EmptyFeatures**: a row carried a label and nothing else.
/// - **LabelOutOfRange**: a label does not fit the configured class count.
#[derive(Debug)]
pub enum DataError {
    /// Underlying file I/O failed.
    Io(std::io::Error),

    /// Structurally malformed CSV.
    Csv(csv::Error),

    /// A field could not be parsed as a number.
    Parse {
        /// 1-based row the field came from.
        line: usize,
        /// Raw field contents.
        value: String,
        /// Reason the parse failed.
        message: String,
    },

    /// No examples at all.
    EmptyDataset,

    /// An example must have at least one feature.
    EmptyFeatures,

    /// A label outside `0..num_classes`.
    LabelOutOfRange {
        /// The offending label.
        label: usize,
        /// The configured class count.
        num_classes: usize,
    },

    /// An example's feature count differs from the rest of the dataset.
    ShapeMismatch {
        /// Feature count established by the first example.
        expected: usize,
        /// Feature count of the offending example.
        got: usize,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "dataset i/o error: {e}"),
            DataError::Csv(e) => write!(f, "malformed csv: {e}"),
            DataError::Parse { line, value, message } => {
                write!(f, "row {line}: field {value:?} is not a number: {message}")
            }
            DataError::EmptyDataset => write!(f, "dataset contains no examples"),
            DataError::EmptyFeatures => write!(f, "example has no features"),
            DataError::LabelOutOfRange { label, num_classes } => {
                write!(f, "label {label} is outside 0..{num_classes}")
            }
            DataError::ShapeMismatch { expected, got } => {
                write!(f, "example has {got} features, expected {expected}")
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Csv(e)
    }
}

//! Dataset loading.
//!
//! The [`DataLoader`] trait and [`DataError`] live here, validated dataset
//! models in [`types`], and concrete loaders in [`impls`]. The only shipped
//! loader is [`CsvLoader`], which reads the `label,pixel0,...,pixelN` rows
//! the MNIST CSV dumps use.

mod error;
mod impls;
mod types;

pub use error::DataError;
pub use impls::{load_from_csv, CsvLoader};
pub use types::{Dataset, Example};

/// A source of labeled examples.
pub trait DataLoader {
    /// Loads the full dataset into memory.
    ///
    /// # Errors
    ///
    /// [`DataError`] describing the first problem found; loaders validate
    /// rather than repair.
    fn load(&self) -> Result<Dataset, DataError>;
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_labeled_rows() {
        let path = temp_csv("micromlp_data_rows.csv", "1,0,128,255,0\n0,7,0,0,9\n");
        let dataset = load_from_csv(&path, 2).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.width(), 4);
        let examples = dataset.examples();
        assert_eq!(examples[0].label(), 1);
        assert_eq!(examples[0].features(), &[0.0, 128.0, 255.0, 0.0]);
        assert_eq!(examples[1].label(), 0);
        assert_eq!(examples[1].features(), &[7.0, 0.0, 0.0, 9.0]);
    }

    #[test]
    fn reports_non_numeric_field_with_row() {
        let path = temp_csv("micromlp_data_bad_field.csv", "1,3,9\n0,x,2\n");
        let err = load_from_csv(&path, 2).unwrap_err();
        let _ = std::fs::remove_file(&path);

        match err {
            DataError::Parse { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "x");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_label_outside_class_range() {
        let path = temp_csv("micromlp_data_bad_label.csv", "7,1,2\n");
        let err = load_from_csv(&path, 2).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            err,
            DataError::LabelOutOfRange { label: 7, num_classes: 2 }
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let path = temp_csv("micromlp_data_ragged.csv", "1,2,3\n0,4\n");
        let err = load_from_csv(&path, 2).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn reports_missing_file_as_io() {
        let path = std::env::temp_dir().join("micromlp_data_no_such_file.csv");
        assert!(matches!(
            load_from_csv(&path, 2),
            Err(DataError::Io(_))
        ));
    }

    #[test]
    fn empty_file_is_an_empty_dataset() {
        let path = temp_csv("micromlp_data_empty.csv", "");
        let result = load_from_csv(&path, 2);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(DataError::EmptyDataset)));
    }

    #[test]
    fn example_validates_on_construction() {
        assert!(matches!(
            Example::new(Vec::new(), 0, 10),
            Err(DataError::EmptyFeatures)
        ));
        assert!(matches!(
            Example::new(vec![1.0], 10, 10),
            Err(DataError::LabelOutOfRange { label: 10, num_classes: 10 })
        ));
        assert!(Example::new(vec![1.0], 9, 10).is_ok());
    }

    #[test]
    fn dataset_rejects_mixed_widths() {
        let a = Example::new(vec![1.0, 2.0], 0, 2).unwrap();
        let b = Example::new(vec![1.0], 1, 2).unwrap();
        assert!(matches!(
            Dataset::new(vec![a, b]),
            Err(DataError::ShapeMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn targets_mark_label_with_plus_one() {
        let example = Example::new(vec![1.0], 1, 3).unwrap();
        assert_eq!(example.targets(3), vec![-1.0, 1.0, -1.0]);
    }

    #[test]
    fn ascii_marks_positive_pixels() {
        let example = Example::new(vec![0.0, 5.0, 3.0, 0.0], 0, 1).unwrap();
        assert_eq!(example.ascii(2), "  % \n%   \n");
        assert_eq!(example.ascii(0), "");
    }
}

//! Validated dataset types.
//!
//! [`Example`] is one labeled feature vector; [`Dataset`] is a non-empty
//! collection of examples with uniform width. Both validate on construction
//! so downstream code can index without re-checking.

use super::DataError;

/// One labeled example: a flattened grayscale image and its class.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    features: Vec<f64>,
    label: usize,
}

impl Example {
    /// Validates and builds an example. Feature values are kept exactly as
    /// given; no normalization happens here or anywhere downstream.
    ///
    /// # Errors
    ///
    /// [`DataError::EmptyFeatures`] for an empty feature vector,
    /// [`DataError::LabelOutOfRange`] when `label >= num_classes`.
    pub fn new(features: Vec<f64>, label: usize, num_classes: usize) -> Result<Self, DataError> {
        if features.is_empty() {
            return Err(DataError::EmptyFeatures);
        }
        if label >= num_classes {
            return Err(DataError::LabelOutOfRange { label, num_classes });
        }
        Ok(Example { features, label })
    }

    /// Raw feature values.
    #[must_use]
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Class label, always below the class count given at construction.
    #[must_use]
    pub fn label(&self) -> usize {
        self.label
    }

    /// Target vector for the squared-error loss: `+1.0` at the label
    /// position, `-1.0` everywhere else. The loss definition depends on
    /// this encoding; a `{0,1}` one-hot is not interchangeable.
    #[must_use]
    pub fn targets(&self, num_classes: usize) -> Vec<f64> {
        (0..num_classes)
            .map(|c| if c == self.label { 1.0 } else { -1.0 })
            .collect()
    }

    /// Renders the features as text rows, `cols` pixels per row, marking
    /// positive pixels with `"% "`. For eyeballing an image in a terminal;
    /// returns an empty string when `cols` is zero.
    #[must_use]
    pub fn ascii(&self, cols: usize) -> String {
        if cols == 0 {
            return String::new();
        }
        let mut out = String::new();
        for row in self.features.chunks(cols) {
            for &pixel in row {
                out.push_str(if pixel > 0.0 { "% " } else { "  " });
            }
            out.push('\n');
        }
        out
    }
}

/// A non-empty set of uniform-width examples.
#[derive(Debug, Clone)]
pub struct Dataset(Vec<Example>);

impl Dataset {
    /// Validates and builds a dataset. The first example fixes the expected
    /// feature width.
    ///
    /// # Errors
    ///
    /// [`DataError::EmptyDataset`] for no examples,
    /// [`DataError::ShapeMismatch`] when widths differ.
    pub fn new(examples: Vec<Example>) -> Result<Self, DataError> {
        let Some(first) = examples.first() else {
            return Err(DataError::EmptyDataset);
        };
        let width = first.features().len();
        for example in &examples {
            if example.features().len() != width {
                return Err(DataError::ShapeMismatch {
                    expected: width,
                    got: example.features().len(),
                });
            }
        }
        Ok(Dataset(examples))
    }

    /// Number of examples; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All examples in file order.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.0
    }

    /// Feature count shared by every example.
    #[must_use]
    pub fn width(&self) -> usize {
        self.0[0].features().len()
    }
}

//! Training configuration.
//!
//! [`Config`] carries every knob the pipeline reads: dataset paths, model
//! shape, initialization, the learning-rate schedule, and the batch walk.
//! [`from_env`] assembles one from `MICROMLP_`-prefixed environment
//! variables over the defaults; [`Config::validate`] checks cross-field
//! constraints before anything expensive starts.

mod builder;
mod constants;
mod error;

pub use builder::from_env;
pub use error::ConfigError;

use std::path::PathBuf;

use constants::*;

/// Everything the training pipeline needs to know, in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Seed for parameter initialization. Same seed, same starting model.
    pub seed: u64,
    /// Training CSV, `label,pixel...` rows without a header.
    pub train_path: PathBuf,
    /// Held-out CSV in the same format, used for periodic evaluation.
    pub test_path: PathBuf,
    /// Where the trained parameters are written after the final batch.
    pub snapshot_path: PathBuf,
    /// Features per example; 784 for flattened 28x28 images.
    pub input_dim: usize,
    /// Neurons per layer, hidden layers first, output layer last.
    pub layer_sizes: Vec<usize>,
    /// Number of classes. Must equal the last entry of `layer_sizes`.
    pub num_classes: usize,
    /// Standard deviation of the zero-mean Gaussian parameter init.
    pub init_std: f64,
    /// Learning rate at step 0.
    pub lr_start: f64,
    /// Learning rate the linear decay ends at; never undershot.
    pub lr_floor: f64,
    /// How many batches the training run walks through.
    pub num_batches: usize,
    /// Gradient-descent passes repeated on each batch before moving on.
    pub passes_per_batch: usize,
    /// Examples per batch, taken from the training set in cyclic order.
    pub batch_size: usize,
    /// Evaluate on the test set every this many batches.
    pub eval_every: usize,
    /// How many test examples each evaluation looks at (clamped to the
    /// test-set size).
    pub eval_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: DEFAULT_SEED,
            train_path: PathBuf::from(DEFAULT_TRAIN_PATH),
            test_path: PathBuf::from(DEFAULT_TEST_PATH),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            input_dim: DEFAULT_INPUT_DIM,
            layer_sizes: DEFAULT_LAYER_SIZES.to_vec(),
            num_classes: DEFAULT_NUM_CLASSES,
            init_std: DEFAULT_INIT_STD,
            lr_start: DEFAULT_LR_START,
            lr_floor: DEFAULT_LR_FLOOR,
            num_batches: DEFAULT_NUM_BATCHES,
            passes_per_batch: DEFAULT_PASSES_PER_BATCH,
            batch_size: DEFAULT_BATCH_SIZE,
            eval_every: DEFAULT_EVAL_EVERY,
            eval_size: DEFAULT_EVAL_SIZE,
        }
    }
}

impl Config {
    /// Total number of optimization steps in a full run, which is what the
    /// learning-rate decay is spread across.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.num_batches * self.passes_per_batch
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Validation`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_dim == 0 {
            return Err(ConfigError::Validation("input_dim must be positive".to_string()));
        }
        if self.layer_sizes.is_empty() {
            return Err(ConfigError::Validation("layer_sizes must not be empty".to_string()));
        }
        if let Some(pos) = self.layer_sizes.iter().position(|&s| s == 0) {
            return Err(ConfigError::Validation(format!(
                "layer_sizes[{pos}] must be positive"
            )));
        }
        if self.num_classes == 0 {
            return Err(ConfigError::Validation("num_classes must be positive".to_string()));
        }
        let last = self.layer_sizes[self.layer_sizes.len() - 1];
        if last != self.num_classes {
            return Err(ConfigError::Validation(format!(
                "output layer has {last} neurons but num_classes is {}",
                self.num_classes
            )));
        }
        if !self.init_std.is_finite() || self.init_std <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "init_std must be a positive finite number, got {}",
                self.init_std
            )));
        }
        if !self.lr_start.is_finite() || !self.lr_floor.is_finite() {
            return Err(ConfigError::Validation(
                "learning rates must be finite".to_string(),
            ));
        }
        if self.lr_floor < 0.0 {
            return Err(ConfigError::Validation(format!(
                "lr_floor must not be negative, got {}",
                self.lr_floor
            )));
        }
        if self.lr_start < self.lr_floor {
            return Err(ConfigError::Validation(format!(
                "lr_start {} is below lr_floor {}",
                self.lr_start, self.lr_floor
            )));
        }
        if self.num_batches == 0 {
            return Err(ConfigError::Validation("num_batches must be positive".to_string()));
        }
        if self.passes_per_batch == 0 {
            return Err(ConfigError::Validation(
                "passes_per_batch must be positive".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Validation("batch_size must be positive".to_string()));
        }
        if self.eval_every == 0 {
            return Err(ConfigError::Validation("eval_every must be positive".to_string()));
        }
        if self.eval_size == 0 {
            return Err(ConfigError::Validation("eval_size must be positive".to_string()));
        }
        Ok(())
    }
}

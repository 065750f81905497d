//! Default values and environment key names for the training configuration.
//!
//! Full environment keys are `ENV_PREFIX` plus a suffix, e.g.
//! `MICROMLP_BATCH_SIZE`. Keeping keys and defaults in one place avoids
//! magic numbers and repeated string literals across the config module.

/// Prefix for every environment variable this crate reads.
pub(crate) const ENV_PREFIX: &str = "MICROMLP_";

// Environment key suffixes.

pub(crate) const ENV_SEED: &str = "SEED";
pub(crate) const ENV_TRAIN_PATH: &str = "TRAIN_PATH";
pub(crate) const ENV_TEST_PATH: &str = "TEST_PATH";
pub(crate) const ENV_SNAPSHOT_PATH: &str = "SNAPSHOT_PATH";
pub(crate) const ENV_INPUT_DIM: &str = "INPUT_DIM";
pub(crate) const ENV_LAYER_SIZES: &str = "LAYER_SIZES";
pub(crate) const ENV_NUM_CLASSES: &str = "NUM_CLASSES";
pub(crate) const ENV_INIT_STD: &str = "INIT_STD";
pub(crate) const ENV_LR_START: &str = "LR_START";
pub(crate) const ENV_LR_FLOOR: &str = "LR_FLOOR";
pub(crate) const ENV_NUM_BATCHES: &str = "NUM_BATCHES";
pub(crate) const ENV_PASSES_PER_BATCH: &str = "PASSES_PER_BATCH";
pub(crate) const ENV_BATCH_SIZE: &str = "BATCH_SIZE";
pub(crate) const ENV_EVAL_EVERY: &str = "EVAL_EVERY";
pub(crate) const ENV_EVAL_SIZE: &str = "EVAL_SIZE";

// Defaults, sized for 28x28 grayscale digit CSVs.

pub(crate) const DEFAULT_SEED: u64 = 42;
pub(crate) const DEFAULT_TRAIN_PATH: &str = "data/mnist_train.csv";
pub(crate) const DEFAULT_TEST_PATH: &str = "data/mnist_test.csv";
pub(crate) const DEFAULT_SNAPSHOT_PATH: &str = "weights.bin";
pub(crate) const DEFAULT_INPUT_DIM: usize = 784;
pub(crate) const DEFAULT_LAYER_SIZES: &[usize] = &[10, 10];
pub(crate) const DEFAULT_NUM_CLASSES: usize = 10;
pub(crate) const DEFAULT_INIT_STD: f64 = 0.08;
pub(crate) const DEFAULT_LR_START: f64 = 0.5;
pub(crate) const DEFAULT_LR_FLOOR: f64 = 0.05;
pub(crate) const DEFAULT_NUM_BATCHES: usize = 100;
pub(crate) const DEFAULT_PASSES_PER_BATCH: usize = 5;
pub(crate) const DEFAULT_BATCH_SIZE: usize = 8;
pub(crate) const DEFAULT_EVAL_EVERY: usize = 5;
pub(crate) const DEFAULT_EVAL_SIZE: usize = 100;

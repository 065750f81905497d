//! Builds a [`Config`] from the process environment.
//!
//! Every field can be overridden by a `MICROMLP_`-prefixed variable; unset
//! variables fall back to the defaults in `constants`. Values are parsed
//! eagerly so a typo fails at startup instead of mid-run.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use super::constants::*;
use super::{Config, ConfigError};

/// Full environment key for a suffix, e.g. `BATCH_SIZE` to
/// `MICROMLP_BATCH_SIZE`.
pub(crate) fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

/// Reads an environment variable as a string. Unset is `Ok(None)`; a value
/// that is not valid Unicode is an error.
pub(crate) fn env_string(suffix: &str) -> Result<Option<String>, ConfigError> {
    let key = env_key(suffix);
    match std::env::var(&key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::EnvVar {
            key,
            message: "value is not valid unicode".to_string(),
        }),
    }
}

/// Reads and parses an environment variable. Unset is `Ok(None)`.
pub(crate) fn env_parsed<T>(suffix: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = env_string(suffix)? else {
        return Ok(None);
    };
    raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError::Parse {
        key: env_key(suffix),
        value: raw.clone(),
        message: e.to_string(),
    })
}

/// Reads a comma-separated `usize` list, e.g. `MICROMLP_LAYER_SIZES=16,10`.
/// Unset is `Ok(None)`.
pub(crate) fn env_usize_list(suffix: &str) -> Result<Option<Vec<usize>>, ConfigError> {
    let Some(raw) = env_string(suffix)? else {
        return Ok(None);
    };
    let mut sizes = Vec::new();
    for part in raw.split(',') {
        match part.trim().parse::<usize>() {
            Ok(size) => sizes.push(size),
            Err(e) => {
                return Err(ConfigError::Parse {
                    key: env_key(suffix),
                    value: raw.clone(),
                    message: format!("list entry {:?}: {e}", part.trim()),
                });
            }
        }
    }
    Ok(Some(sizes))
}

/// Assembles a [`Config`] from the environment over the defaults.
///
/// # Errors
///
/// [`ConfigError::EnvVar`] or [`ConfigError::Parse`] when a set variable
/// cannot be read or parsed. The result is not validated; call
/// [`Config::validate`] before use.
pub fn from_env() -> Result<Config, ConfigError> {
    let defaults = Config::default();
    Ok(Config {
        seed: env_parsed(ENV_SEED)?.unwrap_or(defaults.seed),
        train_path: env_string(ENV_TRAIN_PATH)?
            .map_or(defaults.train_path, PathBuf::from),
        test_path: env_string(ENV_TEST_PATH)?
            .map_or(defaults.test_path, PathBuf::from),
        snapshot_path: env_string(ENV_SNAPSHOT_PATH)?
            .map_or(defaults.snapshot_path, PathBuf::from),
        input_dim: env_parsed(ENV_INPUT_DIM)?.unwrap_or(defaults.input_dim),
        layer_sizes: env_usize_list(ENV_LAYER_SIZES)?.unwrap_or(defaults.layer_sizes),
        num_classes: env_parsed(ENV_NUM_CLASSES)?.unwrap_or(defaults.num_classes),
        init_std: env_parsed(ENV_INIT_STD)?.unwrap_or(defaults.init_std),
        lr_start: env_parsed(ENV_LR_START)?.unwrap_or(defaults.lr_start),
        lr_floor: env_parsed(ENV_LR_FLOOR)?.unwrap_or(defaults.lr_floor),
        num_batches: env_parsed(ENV_NUM_BATCHES)?.unwrap_or(defaults.num_batches),
        passes_per_batch: env_parsed(ENV_PASSES_PER_BATCH)?
            .unwrap_or(defaults.passes_per_batch),
        batch_size: env_parsed(ENV_BATCH_SIZE)?.unwrap_or(defaults.batch_size),
        eval_every: env_parsed(ENV_EVAL_EVERY)?.unwrap_or(defaults.eval_every),
        eval_size: env_parsed(ENV_EVAL_SIZE)?.unwrap_or(defaults.eval_size),
    })
}

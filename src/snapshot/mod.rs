//! Parameter snapshots.
//!
//! A snapshot is nothing but the flat `f64` list from
//! [`Mlp::parameter_data`](crate::nn::Mlp::parameter_data), bincode-encoded
//! with the standard configuration. No shapes or metadata are stored; the
//! loader must rebuild the same topology and feed the list back through
//! [`Mlp::load_parameter_data`](crate::nn::Mlp::load_parameter_data), which
//! checks the count.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bincode::error::{DecodeError, EncodeError};
use bincode::{config, decode_from_std_read, encode_into_std_write};

/// Errors from writing or reading a snapshot file.
#[derive(Debug)]
pub enum SnapshotError {
    /// Underlying file I/O failed.
    Io(std::io::Error),
    /// The parameter list could not be encoded.
    Encode(EncodeError),
    /// The file contents could not be decoded as a parameter list.
    Decode(DecodeError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "snapshot i/o error: {e}"),
            SnapshotError::Encode(e) => write!(f, "snapshot encode error: {e}"),
            SnapshotError::Decode(e) => write!(f, "snapshot decode error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(e) => Some(e),
            SnapshotError::Encode(e) => Some(e),
            SnapshotError::Decode(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<EncodeError> for SnapshotError {
    fn from(e: EncodeError) -> Self {
        SnapshotError::Encode(e)
    }
}

impl From<DecodeError> for SnapshotError {
    fn from(e: DecodeError) -> Self {
        SnapshotError::Decode(e)
    }
}

/// Writes `values` to `path`, overwriting any existing file.
///
/// # Errors
///
/// [`SnapshotError`] when the file cannot be created or written.
pub fn save(path: impl AsRef<Path>, values: &[f64]) -> Result<(), SnapshotError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_into_std_write(values.to_vec(), &mut writer, config::standard())?;
    writer.flush()?;
    Ok(())
}

/// Reads a parameter list back from `path`.
///
/// # Errors
///
/// [`SnapshotError`] when the file is missing, unreadable, or not a valid
/// snapshot.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<f64>, SnapshotError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let values = decode_from_std_read(&mut reader, config::standard())?;
    Ok(values)
}

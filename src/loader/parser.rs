use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// This function reads a file from `file_path`, attempts to parse it
/// as JSON, and returns an instance of `T`.
///
/// Errors are automatically converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: impl AsRef<Path>) -> Result<T> {
    let data = fs::read_to_string(file_path.as_ref()).map_err(Error::IoError)?;

    let parsed_data: T = serde_json::from_str(&data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Writes `value` as pretty-printed JSON to `file_path`.
///
/// The document is first written next to the target and then renamed over it,
/// so a reader never observes a half-written file.
pub fn write_json_file<T: Serialize>(file_path: impl AsRef<Path>, value: &T) -> Result<()> {
    let file_path = file_path.as_ref();
    let json = serde_json::to_string_pretty(value)?;

    let mut staging = file_path.as_os_str().to_owned();
    staging.push(".tmp");

    fs::write(&staging, json)?;
    fs::rename(&staging, file_path)?;

    Ok(())
}
